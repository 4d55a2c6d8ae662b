use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid distribution parameters: {detail}")]
    InvalidDistributionParameters { detail: String },

    #[error("{name} must be between 0 and 1.")]
    InvalidPercentage { name: &'static str },

    #[error("Invalid scenario input: {detail}")]
    InvalidScenarioInput { detail: String },

    #[error("Could not satisfy truncation bounds [{min}, {max}] within {attempts} attempts")]
    TruncationBoundsUnsatisfied { attempts: u32, min: f64, max: f64 },

    #[error("Simulation cancelled")]
    Cancelled,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    pub fn invalid_distribution(detail: impl Into<String>) -> Self {
        Self::InvalidDistributionParameters { detail: detail.into() }
    }

    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::InvalidScenarioInput { detail: detail.into() }
    }

    /// True for failures caused by the caller's parameters.
    /// The request layer maps these to a 400-style response.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDistributionParameters { .. }
                | Self::InvalidPercentage { .. }
                | Self::InvalidScenarioInput { .. }
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;

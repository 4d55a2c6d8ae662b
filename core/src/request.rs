//! Wire-level requests, as a request layer hands them to the engine.
//!
//! Parameter names follow the original query strings (`distMin`,
//! `demandSD`, `periodsPerYear`, ...). The `type` tag selects the call.

use crate::{
    cash_flow_scenario::CashFlowScenario,
    draw::DrawRequest,
    engine::SimEngine,
    error::SimResult,
    npv_scenario::NpvScenario,
    production_scenario::ProductionScenario,
    retention_scenario::RetentionScenario,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Draw {
        #[serde(default)]
        min: f64,
        #[serde(default)]
        mean: f64,
        #[serde(default)]
        max: f64,
        #[serde(default)]
        sd: f64,
    },
    Triangular {
        #[serde(rename = "distMin")]
        min: f64,
        #[serde(rename = "distMode")]
        mode: f64,
        #[serde(rename = "distMax")]
        max: f64,
    },
    Uniform {
        #[serde(rename = "distMin")]
        min: f64,
        #[serde(rename = "distMax")]
        max: f64,
    },
    Normal {
        #[serde(rename = "distMean")]
        mean: f64,
        #[serde(rename = "distSD")]
        sd: f64,
    },
    TruncatedNormal {
        #[serde(rename = "distMin")]
        min: f64,
        #[serde(rename = "distMean")]
        mean: f64,
        #[serde(rename = "distMax")]
        max: f64,
        #[serde(rename = "distSD")]
        sd: f64,
    },
    Production(ProductionScenario),
    CashFlow(CashFlowScenario),
    Npv(NpvScenario),
    Retention(RetentionScenario),
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Draw { .. }            => "draw",
            Self::Triangular { .. }      => "triangular",
            Self::Uniform { .. }         => "uniform",
            Self::Normal { .. }          => "normal",
            Self::TruncatedNormal { .. } => "truncated_normal",
            Self::Production(_)          => "production",
            Self::CashFlow(_)            => "cash_flow",
            Self::Npv(_)                 => "npv",
            Self::Retention(_)           => "retention",
        }
    }

    /// Run the request and serialize the report as the response body.
    pub fn dispatch(&self, engine: &SimEngine) -> SimResult<serde_json::Value> {
        log::debug!("dispatching {} request", self.name());
        let body = match *self {
            Self::Production(ref s) => serde_json::to_value(engine.run(s)?)?,
            Self::CashFlow(ref s)   => serde_json::to_value(engine.run(s)?)?,
            Self::Npv(ref s)        => serde_json::to_value(engine.run(s)?)?,
            Self::Retention(ref s)  => serde_json::to_value(engine.run(s)?)?,
            Self::Draw { min, mean, max, sd } => {
                draw(engine, DrawRequest::Inferred { min, mean, max, sd })?
            }
            Self::Triangular { min, mode, max } => {
                draw(engine, DrawRequest::Triangular { min, mode, max })?
            }
            Self::Uniform { min, max } => draw(engine, DrawRequest::Uniform { min, max })?,
            Self::Normal { mean, sd }  => draw(engine, DrawRequest::Normal { mean, sd })?,
            Self::TruncatedNormal { min, mean, max, sd } => {
                draw(engine, DrawRequest::TruncatedNormal { min, mean, max, sd })?
            }
        };
        Ok(body)
    }
}

fn draw(engine: &SimEngine, request: DrawRequest) -> SimResult<serde_json::Value> {
    Ok(serde_json::to_value(engine.draw(&request)?)?)
}

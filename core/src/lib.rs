//! Monte Carlo distribution inference and financial scenario engine.
//!
//! Parameters → classifier → sampler → per-trial payoff → statistics.
//! See `engine` for the call order and the determinism rules.

pub mod cancel;
pub mod cash_flow_scenario;
pub mod config;
pub mod distribution;
pub mod draw;
pub mod engine;
pub mod error;
pub mod finance;
pub mod npv_scenario;
pub mod production_scenario;
pub mod request;
pub mod retention_scenario;
pub mod rng;
pub mod sampler;
pub mod scenario;
pub mod stats;
pub mod types;

pub use engine::SimEngine;
pub use error::{SimError, SimResult};

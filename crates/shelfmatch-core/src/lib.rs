//! Shared domain types and configuration for the shelfmatch workspace.

mod app_config;
mod config;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{
    CandidateResult, FulfillmentFact, MatchedPattern, ReferenceProduct, RejectionReason,
    ResultRecord, SearchStrategy, ShipmentType, StrategyName, TextSource, ValidationOutcome,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

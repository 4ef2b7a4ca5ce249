pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;

pub use crate::adapters::GeminiClient;
pub use crate::config::AppConfig;
pub use crate::core::{
    normalizer::normalize,
    orchestrator::AnalysisOrchestrator,
    session::{AnalysisSession, SessionState, SubmitOutcome},
};
pub use crate::domain::model::{DetailLevel, Gender, MonthlyLuck, SajuResult, Topic, UserInput};
pub use crate::domain::ports::CompletionClient;
pub use crate::utils::error::{Result, SajuError};

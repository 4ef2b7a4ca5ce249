pub mod normalizer;
pub mod orchestrator;
pub mod prompt;
pub mod session;

pub use crate::domain::model::{MonthlyLuck, SajuResult, UserInput};
pub use crate::domain::ports::CompletionClient;
pub use crate::utils::error::Result;

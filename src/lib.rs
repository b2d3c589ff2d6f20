pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::ToolServiceCmd;
pub use config::toml_config::TomlConfig;
pub use crate::core::report::{count_proteins, summarize, REPORT_PROTEIN_LOCATORS};
pub use crate::core::runner::{write_outcome, ReportRunner};
pub use domain::model::{OutputFormat, ReportSummary, RunOutcome};
pub use utils::error::{Result, RunnerError};

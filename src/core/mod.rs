pub mod report;
pub mod runner;

pub use crate::domain::model::{Invocation, ReportRequest, ReportSummary, RunOutcome, ToolOutput};
pub use crate::domain::ports::{ConfigProvider, ReportSource};
pub use crate::utils::error::Result;

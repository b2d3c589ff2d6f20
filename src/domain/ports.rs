use crate::domain::model::{Invocation, OutputFormat, ToolOutput};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn connection_name(&self) -> &str;
    /// Explicit helper location; `None` means the default next to this executable.
    fn helper_path(&self) -> Option<&Path>;
    fn launcher(&self) -> Option<&str>;
    fn report_name(&self) -> Option<&str>;
    fn timeout(&self) -> Option<Duration>;
    fn output_format(&self) -> OutputFormat;
}

#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Run the helper, feed it `stdin`, and collect everything it writes.
    async fn execute(&self, invocation: &Invocation, stdin: &[u8]) -> Result<ToolOutput>;
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What the helper is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRequest {
    /// A view definition written to the helper's stdin.
    Definition(String),
    /// A report saved in Skyline under this name; stdin stays empty.
    Named(String),
}

impl ReportRequest {
    pub fn stdin_payload(&self) -> &[u8] {
        match self {
            ReportRequest::Definition(document) => document.as_bytes(),
            ReportRequest::Named(_) => &[],
        }
    }
}

/// A fully resolved helper command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program that runs the helper (e.g. `mono`); not part of [`Invocation::argv`].
    pub launcher: Option<String>,
    pub helper: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn with_launcher(mut self, launcher: Option<&str>) -> Self {
        self.launcher = launcher.map(str::to_string);
        self
    }

    /// The argument list as shown to the user: helper path first.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.helper.to_string_lossy().into_owned())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// The program actually executed.
    pub fn program(&self) -> String {
        match &self.launcher {
            Some(launcher) => launcher.clone(),
            None => self.helper.to_string_lossy().into_owned(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// `None` when the helper was terminated by a signal.
    pub exit_code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Bytes of helper output, newlines included.
    pub length: usize,
    /// Newline count minus one; negative for empty output.
    pub protein_count: i64,
    /// Data rows when the report parses as CSV.
    pub parsed_rows: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub command: Vec<String>,
    #[serde(flatten)]
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 2] = ["text", "json"];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

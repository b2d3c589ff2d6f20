pub mod toml_config;

use crate::utils::error::{Result, RunnerError};
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// The helper is a .NET assembly; the name is the same on every platform.
pub const HELPER_FILE_NAME: &str = "ToolServiceCmd.exe";

/// `<dir>/bin/ToolServiceCmd.exe`.
pub fn helper_path_in(dir: &Path) -> PathBuf {
    dir.join("bin").join(HELPER_FILE_NAME)
}

/// The helper installed next to the running executable.
pub fn resolve_default_helper_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()?.canonicalize()?;
    let dir = exe.parent().ok_or_else(|| RunnerError::ConfigError {
        message: format!("{} has no parent directory", exe.display()),
    })?;
    Ok(helper_path_in(dir))
}

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::TomlConfig;
    use crate::core::ConfigProvider;
    use crate::domain::model::OutputFormat;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_non_empty_string, validate_path, validate_positive_number, Validate,
    };
    use clap::Parser;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "count-proteins")]
    #[command(about = "Count the proteins in the open Skyline document through ToolServiceCmd")]
    pub struct CliConfig {
        /// Connection name Skyline hands to external tools
        pub connection_name: String,

        /// TOML file with helper and output settings
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// Helper executable (defaults to bin/ToolServiceCmd.exe next to this program)
        #[arg(long)]
        pub helper_path: Option<PathBuf>,

        /// Program used to start the helper, e.g. mono
        #[arg(long)]
        pub launcher: Option<String>,

        /// Fetch a report saved in Skyline instead of the built-in protein view
        #[arg(long)]
        pub report_name: Option<String>,

        /// Kill the helper if it runs longer than this
        #[arg(long)]
        pub timeout_seconds: Option<u64>,

        #[arg(long, value_enum)]
        pub format: Option<OutputFormat>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Fill settings not given on the command line from `file`.
        pub fn merge_file(&mut self, file: &TomlConfig) {
            if self.helper_path.is_none() {
                self.helper_path = file.helper.path.as_ref().map(PathBuf::from);
            }
            if self.launcher.is_none() {
                self.launcher = file.helper.launcher.clone();
            }
            if self.timeout_seconds.is_none() {
                self.timeout_seconds = file.helper.timeout_seconds;
            }
            if self.format.is_none() {
                self.format = file.output_format();
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn connection_name(&self) -> &str {
            &self.connection_name
        }

        fn helper_path(&self) -> Option<&Path> {
            self.helper_path.as_deref()
        }

        fn launcher(&self) -> Option<&str> {
            self.launcher.as_deref()
        }

        fn report_name(&self) -> Option<&str> {
            self.report_name.as_deref()
        }

        fn timeout(&self) -> Option<Duration> {
            self.timeout_seconds.map(Duration::from_secs)
        }

        fn output_format(&self) -> OutputFormat {
            self.format.unwrap_or_default()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(path) = &self.helper_path {
                validate_path("--helper-path", &path.to_string_lossy())?;
            }
            if let Some(launcher) = &self.launcher {
                validate_non_empty_string("--launcher", launcher)?;
            }
            if let Some(name) = &self.report_name {
                validate_non_empty_string("--report-name", name)?;
            }
            if let Some(seconds) = self.timeout_seconds {
                validate_positive_number("--timeout-seconds", seconds, 1)?;
            }
            Ok(())
        }
    }

}

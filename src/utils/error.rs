use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to spawn helper '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Helper did not finish within {seconds}s")]
    TimeoutError { seconds: u64 },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Process,
    System,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RunnerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RunnerError::ConfigError { .. }
            | RunnerError::ConfigValidationError { .. }
            | RunnerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RunnerError::SpawnError { .. } | RunnerError::TimeoutError { .. } => {
                ErrorCategory::Process
            }
            RunnerError::IoError(_) => ErrorCategory::System,
            RunnerError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RunnerError::TimeoutError { .. } => ErrorSeverity::Medium,
            RunnerError::ConfigError { .. }
            | RunnerError::ConfigValidationError { .. }
            | RunnerError::InvalidConfigValueError { .. }
            | RunnerError::SpawnError { .. }
            | RunnerError::SerializationError(_) => ErrorSeverity::High,
            RunnerError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Exit code the binary uses for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RunnerError::SpawnError { program, .. } => {
                format!("Could not start the report helper at {}", program)
            }
            RunnerError::TimeoutError { seconds } => {
                format!("The report helper was stopped after {} seconds", seconds)
            }
            RunnerError::ConfigError { message } => format!("Bad configuration: {}", message),
            RunnerError::ConfigValidationError { field, message } => {
                format!("Bad configuration in {}: {}", field, message)
            }
            RunnerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Bad value for {}: {}", field, reason)
            }
            RunnerError::IoError(e) => format!("I/O failure: {}", e),
            RunnerError::SerializationError(e) => format!("Could not render output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RunnerError::SpawnError { .. } => {
                "Check that ToolServiceCmd is installed under bin/ next to this program, or pass --helper-path"
            }
            RunnerError::TimeoutError { .. } => {
                "Make sure Skyline is running and the connection name is current, or raise --timeout-seconds"
            }
            RunnerError::ConfigError { .. }
            | RunnerError::ConfigValidationError { .. }
            | RunnerError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags and try again"
            }
            RunnerError::IoError(_) => "Check file permissions and available disk space",
            RunnerError::SerializationError(_) => "Try again with --format text",
        }
    }
}

pub type Result<T> = std::result::Result<T, RunnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_error_is_high_severity_process_error() {
        let err = RunnerError::SpawnError {
            program: "/missing/ToolServiceCmd".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };

        assert_eq!(err.category(), ErrorCategory::Process);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("/missing/ToolServiceCmd"));
    }

    #[test]
    fn test_timeout_maps_to_retry_exit_code() {
        let err = RunnerError::TimeoutError { seconds: 5 };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Helper did not finish within 5s");
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: RunnerError = std::io::Error::other("disk gone").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.exit_code(), 3);
    }
}

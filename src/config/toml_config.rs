use crate::domain::model::OutputFormat;
use crate::utils::error::{Result, RunnerError};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_positive_number, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub helper: HelperConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HelperConfig {
    pub path: Option<String>,
    pub launcher: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RunnerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.format.as_deref().and_then(OutputFormat::parse)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.helper.path {
            validate_path("helper.path", path)?;
        }
        if let Some(launcher) = &self.helper.launcher {
            validate_non_empty_string("helper.launcher", launcher)?;
        }
        if let Some(seconds) = self.helper.timeout_seconds {
            validate_positive_number("helper.timeout_seconds", seconds, 1)?;
        }
        if let Some(format) = &self.output.format {
            validate_one_of("output.format", format, &OutputFormat::NAMES)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[helper]
path = "/opt/skyline/bin/ToolServiceCmd.exe"
launcher = "mono"
timeout_seconds = 30

[output]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.helper.path.as_deref(),
            Some("/opt/skyline/bin/ToolServiceCmd.exe")
        );
        assert_eq!(config.helper.launcher.as_deref(), Some("mono"));
        assert_eq!(config.helper.timeout_seconds, Some(30));
        assert_eq!(config.output_format(), Some(OutputFormat::Json));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.helper.path.is_none());
        assert!(config.output_format().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COUNT_PROTEINS_TEST_HELPER_DIR", "/srv/skyline");

        let config = TomlConfig::from_toml_str(
            r#"
[helper]
path = "${COUNT_PROTEINS_TEST_HELPER_DIR}/bin/ToolServiceCmd.exe"
launcher = "${COUNT_PROTEINS_TEST_UNSET_LAUNCHER}"
"#,
        )
        .unwrap();

        assert_eq!(
            config.helper.path.as_deref(),
            Some("/srv/skyline/bin/ToolServiceCmd.exe")
        );
        assert_eq!(
            config.helper.launcher.as_deref(),
            Some("${COUNT_PROTEINS_TEST_UNSET_LAUNCHER}")
        );

        std::env::remove_var("COUNT_PROTEINS_TEST_HELPER_DIR");
    }

    #[test]
    fn test_config_validation() {
        let bad_format = TomlConfig::from_toml_str("[output]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());

        let zero_timeout = TomlConfig::from_toml_str("[helper]\ntimeout_seconds = 0\n").unwrap();
        assert!(zero_timeout.validate().is_err());

        let empty_path = TomlConfig::from_toml_str("[helper]\npath = \"\"\n").unwrap();
        assert!(empty_path.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[helper\npath = 1").unwrap_err();
        assert!(matches!(err, RunnerError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[helper]\nlauncher = \"mono\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.helper.launcher.as_deref(), Some("mono"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/nonexistent/count-proteins.toml").unwrap_err();
        assert!(matches!(err, RunnerError::IoError(_)));
    }
}

//! gradecalc configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Mode;

/// Top-level gradecalc configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradecalcConfig {
    /// Calculator used by `live` when no `--mode` is given.
    #[serde(default = "default_mode")]
    pub default_mode: Mode,
    /// Where exported reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// `chrono` format for the calculation date.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// `chrono` format for the calculation time.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_mode() -> Mode {
    Mode::Gpa
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./gradecalc-reports")
}
fn default_date_format() -> String {
    "%-m/%-d/%Y".to_string()
}
fn default_time_format() -> String {
    "%-I:%M:%S %p".to_string()
}

impl Default for GradecalcConfig {
    fn default() -> Self {
        Self {
            default_mode: default_mode(),
            output_dir: default_output_dir(),
            date_format: default_date_format(),
            time_format: default_time_format(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!(
            "{}{}{}",
            &result[..start],
            value,
            &result[start + end + 1..]
        );
        from = start + value.len();
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradecalc.toml` in the current directory
/// 2. `~/.config/gradecalc/config.toml`
///
/// `GRADECALC_OUTPUT_DIR` overrides `output_dir`.
pub fn load_config() -> Result<GradecalcConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradecalcConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradecalc.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradecalcConfig::default(),
    };

    if let Ok(dir) = std::env::var("GRADECALC_OUTPUT_DIR") {
        if !dir.is_empty() {
            config.output_dir = PathBuf::from(dir);
        }
    }

    Ok(config)
}

/// Parse config TOML and resolve `${VAR}` references in its string fields.
pub fn parse_config(content: &str) -> Result<GradecalcConfig> {
    let mut config: GradecalcConfig = toml::from_str(content)?;
    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));
    config.date_format = resolve_env_vars(&config.date_format);
    config.time_format = resolve_env_vars(&config.time_format);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradecalc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_GRADECALC_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_GRADECALC_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_GRADECALC_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        std::env::remove_var("_GRADECALC_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_GRADECALC_SELF_REF", "${_GRADECALC_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_GRADECALC_SELF_REF}/out"),
            "${_GRADECALC_SELF_REF}/out"
        );
        std::env::remove_var("_GRADECALC_SELF_REF");
    }

    #[test]
    fn resolve_env_vars_handles_several_references() {
        std::env::set_var("_GRADECALC_A", "a");
        std::env::set_var("_GRADECALC_B", "b");
        assert_eq!(resolve_env_vars("${_GRADECALC_A}-${_GRADECALC_B}"), "a-b");
        assert_eq!(resolve_env_vars("${_GRADECALC_A}-${unterminated"), "a-${unterminated");
        std::env::remove_var("_GRADECALC_A");
        std::env::remove_var("_GRADECALC_B");
    }

    #[test]
    fn default_config() {
        let config = GradecalcConfig::default();
        assert_eq!(config.default_mode, Mode::Gpa);
        assert_eq!(config.output_dir, PathBuf::from("./gradecalc-reports"));
        assert_eq!(config.date_format, "%-m/%-d/%Y");
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config("default_mode = \"cgpa\"\n").unwrap();
        assert_eq!(config.default_mode, Mode::Cgpa);
        assert_eq!(config.time_format, "%-I:%M:%S %p");
    }

    #[test]
    fn parse_config_resolves_env() {
        std::env::set_var("_GRADECALC_REPORT_ROOT", "/tmp/reports");
        let config = parse_config("output_dir = \"${_GRADECALC_REPORT_ROOT}/gpa\"\n").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports/gpa"));
        std::env::remove_var("_GRADECALC_REPORT_ROOT");
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradecalc.toml");
        std::fs::write(&path, "date_format = \"%Y-%m-%d\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.date_format, "%Y-%m-%d");
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(parse_config("default_mode = \"sgpa\"\n").is_err());
    }
}

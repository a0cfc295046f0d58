//! Effective configuration with provenance
//!
//! Records the merged configuration together with the sources that
//! contributed to it, so a grading summary can say which file was in force.

use chrono::{DateTime, Utc};
use grader_excerpt::ExcerptConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;

/// Schema version for effective_config
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "code-grader/effective_config@1";

/// Largest accepted context radius
const MAX_SAMPLE_RADIUS: usize = 1000;

/// Origin of a configuration source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Cli,
}

/// A contributing config source with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Typed grader settings read from the merged configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraderConfig {
    /// Root directory for environments
    pub data_root: PathBuf,
    /// Interpreter used to create environments
    pub python: String,
    /// Executables directory inside an environment
    pub scripts_dir: String,
    /// Excerpt extraction settings
    pub excerpt: ExcerptConfig,
}

impl Default for GraderConfig {
    fn default() -> Self {
        let defaults = BuiltinDefaults::default();
        Self {
            data_root: PathBuf::from(defaults.data_root),
            python: defaults.python,
            scripts_dir: defaults.scripts_dir,
            excerpt: defaults.excerpt,
        }
    }
}

impl GraderConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.python.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "python must not be empty".to_string(),
            ));
        }
        if self.scripts_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "scripts_dir must not be empty".to_string(),
            ));
        }

        let excerpt = &self.excerpt;
        if excerpt.sample_radius == 0 || excerpt.sample_radius > MAX_SAMPLE_RADIUS {
            return Err(ConfigError::ValidationError(format!(
                "excerpt.sample_radius must be in [1, {}]",
                MAX_SAMPLE_RADIUS
            )));
        }
        for (key, value) in [
            ("excerpt.marker_token", &excerpt.marker_token),
            ("excerpt.failure_prefix", &excerpt.failure_prefix),
            ("excerpt.separator", &excerpt.separator),
        ] {
            if value.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must not be empty",
                    key
                )));
            }
        }

        Ok(())
    }
}

/// Effective configuration with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub schema_version: u32,
    pub schema_id: String,

    /// When this config was computed
    pub created_at: DateTime<Utc>,

    /// The merged configuration object
    pub config: Value,

    /// Contributing sources in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveConfig {
    /// Build effective config from layers.
    ///
    /// A config file that does not exist is skipped; callers that require
    /// the file must check for it first.
    pub fn build(config_path: Option<&Path>, cli_overrides: Option<Value>) -> Result<Self, ConfigError> {
        let mut layers = vec![BuiltinDefaults::default().to_value()];
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        }];

        if let Some(path) = config_path {
            if path.exists() {
                let (value, digest) = Self::load_toml_file(path)?;
                layers.push(value);
                sources.push(ConfigSource {
                    origin: ConfigOrigin::File,
                    path: Some(path.to_string_lossy().to_string()),
                    digest: Some(digest),
                });
            }
        }

        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);
        Self::parse_settings(&merged)?.validate()?;

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            config: merged,
            sources,
        })
    }

    /// Typed settings for the grader.
    pub fn settings(&self) -> Result<GraderConfig, ConfigError> {
        Self::parse_settings(&self.config)
    }

    fn parse_settings(value: &Value) -> Result<GraderConfig, ConfigError> {
        serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::ParseError(format!("invalid configuration: {}", e)))
    }

    /// Load and parse a TOML file, returning the value and digest
    fn load_toml_file(path: &Path) -> Result<(Value, String), ConfigError> {
        let bytes = fs::read(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let digest = hex::encode(Sha256::digest(&bytes));

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;

        let table: toml::Value = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        Ok((Self::toml_to_json(table), digest))
    }

    fn toml_to_json(toml: toml::Value) -> Value {
        match toml {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Number(i.into()),
            toml::Value::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(arr) => Value::Array(arr.into_iter().map(Self::toml_to_json).collect()),
            toml::Value::Table(table) => Value::Object(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Self::toml_to_json(v)))
                    .collect(),
            ),
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Get a config value by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.config, |current, part| current.get(part))
    }

    /// Path of the config file that contributed, if any
    pub fn file_source(&self) -> Option<&ConfigSource> {
        self.sources.iter().find(|s| s.origin == ConfigOrigin::File)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

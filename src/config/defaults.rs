//! Built-in defaults (layer 1)

use grader_excerpt::ExcerptConfig;
use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Root under which environments live as `<language>/envs/<env>` (default: "data")
    pub data_root: String,

    /// Interpreter used to create new environments (default: "python3")
    pub python: String,

    /// Executables directory inside an environment ("Scripts" on Windows, "bin" elsewhere)
    pub scripts_dir: String,

    /// Excerpt extraction settings
    pub excerpt: ExcerptConfig,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            data_root: "data".to_string(),
            python: if cfg!(windows) { "python" } else { "python3" }.to_string(),
            scripts_dir: if cfg!(windows) { "Scripts" } else { "bin" }.to_string(),
            excerpt: ExcerptConfig::default(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "data_root": self.data_root,
            "python": self.python,
            "scripts_dir": self.scripts_dir,
            "excerpt": {
                "marker_token": self.excerpt.marker_token,
                "sample_radius": self.excerpt.sample_radius,
                "failure_prefix": self.excerpt.failure_prefix,
                "separator": self.excerpt.separator,
                "ellipsis": self.excerpt.ellipsis,
            }
        })
    }
}

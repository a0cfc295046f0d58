//! Grader configuration
//!
//! Configuration is merged from three layers, later layers winning:
//! 1. Built-in defaults
//! 2. Config file (grader.toml, or the path given with --config)
//! 3. CLI flags

mod defaults;
mod effective;
mod merge;

pub use defaults::BuiltinDefaults;
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig, GraderConfig};
pub use merge::{deep_merge, merge_layers};

/// Config file looked up in the working directory when --config is not given.
pub const DEFAULT_CONFIG_FILE: &str = "grader.toml";

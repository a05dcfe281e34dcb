//! Configuration utilities.

/// TOML configuration (`rival.toml`) with environment overrides.
pub mod toml_config;

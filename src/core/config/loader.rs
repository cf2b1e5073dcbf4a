#![allow(clippy::result_large_err)]

use super::{CopyConfig, CONFIG_FILE_NAME};
use crate::core::error::AppError;
use crate::core::types::{ErrorCategory, SinkKind};
use std::env;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from the working directory (./elementor-copy.toml)
    /// Environment variables override config file values
    /// A missing file falls back to defaults + env vars
    pub fn load_from_workspace(workspace_path: &Path) -> Result<CopyConfig, AppError> {
        let config_path = workspace_path.join(CONFIG_FILE_NAME);
        let config_file = Self::load_from_file(&config_path)?;
        Ok(Self::finish(config_file.unwrap_or_default()))
    }

    /// Load config from an explicit path, which must exist
    pub fn load_explicit(path: &Path) -> Result<CopyConfig, AppError> {
        let config = Self::load_from_file(path)?.ok_or_else(|| {
            AppError::new(
                ErrorCategory::ConfigurationError,
                format!("Config file {} does not exist", path.display()),
            )
        })?;
        Ok(Self::finish(config))
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<CopyConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: CopyConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigurationError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
        })?;

        Ok(Some(config))
    }

    fn finish(mut config: CopyConfig) -> CopyConfig {
        Self::apply_env_overrides(&mut config);
        config
    }

    /// Apply environment variable overrides to the configuration
    /// Unparseable values are ignored
    fn apply_env_overrides(config: &mut CopyConfig) {
        if let Ok(timeout) = env::var("ELEMENTOR_COPY_SOURCE_TIMEOUT") {
            if humantime::parse_duration(timeout.trim()).is_ok() {
                config.source.timeout = timeout.trim().to_string();
            }
        }

        if let Ok(user_agent) = env::var("ELEMENTOR_COPY_USER_AGENT") {
            if !user_agent.trim().is_empty() {
                config.source.user_agent = user_agent;
            }
        }

        if let Ok(sink) = env::var("ELEMENTOR_COPY_OUTPUT_SINK") {
            if let Ok(sink) = sink.parse::<SinkKind>() {
                config.output.sink = sink;
            }
        }

        if let Ok(command) = env::var("ELEMENTOR_COPY_CLIPBOARD_COMMAND") {
            if !command.trim().is_empty() {
                config.output.clipboard_command = Some(command);
            }
        }

        if let Ok(origin) = env::var("ELEMENTOR_COPY_SITE_ORIGIN") {
            config.site.origin = Some(origin);
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "ELEMENTOR_COPY_SOURCE_TIMEOUT - Override the template fetch timeout (default: 30s)",
            "ELEMENTOR_COPY_USER_AGENT - Override the HTTP user agent",
            "ELEMENTOR_COPY_OUTPUT_SINK - Override the default sink (clipboard/stdout)",
            "ELEMENTOR_COPY_CLIPBOARD_COMMAND - Override the clipboard command line",
            "ELEMENTOR_COPY_SITE_ORIGIN - Site origin used to derive siteurl",
        ]
    }
}

use crate::core::template::SiteContext;
use crate::core::types::SinkKind;
use serde::{Deserialize, Serialize};

pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;

pub const CONFIG_FILE_NAME: &str = "elementor-copy.toml";

/// Configuration loaded from elementor-copy.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CopyConfig {
    /// How templates are fetched
    #[serde(default)]
    pub source: SourceConfig,

    /// Where assembled templates are delivered
    #[serde(default)]
    pub output: OutputConfig,

    /// Deployment the templates are pasted into
    #[serde(default)]
    pub site: SiteConfig,
}

/// Source configuration for the HTTP client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    /// Request timeout, humantime syntax ("30s", "2m")
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// User agent sent with template requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OutputConfig {
    /// Default sink for `copy`
    #[serde(default)]
    pub sink: SinkKind,

    /// Clipboard command line; detected per platform when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clipboard_command: Option<String>,
}

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SiteConfig {
    /// Origin of the WordPress site, e.g. https://example.com; enables `siteurl`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

fn default_timeout() -> String {
    "30s".to_string()
}

fn default_user_agent() -> String {
    format!("elementor-copy/{}", crate::VERSION)
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl CopyConfig {
    /// Site context for the assembler, present only when an origin is configured.
    pub fn site_context(&self) -> Option<SiteContext> {
        self.site
            .origin
            .as_deref()
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(SiteContext::new)
    }
}

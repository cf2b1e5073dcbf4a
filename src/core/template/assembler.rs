use crate::core::template::normalizer::TemplateElement;
use serde::{Deserialize, Serialize};

pub const TEMPLATE_VERSION: &str = "0.4";
pub const TEMPLATE_TYPE: &str = "elementor";
pub const UNTITLED_TEMPLATE: &str = "Untitled Template";
pub const SITE_API_SUFFIX: &str = "/wp-json/";

/// Deployment context supplied by the caller; the core never looks it up itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContext {
    pub origin: String,
}

impl SiteContext {
    pub fn new<T: Into<String>>(origin: T) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// Origin with trailing slashes removed, followed by the REST API suffix.
    pub fn site_url(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), SITE_API_SUFFIX)
    }
}

/// The document handed to the page builder's paste handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledTemplate {
    pub version: String,
    pub title: String,
    #[serde(rename = "type")]
    pub template_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siteurl: Option<String>,
    pub elements: Vec<TemplateElement>,
}

/// Build the output document from normalized elements.
///
/// Title precedence: non-blank override, then the source document's own
/// non-blank title, then [`UNTITLED_TEMPLATE`]. The chosen title is emitted as given.
pub fn assemble(
    elements: Vec<TemplateElement>,
    title_override: Option<&str>,
    source_title: Option<&str>,
    site: Option<&SiteContext>,
) -> AssembledTemplate {
    let title = [title_override, source_title]
        .into_iter()
        .flatten()
        .find(|title| !title.trim().is_empty())
        .unwrap_or(UNTITLED_TEMPLATE)
        .to_string();

    AssembledTemplate {
        version: TEMPLATE_VERSION.to_string(),
        title,
        template_type: TEMPLATE_TYPE.to_string(),
        siteurl: site.map(SiteContext::site_url),
        elements,
    }
}

use crate::core::error::PipelineError;
use crate::core::template::shape::{
    check_depth, declared_children, declared_element_type, is_widget, missing_widget_type,
    CHILDREN_KEYS, ELEMENT_TYPE_KEYS,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_ELEMENT_TYPE: &str = "section";
pub const DEFAULT_WIDGET_TYPE: &str = "text-editor";

const RESERVED_KEYS: [&str; 3] = ["id", "settings", "widgetType"];

/// One node of an Elementor element tree, in the shape the page builder pastes.
///
/// Field names follow the Rust side; the serialized keys are Elementor's own
/// (`elType`, `widgetType`, `elements`). Keys the normalizer does not manage,
/// such as `isInner`, ride along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateElement {
    pub id: String,
    #[serde(rename = "elType")]
    pub element_type: String,
    pub settings: Map<String, Value>,
    #[serde(
        rename = "widgetType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub widget_type: Option<String>,
    #[serde(rename = "elements")]
    pub children: Vec<TemplateElement>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Normalize a raw element list using the thread-local RNG for generated ids.
pub fn normalize_elements(elements: &[Value]) -> Result<Vec<TemplateElement>, PipelineError> {
    normalize_elements_with_rng(elements, &mut rand::thread_rng())
}

/// Normalize a raw element list, drawing generated ids from `rng`.
///
/// Non-object entries are dropped. Ids are generated independently per element
/// with no collision check, so uniqueness across the document is not guaranteed.
/// Trees deeper than [`MAX_ELEMENT_DEPTH`] fail with `NestingTooDeep`.
///
/// [`MAX_ELEMENT_DEPTH`]: crate::core::template::shape::MAX_ELEMENT_DEPTH
pub fn normalize_elements_with_rng<R: Rng + ?Sized>(
    elements: &[Value],
    rng: &mut R,
) -> Result<Vec<TemplateElement>, PipelineError> {
    let mut normalized = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        if let Some(object) = element.as_object() {
            normalized.push(normalize_element(object, index, &index.to_string(), 1, rng)?);
        }
    }
    Ok(normalized)
}

fn normalize_element<R: Rng + ?Sized>(
    object: &Map<String, Value>,
    index: usize,
    path: &str,
    depth: usize,
    rng: &mut R,
) -> Result<TemplateElement, PipelineError> {
    check_depth(index, path, depth)?;
    let id = existing_id(object.get("id")).unwrap_or_else(|| generate_element_id(rng));

    let element_type = declared_element_type(object)
        .unwrap_or(DEFAULT_ELEMENT_TYPE)
        .to_string();

    let settings = match object.get("settings") {
        Some(Value::Object(settings)) => settings.clone(),
        _ => Map::new(),
    };

    let mut children = Vec::new();
    if let Some((key, raw_children)) = declared_children(object) {
        children.reserve(raw_children.len());
        for (child_index, child) in raw_children.iter().enumerate() {
            if let Some(child_object) = child.as_object() {
                let child_path = format!("{path}.{key}.{child_index}");
                children.push(normalize_element(
                    child_object,
                    index,
                    &child_path,
                    depth + 1,
                    rng,
                )?);
            }
        }
    }

    let widget_type = if is_widget(object) {
        if missing_widget_type(object) {
            return Err(PipelineError::InvalidWidgetElement {
                index,
                path: path.to_string(),
            });
        }
        Some(
            object
                .get("widgetType")
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .unwrap_or(DEFAULT_WIDGET_TYPE)
                .to_string(),
        )
    } else {
        None
    };

    let extra = object
        .iter()
        .filter(|(key, _)| !is_managed_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(TemplateElement {
        id,
        element_type,
        settings,
        widget_type,
        children,
        extra,
    })
}

fn is_managed_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key) || ELEMENT_TYPE_KEYS.contains(&key) || CHILDREN_KEYS.contains(&key)
}

fn existing_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        _ => None,
    }
}

/// Seven lowercase hex characters, the format Elementor itself uses for element ids.
pub fn generate_element_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:07x}", rng.gen_range(0..0x1000_0000u32))
}

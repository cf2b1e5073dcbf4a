use crate::core::error::PipelineError;
use serde_json::{Map, Value};

pub(crate) const WIDGET_TYPE: &str = "widget";
pub(crate) const ELEMENT_TYPE_KEYS: [&str; 2] = ["elType", "elementType"];
pub(crate) const CHILDREN_KEYS: [&str; 2] = ["elements", "children"];

/// Deepest element nesting accepted; a top-level element sits at depth 1.
///
/// Parsed text runs into `serde_json`'s own recursion limit well before this, so
/// in practice it only applies to trees handed in as [`RawTemplateInput::Inline`].
///
/// [`RawTemplateInput::Inline`]: crate::core::template::source::RawTemplateInput::Inline
pub const MAX_ELEMENT_DEPTH: usize = 128;

/// Narrowed view of a parsed JSON value at the validator boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Object(Map<String, Value>),
    Array(Vec<Value>),
    Scalar(Value),
    Null,
}

impl From<Value> for RawNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawNode::Null,
            Value::Object(map) => RawNode::Object(map),
            Value::Array(items) => RawNode::Array(items),
            scalar => RawNode::Scalar(scalar),
        }
    }
}

/// A template whose element list has been located and checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTemplate {
    /// Raw element entries, still un-normalized.
    pub elements: Vec<Value>,
    /// The document's own `title`, if it had a string one.
    pub source_title: Option<String>,
}

/// Locate the element list and enforce the structural invariants.
///
/// Lookup order is `content.elements` then `elements`; a bare top-level array
/// is taken as the element list itself. The widget invariant is checked over
/// the whole tree, not only the top level.
pub fn validate_shape(value: Value) -> Result<ValidatedTemplate, PipelineError> {
    let (elements, source_title) = match RawNode::from(value) {
        RawNode::Null => return Err(PipelineError::EmptyOrUndefined),
        RawNode::Scalar(_) => return Err(PipelineError::NotAnObject),
        RawNode::Array(items) => (items, None),
        RawNode::Object(mut root) => {
            let source_title = root
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string);
            (take_element_list(&mut root)?, source_title)
        }
    };

    check_widgets(&elements)?;

    Ok(ValidatedTemplate {
        elements,
        source_title,
    })
}

fn take_element_list(root: &mut Map<String, Value>) -> Result<Vec<Value>, PipelineError> {
    let located = root
        .get_mut("content")
        .and_then(Value::as_object_mut)
        .and_then(|content| content.remove("elements"))
        .filter(|value| !value.is_null())
        .or_else(|| root.remove("elements").filter(|value| !value.is_null()));

    match located.map(RawNode::from) {
        None => Err(PipelineError::MissingElementsArray),
        Some(RawNode::Array(items)) => Ok(items),
        Some(_) => Err(PipelineError::ElementsNotArray),
    }
}

/// Fail on the first widget element (depth first) that lacks a `widgetType`,
/// or on an element nested deeper than [`MAX_ELEMENT_DEPTH`].
pub fn check_widgets(elements: &[Value]) -> Result<(), PipelineError> {
    for (index, element) in elements.iter().enumerate() {
        check_widget_tree(element, index, &index.to_string(), 1)?;
    }
    Ok(())
}

fn check_widget_tree(
    element: &Value,
    index: usize,
    path: &str,
    depth: usize,
) -> Result<(), PipelineError> {
    let Some(object) = element.as_object() else {
        return Ok(());
    };
    check_depth(index, path, depth)?;

    if is_widget(object) && missing_widget_type(object) {
        return Err(PipelineError::InvalidWidgetElement {
            index,
            path: path.to_string(),
        });
    }

    if let Some((key, children)) = declared_children(object) {
        for (child_index, child) in children.iter().enumerate() {
            let child_path = format!("{path}.{key}.{child_index}");
            check_widget_tree(child, index, &child_path, depth + 1)?;
        }
    }
    Ok(())
}

pub(crate) fn check_depth(index: usize, path: &str, depth: usize) -> Result<(), PipelineError> {
    if depth > MAX_ELEMENT_DEPTH {
        return Err(PipelineError::NestingTooDeep {
            index,
            path: path.to_string(),
            max_depth: MAX_ELEMENT_DEPTH,
        });
    }
    Ok(())
}

/// Element type declared on a raw element, honoring both key spellings.
pub(crate) fn declared_element_type(object: &Map<String, Value>) -> Option<&str> {
    ELEMENT_TYPE_KEYS
        .iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
}

/// Child list declared on a raw element and the key it was found under.
pub(crate) fn declared_children(
    object: &Map<String, Value>,
) -> Option<(&'static str, &Vec<Value>)> {
    CHILDREN_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_array).map(|list| (*key, list)))
}

pub(crate) fn is_widget(object: &Map<String, Value>) -> bool {
    declared_element_type(object) == Some(WIDGET_TYPE)
}

pub(crate) fn missing_widget_type(object: &Map<String, Value>) -> bool {
    object.get("widgetType").map_or(true, Value::is_null)
}

use crate::core::types::{ErrorCategory, ErrorSeverity};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

/// Terminal failures of a single template pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("failed to fetch template: {0}")]
    FetchFailed(String),
    #[error("template is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("template data is empty or undefined")]
    EmptyOrUndefined,
    #[error("template data is not an object")]
    NotAnObject,
    #[error("template has no elements array (looked at content.elements and elements)")]
    MissingElementsArray,
    #[error("template elements field is not an array")]
    ElementsNotArray,
    #[error("widget element at index {index} ({path}) has no widgetType")]
    InvalidWidgetElement { index: usize, path: String },
    #[error("element at index {index} ({path}) is nested deeper than {max_depth} levels")]
    NestingTooDeep {
        index: usize,
        path: String,
        max_depth: usize,
    },
    #[error("failed to write template to output: {0}")]
    SinkWriteFailed(String),
}

/// Fieldless discriminant of [`PipelineError`], recorded as the terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineErrorKind {
    FetchFailed,
    InvalidJson,
    EmptyOrUndefined,
    NotAnObject,
    MissingElementsArray,
    ElementsNotArray,
    InvalidWidgetElement,
    NestingTooDeep,
    SinkWriteFailed,
}

impl PipelineError {
    pub fn kind(&self) -> PipelineErrorKind {
        match self {
            PipelineError::FetchFailed(_) => PipelineErrorKind::FetchFailed,
            PipelineError::InvalidJson(_) => PipelineErrorKind::InvalidJson,
            PipelineError::EmptyOrUndefined => PipelineErrorKind::EmptyOrUndefined,
            PipelineError::NotAnObject => PipelineErrorKind::NotAnObject,
            PipelineError::MissingElementsArray => PipelineErrorKind::MissingElementsArray,
            PipelineError::ElementsNotArray => PipelineErrorKind::ElementsNotArray,
            PipelineError::InvalidWidgetElement { .. } => PipelineErrorKind::InvalidWidgetElement,
            PipelineError::NestingTooDeep { .. } => PipelineErrorKind::NestingTooDeep,
            PipelineError::SinkWriteFailed(_) => PipelineErrorKind::SinkWriteFailed,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self.kind() {
            PipelineErrorKind::FetchFailed => ErrorCategory::FetchError,
            PipelineErrorKind::InvalidJson => ErrorCategory::ParseError,
            PipelineErrorKind::SinkWriteFailed => ErrorCategory::SinkError,
            _ => ErrorCategory::ValidationError,
        }
    }

    fn code(&self) -> &'static str {
        match self.kind() {
            PipelineErrorKind::FetchFailed => "TPL-FETCH-001",
            PipelineErrorKind::InvalidJson => "TPL-JSON-001",
            PipelineErrorKind::EmptyOrUndefined => "TPL-SHAPE-001",
            PipelineErrorKind::NotAnObject => "TPL-SHAPE-002",
            PipelineErrorKind::MissingElementsArray => "TPL-SHAPE-003",
            PipelineErrorKind::ElementsNotArray => "TPL-SHAPE-004",
            PipelineErrorKind::InvalidWidgetElement => "TPL-WIDGET-001",
            PipelineErrorKind::NestingTooDeep => "TPL-SHAPE-005",
            PipelineErrorKind::SinkWriteFailed => "TPL-SINK-001",
        }
    }

    fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            PipelineErrorKind::FetchFailed => "Check that the template URL or path is reachable",
            PipelineErrorKind::InvalidJson => "Re-export the template from Elementor",
            PipelineErrorKind::InvalidWidgetElement => {
                "Add a widgetType to the widget element or change its elType"
            }
            PipelineErrorKind::NestingTooDeep => "Flatten the element tree before copying it",
            PipelineErrorKind::SinkWriteFailed => {
                "Check the clipboard command or pick another output"
            }
            _ => "Make sure the file is an Elementor template export",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    pub context: HashMap<String, String>,
    pub recovery_suggestions: Vec<String>,
    pub occurred_at: DateTime<Utc>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        let severity = match category {
            ErrorCategory::Unknown => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        };
        AppError {
            category,
            severity,
            code: format!("ERR-{}", uuid::Uuid::new_v4()),
            message: message.into(),
            context: HashMap::new(),
            recovery_suggestions: vec![],
            occurred_at: Utc::now(),
            source: None,
        }
    }

    /// Attach a free-form location, such as the template source, under the `context` key.
    pub fn with_context<T: Into<String>>(mut self, context: T) -> Self {
        self.context.insert("context".to_string(), context.into());
        self
    }

    pub fn with_code<T: Into<String>>(mut self, code: T) -> Self {
        self.code = code.into();
        self
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    pub fn add_context(&mut self, key: &str, value: &str) {
        self.context.insert(key.to_string(), value.to_string());
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        if !self.context.is_empty() {
            write!(f, " (Context: {:?})", self.context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, "\nCaused by: {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        let mut error = AppError::new(e.category(), e.to_string()).with_code(e.code());
        error
            .recovery_suggestions
            .push(e.recovery_suggestion().to_string());
        match e {
            PipelineError::InvalidWidgetElement { index, ref path }
            | PipelineError::NestingTooDeep {
                index, ref path, ..
            } => {
                error.add_context("index", &index.to_string());
                error.add_context("path", path);
            }
            _ => {}
        }
        error
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError {
            category: ErrorCategory::InternalError,
            severity: ErrorSeverity::Error,
            code: "ANYHOW_ERROR".to_string(),
            message: e.to_string(),
            context: HashMap::new(),
            recovery_suggestions: vec!["Check the error details".to_string()],
            occurred_at: Utc::now(),
            source: Some(e),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError {
            category: ErrorCategory::IoError,
            severity: ErrorSeverity::Error,
            code: "IO_ERROR".to_string(),
            message: e.to_string(),
            context: HashMap::new(),
            recovery_suggestions: vec!["Check file permissions and paths".to_string()],
            occurred_at: Utc::now(),
            source: Some(anyhow::anyhow!(e)),
        }
    }
}

pub trait ErrorReporter {
    fn report_error(&self, error: &AppError);
    fn report_warning(&self, message: &str, context: Option<String>);
    fn report_info(&self, message: &str);
}

/// Writes diagnostics to stderr so stdout stays reserved for template output.
pub struct DefaultErrorReporter;

impl DefaultErrorReporter {
    pub fn new() -> Self {
        DefaultErrorReporter
    }
}

impl Default for DefaultErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorReporter for DefaultErrorReporter {
    fn report_error(&self, error: &AppError) {
        eprintln!("[ERROR] {}: {}", error.code, error.message);
        if !error.context.is_empty() {
            let mut keys: Vec<_> = error.context.iter().collect();
            keys.sort();
            for (key, value) in keys {
                eprintln!("  {}: {}", key, value);
            }
        }
        for suggestion in &error.recovery_suggestions {
            eprintln!("  Hint: {}", suggestion);
        }
        if let Some(ref source) = error.source {
            eprintln!("  Caused by: {}", source);
        }
    }

    fn report_warning(&self, message: &str, context: Option<String>) {
        eprintln!("[WARNING] {}", message);
        if let Some(ref ctx) = context {
            eprintln!("  Context: {}", ctx);
        }
    }

    fn report_info(&self, message: &str) {
        eprintln!("[INFO] {}", message);
    }
}

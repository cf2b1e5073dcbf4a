use elementor_copy::core::error::{
    AppError, DefaultErrorReporter, ErrorReporter, PipelineError, PipelineErrorKind,
};
use elementor_copy::core::types::{ErrorCategory, ErrorSeverity};
use std::collections::HashSet;

fn every_pipeline_error() -> Vec<PipelineError> {
    vec![
        PipelineError::FetchFailed("connection refused".to_string()),
        PipelineError::InvalidJson("expected value at line 1 column 1".to_string()),
        PipelineError::EmptyOrUndefined,
        PipelineError::NotAnObject,
        PipelineError::MissingElementsArray,
        PipelineError::ElementsNotArray,
        PipelineError::InvalidWidgetElement {
            index: 3,
            path: "3.elements.1".to_string(),
        },
        PipelineError::NestingTooDeep {
            index: 0,
            path: "0.elements.0".to_string(),
            max_depth: 1,
        },
        PipelineError::SinkWriteFailed("pbcopy exited with 1".to_string()),
    ]
}

#[test]
fn test_error_creation_all_categories() {
    let categories = vec![
        ErrorCategory::FetchError,
        ErrorCategory::ParseError,
        ErrorCategory::ValidationError,
        ErrorCategory::SinkError,
        ErrorCategory::ConfigurationError,
        ErrorCategory::IoError,
        ErrorCategory::InternalError,
        ErrorCategory::Unknown,
    ];

    for category in categories {
        let error = AppError::new(category, "test message");
        assert_eq!(error.category, category);
        assert_eq!(error.message, "test message");
        assert_eq!(error.context.len(), 0);
        assert_eq!(error.recovery_suggestions.len(), 0);
        assert!(error.occurred_at <= chrono::Utc::now());
        assert!(error.source.is_none());
    }
}

#[test]
fn test_error_severity_mapping() {
    assert_eq!(
        AppError::new(ErrorCategory::FetchError, "x").severity(),
        ErrorSeverity::Error
    );
    assert_eq!(
        AppError::new(ErrorCategory::Unknown, "x").severity(),
        ErrorSeverity::Info
    );
}

#[test]
fn test_every_pipeline_error_has_a_distinct_code() {
    let errors = every_pipeline_error();
    let codes: HashSet<String> = errors
        .iter()
        .cloned()
        .map(|e| AppError::from(e).code)
        .collect();
    assert_eq!(codes.len(), errors.len());
    assert!(codes.iter().all(|code| code.starts_with("TPL-")));
}

#[test]
fn test_pipeline_error_kinds_are_distinct() {
    let kinds: HashSet<PipelineErrorKind> =
        every_pipeline_error().iter().map(PipelineError::kind).collect();
    assert_eq!(kinds.len(), 9);
}

#[test]
fn test_pipeline_error_categories() {
    let expected = [
        ErrorCategory::FetchError,
        ErrorCategory::ParseError,
        ErrorCategory::ValidationError,
        ErrorCategory::ValidationError,
        ErrorCategory::ValidationError,
        ErrorCategory::ValidationError,
        ErrorCategory::ValidationError,
        ErrorCategory::ValidationError,
        ErrorCategory::SinkError,
    ];
    for (error, category) in every_pipeline_error().into_iter().zip(expected) {
        let app_error = AppError::from(error);
        assert_eq!(app_error.category, category, "{}", app_error.code);
        assert_eq!(app_error.recovery_suggestions.len(), 1);
    }
}

#[test]
fn test_pipeline_error_messages() {
    insta::assert_snapshot!(
        PipelineError::InvalidWidgetElement { index: 3, path: "3.elements.1".to_string() }.to_string(),
        @"widget element at index 3 (3.elements.1) has no widgetType"
    );
    insta::assert_snapshot!(
        PipelineError::MissingElementsArray.to_string(),
        @"template has no elements array (looked at content.elements and elements)"
    );
}

#[test]
fn test_error_display_includes_code_and_context() {
    let error = AppError::new(ErrorCategory::ConfigurationError, "bad origin")
        .with_code("CFG-001")
        .with_context("site.origin");

    let rendered = error.to_string();
    assert!(rendered.starts_with("[CFG-001] ConfigurationError: bad origin"));
    assert!(rendered.contains("site.origin"));
}

#[test]
fn test_error_from_anyhow_keeps_source() {
    let error = AppError::from(anyhow::anyhow!("runtime exploded"));
    assert_eq!(error.category, ErrorCategory::InternalError);
    assert_eq!(error.message, "runtime exploded");
    assert!(error.source.is_some());
}

#[test]
fn test_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let error = AppError::from(io);
    assert_eq!(error.category, ErrorCategory::IoError);
    assert!(error.message.contains("read-only"));
}

#[test]
fn test_app_error_converts_into_anyhow() {
    let result: anyhow::Result<()> = Err(AppError::from(PipelineError::NotAnObject).into());
    let recovered = result.unwrap_err().downcast::<AppError>().unwrap();
    assert_eq!(recovered.code, "TPL-SHAPE-002");
}

#[test]
fn test_reporter_handles_every_error() {
    let reporter = DefaultErrorReporter::new();
    for error in every_pipeline_error() {
        reporter.report_error(&AppError::from(error));
    }
    reporter.report_warning("clipboard slow", Some("xclip".to_string()));
    reporter.report_info("done");
}

pub mod config;
pub mod error;
pub mod template;
pub mod types;

pub use config::{ConfigLoader, ConfigValidator, CopyConfig};
pub use error::{AppError, DefaultErrorReporter, ErrorReporter, PipelineError, PipelineErrorKind};
pub use template::{RawTemplateInput, TemplatePipeline};
pub use types::*;

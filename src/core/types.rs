use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    FetchError,
    ParseError,
    ValidationError,
    SinkError,
    ConfigurationError,
    IoError,
    InternalError,
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
    Info,
    Debug,
}

/// Stages a single pipeline invocation moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    Reading,
    Parsing,
    Validating,
    Normalizing,
    Assembling,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Reading => "reading",
            PipelineStage::Parsing => "parsing",
            PipelineStage::Validating => "validating",
            PipelineStage::Normalizing => "normalizing",
            PipelineStage::Assembling => "assembling",
            PipelineStage::Writing => "writing",
        };
        f.write_str(name)
    }
}

/// Where the CLI delivers the assembled document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Clipboard,
    Stdout,
}

impl std::str::FromStr for SinkKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "clipboard" => Ok(SinkKind::Clipboard),
            "stdout" => Ok(SinkKind::Stdout),
            _ => Err(format!(
                "invalid output.sink '{}'; supported values are clipboard, stdout",
                value
            )),
        }
    }
}

impl std::fmt::Display for SinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkKind::Clipboard => write!(f, "clipboard"),
            SinkKind::Stdout => write!(f, "stdout"),
        }
    }
}

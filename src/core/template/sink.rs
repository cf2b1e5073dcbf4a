use crate::core::error::PipelineError;
use crate::core::template::assembler::AssembledTemplate;
use crate::utils::{FileUtils, PrettyJsonSerializer, Serializer};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Destination for the serialized template.
#[async_trait]
pub trait OutputSink: Send + Sync {
    fn name(&self) -> &'static str;
    async fn write(&self, text: &str) -> Result<(), PipelineError>;
}

/// Serialize the document as two-space-indented JSON.
pub fn serialize_template(template: &AssembledTemplate) -> Result<String, PipelineError> {
    PrettyJsonSerializer
        .serialize_to_string(template)
        .map_err(|err| PipelineError::SinkWriteFailed(format!("serialization failed: {:#}", err)))
}

/// Serialize once and hand the text to the sink exactly once.
pub async fn write_template(
    sink: &dyn OutputSink,
    template: &AssembledTemplate,
) -> Result<(), PipelineError> {
    let text = serialize_template(template)?;
    tracing::debug!(sink = sink.name(), bytes = text.len(), "writing template");
    sink.write(&text).await
}

/// Pipes the text into a clipboard utility such as `pbcopy` or `xclip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardSink {
    program: String,
    args: Vec<String>,
}

impl ClipboardSink {
    /// Parse a whitespace-separated command line such as `xclip -selection clipboard`.
    pub fn with_command(command: &str) -> Result<Self, PipelineError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or_else(|| {
            PipelineError::SinkWriteFailed("clipboard command is empty".to_string())
        })?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// The clipboard utility conventionally available on this platform.
    pub fn detect() -> Self {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("pbcopy", &[])
        } else if cfg!(windows) {
            ("clip", &[])
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            ("wl-copy", &[])
        } else {
            ("xclip", &["-selection", "clipboard"])
        };
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl OutputSink for ClipboardSink {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    /// Waits for the utility itself to exit, not for its output streams to close:
    /// `xclip` and `wl-copy` leave a daemon holding the selection.
    async fn write(&self, text: &str) -> Result<(), PipelineError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| {
                PipelineError::SinkWriteFailed(format!("failed to run `{}`: {}", self.program, err))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await.map_err(|err| {
                PipelineError::SinkWriteFailed(format!(
                    "failed to pipe template into `{}`: {}",
                    self.program, err
                ))
            })?;
            // Closing stdin is the end-of-input signal.
            drop(stdin);
        }

        let status = child.wait().await.map_err(|err| {
            PipelineError::SinkWriteFailed(format!("`{}` did not finish: {}", self.program, err))
        })?;

        if !status.success() {
            return Err(PipelineError::SinkWriteFailed(format!(
                "`{}` exited with {}",
                self.program, status
            )));
        }
        tracing::debug!(program = %self.program, "clipboard command finished");
        Ok(())
    }
}

pub struct StdoutSink;

#[async_trait]
impl OutputSink for StdoutSink {
    fn name(&self) -> &'static str {
        "stdout"
    }

    async fn write(&self, text: &str) -> Result<(), PipelineError> {
        let mut stdout = tokio::io::stdout();
        let result = async {
            stdout.write_all(text.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await
        }
        .await;
        result.map_err(|err| PipelineError::SinkWriteFailed(format!("stdout: {}", err)))
    }
}

#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl OutputSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn write(&self, text: &str) -> Result<(), PipelineError> {
        FileUtils::write_text(&self.path, text)
            .map_err(|err| PipelineError::SinkWriteFailed(format!("{:#}", err)))
    }
}

/// Keeps every write in memory; optionally rejects writes to exercise failure paths.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    writes: Arc<Mutex<Vec<String>>>,
    failure: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing<T: Into<String>>(reason: T) -> Self {
        Self {
            writes: Arc::default(),
            failure: Some(reason.into()),
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl OutputSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn write(&self, text: &str) -> Result<(), PipelineError> {
        if let Some(reason) = &self.failure {
            return Err(PipelineError::SinkWriteFailed(reason.clone()));
        }
        self.writes
            .lock()
            .map_err(|_| PipelineError::SinkWriteFailed("memory sink poisoned".to_string()))?
            .push(text.to_string());
        Ok(())
    }
}

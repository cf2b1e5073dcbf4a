use crate::{
    cli::args::{ConfigArgs, CopyArgs, NormalizeArgs, ValidateArgs, STDIN_SOURCE},
    core::{
        template::{
            sink::write_template, ClipboardSink, DefaultSourceReader, FileSink, OutputSink,
            StdoutSink,
        },
        AppError, ConfigLoader, ConfigValidator, CopyConfig, DefaultErrorReporter, ErrorCategory,
        ErrorReporter, PipelineError, RawTemplateInput, SinkKind, TemplatePipeline,
    },
    Result,
};
use std::{
    env,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::io::AsyncReadExt;

/// Handles `elementor-copy copy` by running the full pipeline into the selected sink.
pub async fn copy(args: CopyArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let sink = select_sink(args.stdout, args.output.clone(), &config)?;
    let sink_name = sink.name();
    let pipeline = build_pipeline(&config, sink)?;
    let input = read_input(&args.source).await?;

    pipeline
        .run(input, args.title.as_deref())
        .await
        .map_err(|e| source_error(e, &args.source))?;

    let reporter = DefaultErrorReporter;
    match (sink_name, &args.output) {
        ("clipboard", _) => reporter.report_info("Template copied to clipboard"),
        (_, Some(path)) => reporter.report_info(&format!("Template written to {}", path.display())),
        _ => {}
    }
    Ok(())
}

/// Handles `elementor-copy validate`: parse and shape checks only.
pub async fn validate(args: ValidateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let pipeline = build_pipeline(&config, Arc::new(StdoutSink))?;
    let input = read_input(&args.source).await?;

    let validated = pipeline
        .validate(input)
        .await
        .map_err(|e| source_error(e, &args.source))?;

    let count = validated.elements.len();
    println!(
        "Template is valid: {} top-level element{}",
        count,
        if count == 1 { "" } else { "s" }
    );
    if let Some(title) = validated.source_title.as_deref() {
        println!("Title: {}", title);
    }
    Ok(())
}

/// Handles `elementor-copy normalize`: prints or writes the document, never the clipboard.
pub async fn normalize(args: NormalizeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let sink: Arc<dyn OutputSink> = match &args.output {
        Some(path) => Arc::new(FileSink::new(path.clone())),
        None => Arc::new(StdoutSink),
    };
    let pipeline = build_pipeline(&config, sink.clone())?;
    let input = read_input(&args.source).await?;

    let document = pipeline
        .prepare(input, args.title.as_deref())
        .await
        .map_err(|e| source_error(e, &args.source))?;
    write_template(sink.as_ref(), &document)
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        title = %document.title,
        elements = document.elements.len(),
        "template normalized"
    );
    Ok(())
}

/// Handles `elementor-copy config` by printing the resolved configuration.
pub fn config(args: ConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let rendered = toml::to_string_pretty(&config).map_err(|e| {
        AppError::new(
            ErrorCategory::InternalError,
            format!("Failed to render configuration: {}", e),
        )
    })?;

    println!("{}", rendered.trim_end());
    println!();
    println!("Environment overrides:");
    for line in ConfigLoader::env_var_documentation() {
        println!("  {}", line);
    }
    Ok(())
}

/// Resolve configuration from `--config` or the working directory, then validate it.
fn load_config(explicit: Option<&Path>) -> std::result::Result<CopyConfig, AppError> {
    let config = match explicit {
        Some(path) => ConfigLoader::load_explicit(path)?,
        None => {
            let cwd = env::current_dir()?;
            ConfigLoader::load_from_workspace(&cwd)?
        }
    };
    ConfigValidator::validate(&config)?;
    Ok(config)
}

fn build_pipeline(
    config: &CopyConfig,
    sink: Arc<dyn OutputSink>,
) -> std::result::Result<TemplatePipeline, AppError> {
    let timeout = ConfigValidator::source_timeout(config)?;
    let reader = DefaultSourceReader::new(timeout, &config.source.user_agent)?;
    Ok(TemplatePipeline::new(Arc::new(reader), sink).with_site(config.site_context()))
}

/// Pick the sink for `copy`: flags first, then `output.sink` from config.
fn select_sink(
    stdout: bool,
    output: Option<PathBuf>,
    config: &CopyConfig,
) -> std::result::Result<Arc<dyn OutputSink>, AppError> {
    if let Some(path) = output {
        return Ok(Arc::new(FileSink::new(path)));
    }
    if stdout || config.output.sink == SinkKind::Stdout {
        return Ok(Arc::new(StdoutSink));
    }
    let clipboard = match config.output.clipboard_command.as_deref() {
        Some(command) => ClipboardSink::with_command(command)?,
        None => ClipboardSink::detect(),
    };
    tracing::debug!(program = clipboard.program(), "using clipboard command");
    Ok(Arc::new(clipboard))
}

/// Tag a pipeline failure with the template source it came from.
fn source_error(error: PipelineError, source: &str) -> AppError {
    let label = if source == STDIN_SOURCE { "stdin" } else { source };
    AppError::from(error).with_context(label)
}

async fn read_input(source: &str) -> std::result::Result<RawTemplateInput, AppError> {
    if source != STDIN_SOURCE {
        return Ok(RawTemplateInput::Location(source.to_string()));
    }
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read template from stdin: {}", e),
            )
            .with_context("stdin")
        })?;
    Ok(RawTemplateInput::Text(text))
}

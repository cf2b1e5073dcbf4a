use crate::core::error::{PipelineError, PipelineErrorKind};
use crate::core::template::assembler::{assemble, AssembledTemplate, SiteContext};
use crate::core::template::normalizer::normalize_elements;
use crate::core::template::parser::parse_with_recovery;
use crate::core::template::shape::{validate_shape, ValidatedTemplate};
use crate::core::template::sink::{write_template, OutputSink};
use crate::core::template::source::{RawTemplateInput, SourceReader};
use crate::core::types::PipelineStage;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Terminal state of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    Succeeded,
    Failed(PipelineErrorKind),
}

/// State of a single invocation. Stages only move forward and none is re-entered.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub id: Uuid,
    stage: PipelineStage,
    visited: Vec<PipelineStage>,
    outcome: Option<PipelineOutcome>,
}

impl PipelineRun {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            stage: PipelineStage::Idle,
            visited: vec![PipelineStage::Idle],
            outcome: None,
        }
    }

    fn enter(&mut self, stage: PipelineStage) {
        debug_assert!(stage > self.stage, "stage {stage} entered after {}", self.stage);
        tracing::debug!(from = %self.stage, to = %stage, "pipeline stage");
        self.stage = stage;
        self.visited.push(stage);
    }

    fn finish<T>(&mut self, result: &Result<T, PipelineError>) {
        let outcome = match result {
            Ok(_) => PipelineOutcome::Succeeded,
            Err(err) => PipelineOutcome::Failed(err.kind()),
        };
        match result {
            Ok(_) => tracing::info!(stage = %self.stage, "template pipeline succeeded"),
            Err(err) => tracing::warn!(stage = %self.stage, error = %err, "template pipeline failed"),
        }
        self.outcome = Some(outcome);
    }

    /// The last stage entered; for a failed run, the stage that failed.
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn visited(&self) -> &[PipelineStage] {
        &self.visited
    }

    pub fn outcome(&self) -> Option<PipelineOutcome> {
        self.outcome
    }
}

/// Reader → parser → validator → normalizer → assembler → sink.
///
/// Holds no mutable state between invocations; concurrent runs are independent.
#[derive(Clone)]
pub struct TemplatePipeline {
    reader: Arc<dyn SourceReader>,
    sink: Arc<dyn OutputSink>,
    site: Option<SiteContext>,
}

impl TemplatePipeline {
    pub fn new(reader: Arc<dyn SourceReader>, sink: Arc<dyn OutputSink>) -> Self {
        Self {
            reader,
            sink,
            site: None,
        }
    }

    pub fn with_site(mut self, site: Option<SiteContext>) -> Self {
        self.site = site;
        self
    }

    /// Run every stage and deliver the document to the sink.
    pub async fn run(
        &self,
        input: RawTemplateInput,
        title_override: Option<&str>,
    ) -> Result<(), PipelineError> {
        self.run_tracked(input, title_override).await.1
    }

    /// Like [`TemplatePipeline::run`], also returning the state machine of the invocation.
    pub async fn run_tracked(
        &self,
        input: RawTemplateInput,
        title_override: Option<&str>,
    ) -> (PipelineRun, Result<(), PipelineError>) {
        let mut run = PipelineRun::new();
        let span = tracing::info_span!("template_pipeline", run_id = %run.id);
        let result = async {
            let template = self.build(&mut run, input, title_override).await?;
            run.enter(PipelineStage::Writing);
            write_template(self.sink.as_ref(), &template).await
        }
        .instrument(span)
        .await;
        run.finish(&result);
        (run, result)
    }

    /// Run every stage except the sink write and return the assembled document.
    pub async fn prepare(
        &self,
        input: RawTemplateInput,
        title_override: Option<&str>,
    ) -> Result<AssembledTemplate, PipelineError> {
        let mut run = PipelineRun::new();
        let span = tracing::info_span!("template_pipeline", run_id = %run.id, dry_run = true);
        let result = self
            .build(&mut run, input, title_override)
            .instrument(span)
            .await;
        run.finish(&result);
        result
    }

    /// Read, parse and validate without normalizing or writing anything.
    pub async fn validate(
        &self,
        input: RawTemplateInput,
    ) -> Result<ValidatedTemplate, PipelineError> {
        let mut run = PipelineRun::new();
        let span = tracing::info_span!("template_pipeline", run_id = %run.id, dry_run = true);
        let result = self.read_validated(&mut run, input).instrument(span).await;
        run.finish(&result);
        result
    }

    async fn read_validated(
        &self,
        run: &mut PipelineRun,
        input: RawTemplateInput,
    ) -> Result<ValidatedTemplate, PipelineError> {
        let parsed = match input {
            RawTemplateInput::Inline(value) => value,
            RawTemplateInput::Text(text) => {
                run.enter(PipelineStage::Parsing);
                parse_with_recovery(&text)?
            }
            RawTemplateInput::Location(location) => {
                run.enter(PipelineStage::Reading);
                let text = self.reader.fetch_text(&location).await?;
                run.enter(PipelineStage::Parsing);
                parse_with_recovery(&text)?
            }
        };

        run.enter(PipelineStage::Validating);
        validate_shape(parsed)
    }

    async fn build(
        &self,
        run: &mut PipelineRun,
        input: RawTemplateInput,
        title_override: Option<&str>,
    ) -> Result<AssembledTemplate, PipelineError> {
        let validated = self.read_validated(run, input).await?;

        run.enter(PipelineStage::Normalizing);
        let elements = normalize_elements(&validated.elements)?;
        tracing::debug!(elements = elements.len(), "normalized template elements");

        run.enter(PipelineStage::Assembling);
        Ok(assemble(
            elements,
            title_override,
            validated.source_title.as_deref(),
            self.site.as_ref(),
        ))
    }
}

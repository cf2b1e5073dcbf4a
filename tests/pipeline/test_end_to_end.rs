use elementor_copy::core::template::{
    shape::MAX_ELEMENT_DEPTH, sink::serialize_template, DefaultSourceReader, MemorySink,
    PipelineOutcome, SiteContext, TemplatePipeline, UNTITLED_TEMPLATE,
};
use elementor_copy::core::{PipelineError, PipelineErrorKind, PipelineStage, RawTemplateInput};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .display()
        .to_string()
}

fn pipeline_with(sink: MemorySink) -> TemplatePipeline {
    let reader = DefaultSourceReader::new(Duration::from_secs(5), "elementor-copy-tests").unwrap();
    TemplatePipeline::new(Arc::new(reader), Arc::new(sink))
}

fn only_write(sink: &MemorySink) -> Value {
    let writes = sink.writes();
    assert_eq!(writes.len(), 1, "sink must receive exactly one write");
    serde_json::from_str(&writes[0]).unwrap()
}

fn is_element_id(id: &str) -> bool {
    id.len() == 7 && id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
}

#[tokio::test]
async fn test_heading_widget_with_title_override() {
    let sink = MemorySink::new();
    let pipeline = pipeline_with(sink.clone());

    pipeline
        .run(
            RawTemplateInput::Text(
                r#"{"content":{"elements":[{"elType":"widget","id":"a","settings":{},"widgetType":"heading"}]}}"#
                    .to_string(),
            ),
            Some("My Page"),
        )
        .await
        .unwrap();

    let writes = sink.writes();
    insta::assert_snapshot!(writes[0], @r###"
    {
      "version": "0.4",
      "title": "My Page",
      "type": "elementor",
      "elements": [
        {
          "id": "a",
          "elType": "widget",
          "settings": {},
          "widgetType": "heading",
          "elements": []
        }
      ]
    }
    "###);
}

#[tokio::test]
async fn test_minimal_template_gets_placeholder_title() {
    let sink = MemorySink::new();
    let pipeline = pipeline_with(sink.clone());

    pipeline
        .run(RawTemplateInput::Inline(json!({"elements": []})), None)
        .await
        .unwrap();

    let document = only_write(&sink);
    assert_eq!(document["title"], UNTITLED_TEMPLATE);
    assert_eq!(document["elements"], json!([]));
    assert!(document.get("siteurl").is_none());
}

#[tokio::test]
async fn test_exported_file_is_repaired() {
    let sink = MemorySink::new();
    let pipeline = pipeline_with(sink.clone());

    pipeline
        .run(RawTemplateInput::Location(fixture("hero_section.json")), None)
        .await
        .unwrap();

    let document = only_write(&sink);
    assert_eq!(document["title"], "Hero Section");
    assert_eq!(document["type"], "elementor");

    let section = &document["elements"][0];
    assert_eq!(section["id"], "5f1a2b3");
    assert_eq!(section["isInner"], false);
    assert!(section.get("widgetType").is_none());
    assert_eq!(section["settings"]["layout"], "full_width");

    let column = &section["elements"][0];
    assert!(is_element_id(column["id"].as_str().unwrap()));
    assert_eq!(column["settings"]["_column_size"], 100);

    let heading = &column["elements"][0];
    assert_eq!(heading["widgetType"], "heading");
    assert!(is_element_id(heading["id"].as_str().unwrap()));

    let text = &column["elements"][1];
    assert_eq!(text["id"], "9c0ffee");
    assert_eq!(text["widgetType"], "text-editor");
    assert_eq!(text["elements"], json!([]));
}

#[tokio::test]
async fn test_trailing_markup_is_salvaged() {
    let sink = MemorySink::new();
    let pipeline = pipeline_with(sink.clone());

    let (run, result) = pipeline
        .run_tracked(RawTemplateInput::Location(fixture("trailing_markup.txt")), None)
        .await;

    assert!(result.is_ok());
    assert_eq!(run.outcome(), Some(PipelineOutcome::Succeeded));
    let document = only_write(&sink);
    assert_eq!(document["title"], "Served by WordPress");
    assert_eq!(
        document["elements"][0]["settings"]["note"],
        "{ not a brace }"
    );
}

#[tokio::test]
async fn test_nested_widget_without_type_is_rejected() {
    let sink = MemorySink::new();
    let pipeline = pipeline_with(sink.clone());

    let (run, result) = pipeline
        .run_tracked(RawTemplateInput::Location(fixture("broken_widget.json")), None)
        .await;

    assert_eq!(
        result,
        Err(PipelineError::InvalidWidgetElement {
            index: 0,
            path: "0.elements.0.elements.0".to_string(),
        })
    );
    assert_eq!(run.stage(), PipelineStage::Validating);
    assert_eq!(
        run.outcome(),
        Some(PipelineOutcome::Failed(PipelineErrorKind::InvalidWidgetElement))
    );
    assert!(sink.writes().is_empty());
}

#[tokio::test]
async fn test_overly_deep_inline_tree_is_rejected() {
    let sink = MemorySink::new();
    let pipeline = pipeline_with(sink.clone());
    let mut element = json!({"elType": "container"});
    for _ in 0..MAX_ELEMENT_DEPTH {
        element = json!({"elType": "container", "elements": [element]});
    }

    let (run, result) = pipeline
        .run_tracked(RawTemplateInput::Inline(json!([element])), None)
        .await;

    assert_eq!(result.unwrap_err().kind(), PipelineErrorKind::NestingTooDeep);
    assert_eq!(run.stage(), PipelineStage::Validating);
    assert!(sink.writes().is_empty());
}

#[tokio::test]
async fn test_missing_file_fails_at_reading() {
    let sink = MemorySink::new();
    let pipeline = pipeline_with(sink.clone());

    let (run, result) = pipeline
        .run_tracked(RawTemplateInput::Location(fixture("no_such_template.json")), None)
        .await;

    assert_eq!(result.unwrap_err().kind(), PipelineErrorKind::FetchFailed);
    assert_eq!(run.stage(), PipelineStage::Reading);
    assert!(sink.writes().is_empty());
}

#[tokio::test]
async fn test_site_context_adds_siteurl() {
    let sink = MemorySink::new();
    let pipeline = pipeline_with(sink.clone())
        .with_site(Some(SiteContext::new("https://example.com/")));

    pipeline
        .run(RawTemplateInput::Inline(json!([])), Some("Landing"))
        .await
        .unwrap();

    let document = only_write(&sink);
    assert_eq!(document["siteurl"], "https://example.com/wp-json/");
    assert_eq!(document["title"], "Landing");
}

#[tokio::test]
async fn test_sink_failure_marks_run_failed() {
    let pipeline = pipeline_with(MemorySink::failing("xclip: no display"));

    let (run, result) = pipeline
        .run_tracked(RawTemplateInput::Inline(json!({"elements": []})), None)
        .await;

    let error = result.unwrap_err();
    assert_eq!(error.kind(), PipelineErrorKind::SinkWriteFailed);
    assert!(error.to_string().contains("xclip: no display"));
    assert_eq!(
        run.outcome(),
        Some(PipelineOutcome::Failed(PipelineErrorKind::SinkWriteFailed))
    );
}

#[tokio::test]
async fn test_prepare_matches_what_run_writes() {
    let sink = MemorySink::new();
    let pipeline = pipeline_with(sink.clone());
    let input = RawTemplateInput::Inline(json!({
        "title": "Stable",
        "elements": [{"id": "abc1234", "elType": "section", "settings": {"gap": "wide"}}]
    }));

    let prepared = pipeline.prepare(input.clone(), None).await.unwrap();
    pipeline.run(input, None).await.unwrap();

    assert_eq!(serialize_template(&prepared).unwrap(), sink.writes()[0]);
}

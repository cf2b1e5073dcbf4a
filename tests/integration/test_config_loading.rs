use elementor_copy::core::config::CONFIG_FILE_NAME;
use elementor_copy::core::{ConfigLoader, ConfigValidator, CopyConfig, ErrorCategory, SinkKind};
use serial_test::serial;
use std::env;
use std::time::Duration;
use tempfile::TempDir;

const ENV_VARS: [&str; 5] = [
    "ELEMENTOR_COPY_SOURCE_TIMEOUT",
    "ELEMENTOR_COPY_USER_AGENT",
    "ELEMENTOR_COPY_OUTPUT_SINK",
    "ELEMENTOR_COPY_CLIPBOARD_COMMAND",
    "ELEMENTOR_COPY_SITE_ORIGIN",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn workspace_with(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(CONFIG_FILE_NAME), config).unwrap();
    temp
}

#[test]
#[serial]
fn test_full_file_round_trips_into_pipeline_settings() {
    clear_env();
    let workspace = workspace_with(
        r#"
[source]
timeout = "45s"
user_agent = "studio-sync/2.0"

[output]
sink = "stdout"

[site]
origin = "https://studio.example.com/"
"#,
    );

    let config = ConfigLoader::load_from_workspace(workspace.path()).unwrap();
    ConfigValidator::validate(&config).unwrap();

    assert_eq!(
        ConfigValidator::source_timeout(&config).unwrap(),
        Duration::from_secs(45)
    );
    assert_eq!(config.source.user_agent, "studio-sync/2.0");
    assert_eq!(config.output.sink, SinkKind::Stdout);
    assert_eq!(
        config.site_context().unwrap().site_url(),
        "https://studio.example.com/wp-json/"
    );
}

#[test]
#[serial]
fn test_explicit_path_outside_workspace() {
    clear_env();
    let workspace = workspace_with("[output]\nsink = \"clipboard\"\n");
    let custom = workspace.path().join("ci.toml");
    std::fs::write(&custom, "[output]\nsink = \"stdout\"\n").unwrap();

    let config = ConfigLoader::load_explicit(&custom).unwrap();
    assert_eq!(config.output.sink, SinkKind::Stdout);
}

#[test]
#[serial]
fn test_unknown_sink_in_file_is_a_configuration_error() {
    clear_env();
    let workspace = workspace_with("[output]\nsink = \"printer\"\n");

    let error = ConfigLoader::load_from_workspace(workspace.path()).unwrap_err();
    assert_eq!(error.category, ErrorCategory::ConfigurationError);
    assert!(error.message.contains(CONFIG_FILE_NAME));
}

#[test]
#[serial]
fn test_env_overrides_every_field() {
    clear_env();
    let workspace = TempDir::new().unwrap();
    env::set_var("ELEMENTOR_COPY_SOURCE_TIMEOUT", "1m 30s");
    env::set_var("ELEMENTOR_COPY_USER_AGENT", "ci-bot");
    env::set_var("ELEMENTOR_COPY_OUTPUT_SINK", "STDOUT");
    env::set_var("ELEMENTOR_COPY_CLIPBOARD_COMMAND", "xsel --clipboard --input");
    env::set_var("ELEMENTOR_COPY_SITE_ORIGIN", "http://localhost:8080");

    let config = ConfigLoader::load_from_workspace(workspace.path()).unwrap();
    clear_env();

    assert_eq!(
        ConfigValidator::source_timeout(&config).unwrap(),
        Duration::from_secs(90)
    );
    assert_eq!(config.source.user_agent, "ci-bot");
    assert_eq!(config.output.sink, SinkKind::Stdout);
    assert_eq!(
        config.output.clipboard_command.as_deref(),
        Some("xsel --clipboard --input")
    );
    assert!(ConfigValidator::validate(&config).is_ok());
}

#[test]
#[serial]
fn test_blank_env_values_are_ignored() {
    clear_env();
    let workspace = workspace_with("[output]\nclipboard_command = \"pbcopy\"\n");
    env::set_var("ELEMENTOR_COPY_USER_AGENT", "   ");
    env::set_var("ELEMENTOR_COPY_CLIPBOARD_COMMAND", "");

    let config = ConfigLoader::load_from_workspace(workspace.path()).unwrap();
    clear_env();

    assert_eq!(config.source.user_agent, CopyConfig::default().source.user_agent);
    assert_eq!(config.output.clipboard_command.as_deref(), Some("pbcopy"));
}

#[test]
#[serial]
fn test_env_origin_must_still_validate() {
    clear_env();
    let workspace = TempDir::new().unwrap();
    env::set_var("ELEMENTOR_COPY_SITE_ORIGIN", "example.com");

    let config = ConfigLoader::load_from_workspace(workspace.path()).unwrap();
    clear_env();

    let error = ConfigValidator::validate(&config).unwrap_err();
    assert_eq!(error.category, ErrorCategory::ConfigurationError);
}

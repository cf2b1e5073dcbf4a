pub mod args;
pub mod commands;

pub use args::{ConfigArgs, CopyArgs, NormalizeArgs, ValidateArgs};
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
TEMPLATE COMMANDS:\n{subcommands}\n";

#[derive(Parser, Debug)]
#[command(name = "elementor-copy")]
#[command(version = crate::VERSION)]
#[command(about = "Normalize Elementor templates and copy them to the clipboard")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: validate a template, then copy it and paste it into the Elementor editor."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Normalize a template and copy it to the clipboard",
        long_about = "Copy reads a template from a URL, file, or stdin, repairs its element tree, and hands the paste-ready document to the clipboard (or the configured sink).",
        after_help = "Example:\n    elementor-copy copy https://example.com/templates/hero.json --title \"Hero\""
    )]
    Copy(CopyArgs),
    #[command(
        about = "Check that a template can be pasted",
        long_about = "Validate parses the template, checks its element list and every widget, and prints the number of top-level elements.",
        after_help = "Example:\n    elementor-copy validate ./hero.json"
    )]
    Validate(ValidateArgs),
    #[command(
        about = "Print the normalized template document",
        long_about = "Normalize runs the same stages as copy but prints the document (or writes it to --output) without touching the clipboard.",
        after_help = "Example:\n    elementor-copy normalize ./hero.json --output hero.fixed.json"
    )]
    Normalize(NormalizeArgs),
    #[command(
        about = "Show the resolved configuration",
        long_about = "Config prints the configuration after applying elementor-copy.toml and environment overrides, followed by the supported environment variables.",
        after_help = "Example:\n    elementor-copy config --config ./ci.toml"
    )]
    Config(ConfigArgs),
}

pub async fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Copy(copy_args) => commands::copy(copy_args).await,
        Command::Validate(validate_args) => commands::validate(validate_args).await,
        Command::Normalize(normalize_args) => commands::normalize(normalize_args).await,
        Command::Config(config_args) => commands::config(config_args),
    }
}

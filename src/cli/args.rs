use clap::Args;
use std::path::PathBuf;

/// Source argument meaning "read template text from stdin".
pub const STDIN_SOURCE: &str = "-";

#[derive(Args, Debug)]
pub struct CopyArgs {
    /// Template URL, file path, or `-` for stdin
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Title for the copied template (default: the source title or "Untitled Template")
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Print the document to stdout instead of the configured sink
    #[arg(long, conflicts_with = "output", help_heading = "Output Options")]
    pub stdout: bool,

    /// Write the document to a file instead of the configured sink
    #[arg(short, long, value_name = "FILE", help_heading = "Output Options")]
    pub output: Option<PathBuf>,

    /// Path to custom config file (default: ./elementor-copy.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Template URL, file path, or `-` for stdin
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Path to custom config file (default: ./elementor-copy.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Template URL, file path, or `-` for stdin
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Title for the normalized template
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Write the document to a file instead of stdout
    #[arg(short, long, value_name = "FILE", help_heading = "Output Options")]
    pub output: Option<PathBuf>,

    /// Path to custom config file (default: ./elementor-copy.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to custom config file (default: ./elementor-copy.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

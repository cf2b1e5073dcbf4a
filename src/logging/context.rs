use crate::cli::Command;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// The command prints human-readable status only.
    Interactive,
    /// The command may write a template document to stdout.
    DocumentOnStdout,
}

impl ExecutionContext {
    /// Returns `true` when stdout is reserved for the document.
    pub fn reserves_stdout(self) -> bool {
        matches!(self, ExecutionContext::DocumentOnStdout)
    }
}

/// Derive the active execution context from a parsed CLI command.
///
/// `copy` without `--output` may resolve to the stdout sink through
/// configuration, which is loaded after logging, so it always reserves stdout.
pub fn detect_context(command: &Command) -> ExecutionContext {
    match command {
        Command::Copy(args) if args.output.is_none() => ExecutionContext::DocumentOnStdout,
        Command::Normalize(args) if args.output.is_none() => ExecutionContext::DocumentOnStdout,
        Command::Copy(_) | Command::Normalize(_) | Command::Validate(_) | Command::Config(_) => {
            ExecutionContext::Interactive
        }
    }
}

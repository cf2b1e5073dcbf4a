use clap::Parser;
use elementor_copy::cli::{self, Args};
use elementor_copy::core::{AppError, DefaultErrorReporter, ErrorReporter};
use elementor_copy::logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let reporter = DefaultErrorReporter;

    // The command still runs when the log file cannot be opened.
    let _guard = match logging::init(&args.command) {
        Ok(guard) => Some(guard),
        Err(err) => {
            reporter.report_warning("logging disabled", Some(format!("{:#}", err)));
            None
        }
    };

    match cli::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let error = match err.downcast::<AppError>() {
                Ok(app_error) => app_error,
                Err(other) => AppError::from(other),
            };
            tracing::error!(code = %error.code, "command failed: {}", error.message);
            reporter.report_error(&error);
            ExitCode::FAILURE
        }
    }
}

use std::process::ExitCode;

use daily::DailyError;

fn main() -> ExitCode {
    daily::log::init();
    tracing::info!("daily starting");

    match daily::cli::run() {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            tracing::error!("{:#}", e);
            report(e);
            ExitCode::FAILURE
        }
    }
}

/// Known failures get a diagnostic with their remediation hint
fn report(err: anyhow::Error) {
    match err.downcast::<DailyError>() {
        Ok(known) => eprintln!("{:?}", miette::Report::new(known)),
        Err(other) => eprintln!("[ERROR] Error: {:#}", other),
    }
}

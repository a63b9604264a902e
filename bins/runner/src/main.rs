//! hrpay batch runner.
//!
//! Reads a JSON batch of employees, contracts and payslips, computes and
//! completes the payslips against the in-memory calendar and ledger, and
//! prints the result as JSON on stdout. Logs go to stderr.
//!
//! Usage: hrpay [BATCH_FILE]

mod batch;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hrpay_shared::{AppConfig, AppError};

use crate::batch::BatchInput;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("hrpay: {err}");
            return exit_code(&err);
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.runner.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = ?err, "Payroll run failed");
            err.downcast_ref::<AppError>()
                .map_or(ExitCode::FAILURE, exit_code)
        }
    }
}

fn run(config: &AppConfig) -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.runner.input_path.clone());
    info!(path = %path, "Reading payroll batch");

    let json = std::fs::read_to_string(&path)
        .map_err(|err| AppError::Io(format!("{path}: {err}")))
        .context("failed to read batch file")?;
    let input = BatchInput::parse(&json)?;
    let output = batch::run(input, config);

    info!(
        payslips = output.payslips.len(),
        ledger_entries = output.ledger_entries.len(),
        "Payroll run finished"
    );

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    writeln!(stdout)?;
    Ok(())
}

fn exit_code(err: &AppError) -> ExitCode {
    u8::try_from(err.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}

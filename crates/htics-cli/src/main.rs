//! htics CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use htics_cli::cli::{Cli, Command, ConfigAction};
use htics_cli::config::ExportConfig;
use htics_cli::error::{ExportError, ExportResult};
use htics_cli::{commands, export, write_calendar};
use htics_core::{CalendarEmitter, TracingConfig, init_tracing};
use htics_firestore::FirestoreClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ExportResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(ExportConfig::default_path);
    let config = if let Some(ref path) = cli.config {
        ExportConfig::load_from(path).map_err(ExportError::Config)?
    } else {
        ExportConfig::load().map_err(ExportError::Config)?
    };

    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
        None => {
            let firestore = config
                .firestore
                .to_firestore_config(cli.conference.as_deref())?;
            let client = FirestoreClient::new(firestore)?;
            let emitter = CalendarEmitter::new(config.calendar);

            let calendar = export(&client, &emitter).await?;
            write_calendar(&calendar, cli.output.as_deref())
        }
    }
}

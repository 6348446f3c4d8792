//! Sextant CLI - project lifecycle analysis from task data.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use sextant::analysis::Locale;
use sextant::cli::{self, Cli, Commands, ConfigCommands};
use sextant::commands::{self, Output};
use sextant::config::{OutputFormat, SextantConfig};
use tracing::warn;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let config = SextantConfig::load().unwrap_or_else(|e| {
        warn!("failed to load config: {e}");
        SextantConfig::default()
    });

    // Output format: -H flag > config file > JSON default
    let human = cli.human_readable || config.output_format == Some(OutputFormat::Human);

    // Locale: --locale flag / SX_LOCALE env > config file > English
    let locale = match cli.locale.as_deref() {
        Some(raw) => match raw.parse::<Locale>() {
            Ok(locale) => locale,
            Err(e) => {
                report_error(&sextant::Error::InvalidInput(e), human);
                process::exit(1);
            }
        },
        None => config.locale.unwrap_or_default(),
    };

    // Dataset path: --data flag / SX_DATA env > config file > ./sextant.json
    let data_path = cli
        .data_path
        .clone()
        .or_else(|| config.data_path.clone())
        .unwrap_or_else(|| PathBuf::from("sextant.json"));

    if let Err(e) = run_command(cli.command, &data_path, locale, human) {
        report_error(&e, human);
        process::exit(1);
    }
}

fn run_command(
    command: Option<Commands>,
    data_path: &Path,
    locale: Locale,
    human: bool,
) -> Result<(), sextant::Error> {
    match command {
        Some(Commands::Analyze { project_id }) => {
            let result = commands::analyze(data_path, &project_id, locale)?;
            output(&result, human);
        }

        Some(Commands::Phase { project_id }) => {
            let result = commands::phase(data_path, &project_id, locale)?;
            output(&result, human);
        }

        Some(Commands::Health { project_id }) => {
            let result = commands::health(data_path, &project_id, locale)?;
            output(&result, human);
        }

        Some(Commands::Metrics { project_id }) => {
            let result = commands::metrics(data_path, &project_id, locale)?;
            output(&result, human);
        }

        Some(Commands::Activity { project_id }) => {
            let result = commands::activity(data_path, &project_id, locale)?;
            output(&result, human);
        }

        Some(Commands::Projects) => {
            let result = commands::projects(data_path)?;
            output(&result, human);
        }

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Get { key } => {
                let result = commands::config_get(&key)?;
                output(&result, human);
            }
            ConfigCommands::Set { key, value } => {
                let result = commands::config_set(&key, &value)?;
                output(&result, human);
            }
            ConfigCommands::List => {
                let result = commands::config_list()?;
                output(&result, human);
            }
        },

        Some(Commands::BuildInfo) => {
            if human {
                println!("Version: {}", cli::package_version());
                println!("Commit:  {}", cli::git_commit());
                println!("Built:   {}", cli::build_timestamp());
            } else {
                let result = serde_json::json!({
                    "version": cli::package_version(),
                    "commit": cli::git_commit(),
                    "built": cli::build_timestamp(),
                });
                println!("{}", result);
            }
        }

        None => {
            // Default: summarize the dataset's projects
            let result = commands::projects(data_path)?;
            output(&result, human);
        }
    }

    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

/// Print an error to stderr in the selected format.
fn report_error(error: &sextant::Error, human: bool) {
    if human {
        eprintln!("Error: {}", error);
    } else {
        eprintln!("{}", serde_json::json!({ "error": error.to_string() }));
    }
}

/// Route tracing output to stderr, filtered by the SX_LOG env var.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("SX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

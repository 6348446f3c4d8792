//! CLI argument definitions for Sextant.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sextant - project lifecycle analysis from task data.
///
/// Point it at a JSON export of projects and tasks (`--data`, `SX_DATA`, or
/// the `data-path` config key) and it reports which lifecycle phase each
/// project is in, how healthy it looks, and who is actively working on it.
#[derive(Parser, Debug)]
#[command(name = "sx")]
#[command(author, version, about = "Infer project lifecycle phase, health, and trends from task data", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Path to the dataset JSON export (use '-' for stdin).
    /// Can also be set via the SX_DATA environment variable.
    #[arg(short = 'd', long = "data", global = true, env = "SX_DATA")]
    pub data_path: Option<PathBuf>,

    /// Locale for explanation text (en or es).
    /// Can also be set via the SX_LOCALE environment variable.
    #[arg(short = 'l', long = "locale", global = true, env = "SX_LOCALE")]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full lifecycle analysis for a project (start here!)
    ///
    /// Reports phase, confidence, health, progress, trend, estimated
    /// deployment date, active users, and a narrative explanation.
    Analyze {
        /// Project ID (e.g., p-1)
        project_id: String,
    },

    /// Lifecycle phase, confidence, and supporting reasons only
    Phase {
        /// Project ID
        project_id: String,
    },

    /// Health classification and trend
    Health {
        /// Project ID
        project_id: String,
    },

    /// Quantitative task metrics
    Metrics {
        /// Project ID
        project_id: String,
    },

    /// Who is actively working, and on what
    Activity {
        /// Project ID
        project_id: String,
    },

    /// List projects present in the dataset
    Projects,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show build version information
    BuildInfo,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Get a config value (output-format, locale, data-path)
    Get {
        /// Config key
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key
        key: String,

        /// New value
        value: String,
    },

    /// List all config values
    List,
}

/// Crate version baked in at compile time.
pub fn package_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Git commit the binary was built from.
pub fn git_commit() -> &'static str {
    env!("SX_GIT_COMMIT")
}

/// When the binary was built.
pub fn build_timestamp() -> &'static str {
    env!("SX_BUILD_TIMESTAMP")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_with_flags() {
        let cli = Cli::parse_from(["sx", "-H", "-d", "export.json", "analyze", "p-1"]);
        assert!(cli.human_readable);
        assert_eq!(cli.data_path, Some(PathBuf::from("export.json")));
        assert!(matches!(
            cli.command,
            Some(Commands::Analyze { project_id }) if project_id == "p-1"
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["sx", "phase", "p-1", "--locale", "es"]);
        assert_eq!(cli.locale.as_deref(), Some("es"));
    }
}

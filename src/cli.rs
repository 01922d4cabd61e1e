use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pricepoint", version, about = "Local service pricing benchmarks")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "pricepoint.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Interactive pricing session (default)
    Session {
        /// Accept the upgrade prompt without asking
        #[arg(long, conflicts_with = "no")]
        yes: bool,

        /// Decline the upgrade prompt without asking
        #[arg(long)]
        no: bool,
    },

    /// Fetch one benchmark and print it
    Benchmark {
        /// Service type, e.g. "Landscaping"
        service: String,

        /// 5-digit US ZIP code
        zip: String,

        /// Accept the Pro upgrade before rendering
        #[arg(long)]
        upgrade: bool,
    },

    /// Test configuration file validity
    Test,

    /// Show version information
    Version,
}

impl Cli {
    /// Get the command, defaulting to an interactive session
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Session {
            yes: false,
            no: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_session() {
        let cli = Cli::parse_from(["pricepoint"]);
        assert!(matches!(
            cli.get_command(),
            Commands::Session { yes: false, no: false }
        ));
        assert_eq!(cli.config, PathBuf::from("pricepoint.toml"));
    }

    #[test]
    fn test_benchmark_args() {
        let cli = Cli::parse_from(["pricepoint", "benchmark", "Landscaping", "90210", "--upgrade"]);
        match cli.get_command() {
            Commands::Benchmark { service, zip, upgrade } => {
                assert_eq!(service, "Landscaping");
                assert_eq!(zip, "90210");
                assert!(upgrade);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_yes_and_no_conflict() {
        assert!(Cli::try_parse_from(["pricepoint", "session", "--yes", "--no"]).is_err());
    }
}

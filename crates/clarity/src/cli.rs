use clap::{Args, Parser, Subcommand};
use clarity_core::ModeKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clarity")]
#[command(version)]
#[command(about = "Context-aware notification triage")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that runs a batch through the pipeline
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct BatchArgs {
    /// Force a context mode (deep-focus, in-meeting, available)
    #[arg(short, long)]
    pub mode: Option<ModeKind>,

    /// Skip the arrival and thinking delays
    #[arg(long)]
    pub instant: bool,

    /// Print lanes and stats as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Triage a random batch of sample notifications
    Simulate {
        /// Number of notifications in the batch
        #[arg(short, long, default_value_t = 5)]
        count: usize,

        /// Seed for reproducible batches
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Triage a random batch of sample emails
    Emails {
        /// Number of emails in the batch
        #[arg(short, long, default_value_t = 10)]
        count: usize,

        /// Seed for reproducible batches
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Triage message records (JSONL)
    Triage {
        /// Path to a JSONL file (reads stdin if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Score a single message
    Score {
        /// Subject line
        #[arg(short, long)]
        subject: String,

        /// Sender email address
        #[arg(long)]
        sender_address: Option<String>,

        /// Message is unread
        #[arg(long)]
        unread: bool,

        /// Message is flagged important
        #[arg(long)]
        important: bool,
    },

    /// List context modes and the one currently active
    Modes,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Print version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::try_parse_from(["clarity", "version"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Version));
    }

    #[test]
    fn test_cli_parse_simulate_defaults() {
        let cli = Cli::try_parse_from(["clarity", "simulate"]).unwrap();
        if let Commands::Simulate { count, seed, batch } = cli.command {
            assert_eq!(count, 5);
            assert_eq!(seed, None);
            assert_eq!(batch, BatchArgs::default());
        } else {
            panic!("Expected Simulate command");
        }
    }

    #[test]
    fn test_cli_parse_mode_alias() {
        let cli =
            Cli::try_parse_from(["clarity", "emails", "--mode", "meeting", "--instant"]).unwrap();
        if let Commands::Emails { count, batch, .. } = cli.command {
            assert_eq!(count, 10);
            assert_eq!(batch.mode, Some(ModeKind::InMeeting));
            assert!(batch.instant);
        } else {
            panic!("Expected Emails command");
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["clarity", "simulate", "--mode", "napping"]).is_err());
    }

    #[test]
    fn test_cli_parse_triage_file() {
        let cli = Cli::try_parse_from(["clarity", "triage", "--file", "inbox.jsonl"]).unwrap();
        if let Commands::Triage { file, .. } = cli.command {
            assert_eq!(file, Some(PathBuf::from("inbox.jsonl")));
        } else {
            panic!("Expected Triage command");
        }
    }

    #[test]
    fn test_cli_parse_score() {
        let cli = Cli::try_parse_from([
            "clarity",
            "score",
            "--subject",
            "Re: timeline",
            "--unread",
            "--important",
        ])
        .unwrap();
        if let Commands::Score {
            subject,
            sender_address,
            unread,
            important,
        } = cli.command
        {
            assert_eq!(subject, "Re: timeline");
            assert_eq!(sender_address, None);
            assert!(unread && important);
        } else {
            panic!("Expected Score command");
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["clarity", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: Some(ConfigAction::Init { force: true })
            }
        ));
    }
}

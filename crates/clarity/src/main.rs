mod cli;
mod commands;
mod config;
mod io;
mod paths;
mod samples;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the lane report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            count,
            seed,
            batch,
        } => commands::simulate::run(count, seed, &batch),
        Commands::Emails {
            count,
            seed,
            batch,
        } => commands::emails::run(count, seed, &batch),
        Commands::Triage { file, batch } => commands::triage::run(file.as_deref(), &batch),
        Commands::Score {
            subject,
            sender_address,
            unread,
            important,
        } => commands::score::run(&subject, sender_address.as_deref(), unread, important),
        Commands::Modes => commands::modes::run(),
        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => commands::config::run_show(),
            Some(ConfigAction::Init { force }) => commands::config::run_init(force),
        },
        Commands::Version => commands::version::run(),
    }
}

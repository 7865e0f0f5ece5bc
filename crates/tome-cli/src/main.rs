//! # tome CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Tome — campaign data toolchain for tabletop RPGs.
///
/// Validates campaign documents (NPC profiles, character profiles, party
/// rosters, item registries) against their schemas and reports every
/// violation found.
#[derive(Parser, Debug)]
#[command(name = "tome", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate campaign documents.
    Validate(tome_cli::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let all_valid = match cli.command {
        Commands::Validate(args) => tome_cli::validate::run(&args)?,
    };

    if !all_valid {
        std::process::exit(1);
    }
    Ok(())
}

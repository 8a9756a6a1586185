//! credhash CLI - Argon2id credential hashing and verification
//!
//! A thin command-line front end over `credhash-core`, useful for seeding
//! credentials, checking a secret against a stored record, and auditing the
//! cost parameters of existing records before a migration.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::AppContext;
use crate::cli::{Cli, Commands, ConfigSubcommand};
use crate::commands::{config as config_cmd, hash, inspect, misc, verify};
use crate::errors::exit_code_for;
use crate::ui::{print_error, UiContext};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        let ui = UiContext::from_env(cli.json, cli.quiet);
        print_error(&ui, &format!("{:#}", e));
        std::process::exit(exit_code_for(&e));
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Hash(args) => hash::handle_hash(&AppContext::new(cli)?, args),
        Commands::Verify(args) => verify::handle_verify(&AppContext::new(cli)?, args),
        Commands::Inspect(args) => inspect::handle_inspect(&AppContext::new(cli)?, args),
        Commands::Config { command } => {
            let ctx = AppContext::new(cli)?;
            match command {
                ConfigSubcommand::Init { force } => config_cmd::handle_config_init(&ctx, *force),
                ConfigSubcommand::Show => config_cmd::handle_config_show(&ctx),
            }
        }
        Commands::Completions { shell } => misc::handle_completions(*shell),
    }
}

/// Log to stderr. `--verbose` forces debug output for credhash itself;
/// otherwise `RUST_LOG` applies, defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("credhash=debug,credhash_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

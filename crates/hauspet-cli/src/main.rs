//! HausPet CLI: manage pet records against the HausPet backend, falling back
//! to a local mirror when the backend cannot be reached.

mod cli;
mod commands;
mod config;
mod error;
mod keyring_store;

use clap::Parser;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::common::open_repository;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::pets::{run_add, run_delete, run_list, run_show, run_update};
use crate::commands::records::{run_medical, run_medication, run_vaccination};
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;
use crate::keyring_store::KeyringStore;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let api_url = cli.api_url.as_deref();
    let data_dir = cli.data_dir.as_deref();

    let load_config = || CliConfig::load().map_err(CliError::Config);
    let repository = || open_repository(&load_config()?, api_url, data_dir);

    match cli.command {
        Commands::List { json } => run_list(&repository()?, json).await,
        Commands::Show { id, json } => run_show(&repository()?, &id, json).await,
        Commands::Add(args) => {
            let config = load_config()?;
            let repo = open_repository(&config, api_url, data_dir)?;
            run_add(&repo, args, config.plan).await
        }
        Commands::Update(args) => run_update(&repository()?, args).await,
        Commands::Delete { id } => run_delete(&repository()?, &id).await,
        Commands::Medical(args) => run_medical(&repository()?, args).await,
        Commands::Vaccination(args) => run_vaccination(&repository()?, args).await,
        Commands::Medication(args) => run_medication(&repository()?, args).await,
        Commands::Auth { command } => run_auth(command, &KeyringStore::default()),
        Commands::Config { command } => run_config(command, &default_config_path(), api_url),
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
    }
}

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "hauspet=info".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

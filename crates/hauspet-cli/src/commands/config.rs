use std::path::Path;

use hauspet_core::config::normalize_base_url;
use hauspet_core::ClientConfig;
use hauspet_core::models::SubscriptionPlan;

use crate::cli::ConfigCommands;
use crate::config::CliConfig;
use crate::error::CliError;

pub fn run_config(
    command: ConfigCommands,
    config_path: &Path,
    api_url_override: Option<&str>,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init { api_base_url, plan } => {
            let config = init_config(config_path, api_base_url, plan)?;
            println!("Saved config to {}", config_path.display());
            if let Some(url) = &config.api_base_url {
                println!("API base URL: {url}");
            }
            if let Some(plan) = config.plan {
                println!("Plan: {plan} (up to {} pets)", plan.max_pets());
            }
            Ok(())
        }
        ConfigCommands::Show => {
            let config = CliConfig::load_from_path(config_path).map_err(CliError::Config)?;
            println!("Config file: {}", config_path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
            let client_config =
                ClientConfig::resolve(api_url_override, config.api_base_url.as_deref())?;
            println!("Effective API base URL: {}", client_config.api_base_url());
            Ok(())
        }
    }
}

/// Merge the given values into the config at `config_path` and save it.
/// Values left out keep what the file already had.
pub fn init_config(
    config_path: &Path,
    api_base_url: Option<String>,
    plan: Option<SubscriptionPlan>,
) -> Result<CliConfig, CliError> {
    let mut config = CliConfig::load_from_path(config_path).map_err(CliError::Config)?;
    config.version = 1;
    if let Some(url) = api_base_url {
        config.api_base_url = Some(normalize_base_url(url)?);
    }
    if plan.is_some() {
        config.plan = plan;
    }

    config
        .save_to_path(config_path)
        .map_err(CliError::Config)?;
    Ok(config)
}

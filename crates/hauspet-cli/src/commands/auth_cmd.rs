use hauspet_core::storage::{SecureStore, USER_TOKEN_KEY};
use hauspet_core::util::normalize_text_option;

use crate::cli::AuthCommands;
use crate::error::CliError;

/// Manage the bearer token that every API request picks up from `store`.
pub fn run_auth<S: SecureStore>(command: AuthCommands, store: &S) -> Result<(), CliError> {
    match command {
        AuthCommands::Login { token } => {
            let token = normalize_text_option(Some(token)).ok_or(CliError::EmptyToken)?;
            store.set(USER_TOKEN_KEY, &token)?;
            println!("API token stored.");
        }
        AuthCommands::Status => {
            if store.get(USER_TOKEN_KEY)?.is_some() {
                println!("Signed in: an API token is stored.");
            } else {
                println!("Not signed in.");
            }
        }
        AuthCommands::Logout => {
            store.delete(USER_TOKEN_KEY)?;
            println!("API token removed.");
        }
    }
    Ok(())
}

use chrono::Utc;
use hauspet_core::models::SubscriptionPlan;
use hauspet_core::remote::PetRemote;
use hauspet_core::storage::SecureStore;
use hauspet_core::OfflinePetRepository;

use crate::cli::{AddArgs, UpdateArgs};
use crate::commands::common::{
    build_draft, build_patch, format_pet_details, format_pet_lines, normalize_pet_identifier,
    plan_limit_warning, report_origin, saved_suffix,
};
use crate::error::CliError;

pub async fn run_list<R: PetRemote, S: SecureStore>(
    repo: &OfflinePetRepository<R, S>,
    as_json: bool,
) -> Result<(), CliError> {
    let outcome = repo.list().await;
    report_origin(outcome.origin);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&outcome.value)?);
    } else if outcome.value.is_empty() {
        println!("No pets yet.");
    } else {
        for line in format_pet_lines(&outcome.value, Utc::now()) {
            println!("{line}");
        }
    }

    Ok(())
}

pub async fn run_show<R: PetRemote, S: SecureStore>(
    repo: &OfflinePetRepository<R, S>,
    id: &str,
    as_json: bool,
) -> Result<(), CliError> {
    let id = normalize_pet_identifier(id)?;
    let outcome = repo.get(&id).await;
    report_origin(outcome.origin);

    let pet = outcome.value.ok_or(CliError::PetNotFound(id))?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&pet)?);
    } else {
        for line in format_pet_details(&pet) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Create a pet and print its id. With a known plan, warns on stderr when the
/// account is already at its pet allowance; the pet is still created.
pub async fn run_add<R: PetRemote, S: SecureStore>(
    repo: &OfflinePetRepository<R, S>,
    args: AddArgs,
    plan: Option<SubscriptionPlan>,
) -> Result<(), CliError> {
    let draft = build_draft(args)?;

    if let Some(plan) = plan {
        let existing = repo.list().await.value.len();
        if let Some(warning) = plan_limit_warning(plan, existing) {
            eprintln!("Warning: {warning}");
        }
    }

    let outcome = repo.create(draft).await;
    println!("{}{}", outcome.value.id, saved_suffix(outcome.origin));
    Ok(())
}

pub async fn run_update<R: PetRemote, S: SecureStore>(
    repo: &OfflinePetRepository<R, S>,
    args: UpdateArgs,
) -> Result<(), CliError> {
    let id = normalize_pet_identifier(&args.id)?;
    let patch = build_patch(args)?;

    let outcome = repo.update(&id, patch).await;
    println!("{}{}", outcome.value.id, saved_suffix(outcome.origin));
    Ok(())
}

pub async fn run_delete<R: PetRemote, S: SecureStore>(
    repo: &OfflinePetRepository<R, S>,
    id: &str,
) -> Result<(), CliError> {
    let id = normalize_pet_identifier(id)?;

    let outcome = repo.delete(&id).await;
    println!("{id}{}", saved_suffix(outcome.origin));
    Ok(())
}

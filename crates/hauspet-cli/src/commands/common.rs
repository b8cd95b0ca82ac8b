use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use hauspet_core::models::{Pet, PetDraft, PetPatch, SubscriptionPlan};
use hauspet_core::remote::HttpPetService;
use hauspet_core::storage::{FileStore, LocalMirror};
use hauspet_core::util::normalize_text_option;
use hauspet_core::{OfflinePetRepository, Origin};

use crate::cli::{AddArgs, UpdateArgs};
use crate::config::{resolve_store_path, CliConfig};
use crate::error::CliError;
use crate::keyring_store::KeyringStore;

pub type CliRepository = OfflinePetRepository<HttpPetService<KeyringStore>, FileStore>;

/// Build the repository used by the pet commands: HTTP backend authenticated
/// from the keychain, mirror kept in a local store file.
pub fn open_repository(
    config: &CliConfig,
    api_url: Option<&str>,
    data_dir: Option<&Path>,
) -> Result<CliRepository, CliError> {
    let store_path = resolve_store_path(data_dir);
    tracing::debug!("Using local store {}", store_path.display());

    let service = HttpPetService::connect(
        api_url,
        config.api_base_url.as_deref(),
        KeyringStore::default(),
    )?;
    Ok(OfflinePetRepository::new(
        service,
        LocalMirror::new(FileStore::new(store_path)),
    ))
}

pub fn normalize_pet_identifier(id: &str) -> Result<String, CliError> {
    normalize_text_option(Some(id.to_string())).ok_or(CliError::EmptyPetId)
}

/// Tell the user on stderr that the backend could not be reached.
pub fn report_origin(origin: Origin) {
    if origin == Origin::Local {
        eprintln!("Backend unreachable; using data stored on this device.");
    }
}

pub fn saved_suffix(origin: Origin) -> &'static str {
    match origin {
        Origin::Remote => "",
        Origin::Local => " (saved offline)",
    }
}

pub fn date_to_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub fn date_or_today(date: Option<NaiveDate>, now: DateTime<Utc>) -> DateTime<Utc> {
    date.map_or(now, date_to_utc)
}

pub fn build_draft(args: AddArgs) -> Result<PetDraft, CliError> {
    let name = normalize_text_option(Some(args.name)).ok_or(CliError::EmptyPetName)?;
    let breed = args.breed.trim().to_string();

    Ok(PetDraft {
        gender: args.gender,
        age: args.age,
        weight: args.weight,
        color: args.color.trim().to_string(),
        avatar: normalize_text_option(args.avatar),
        microchip_id: normalize_text_option(args.microchip_id),
        collar_id: normalize_text_option(args.collar_id),
        owner_id: args.owner_id.trim().to_string(),
        ..PetDraft::new(name, args.species, breed)
    })
}

pub fn build_patch(args: UpdateArgs) -> Result<PetPatch, CliError> {
    let name = match args.name {
        Some(name) => Some(normalize_text_option(Some(name)).ok_or(CliError::EmptyPetName)?),
        None => None,
    };
    let avatar = if args.clear_avatar {
        Some(None)
    } else {
        args.avatar.map(|avatar| normalize_text_option(Some(avatar)))
    };

    let patch = PetPatch {
        name,
        breed: args.breed,
        species: args.species,
        gender: args.gender,
        age: args.age,
        weight: args.weight,
        color: args.color,
        avatar,
        microchip_id: args.microchip_id,
        collar_id: args.collar_id,
        owner_id: args.owner_id,
        ..PetPatch::default()
    };

    if patch.is_empty() {
        return Err(CliError::NothingToUpdate);
    }
    Ok(patch)
}

/// Warning shown when adding another pet would exceed the plan's allowance.
pub fn plan_limit_warning(plan: SubscriptionPlan, existing: usize) -> Option<String> {
    let limit = plan.max_pets();
    (existing >= limit).then(|| {
        format!(
            "The {plan} plan allows {limit} pet{}; you already have {existing}.",
            if limit == 1 { "" } else { "s" }
        )
    })
}

pub fn format_pet_lines(pets: &[Pet], now: DateTime<Utc>) -> Vec<String> {
    pets.iter()
        .map(|pet| {
            let short_id = pet.id.chars().take(14).collect::<String>();
            let name = truncate(&pet.name, 20);
            let breed = truncate(&pet.breed, 24);
            let relative_time = format_relative_time(pet.updated_at, now);
            format!(
                "{short_id:<14}  {name:<20}  {:<6}  {breed:<24}  {relative_time}",
                pet.species.as_str()
            )
        })
        .collect()
}

pub fn format_pet_details(pet: &Pet) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", pet.name, pet.id),
        format!("  species:   {}", pet.species),
        format!("  breed:     {}", pet.breed),
    ];
    if let Some(gender) = pet.gender {
        lines.push(format!("  gender:    {gender}"));
    }
    lines.push(format!("  age:       {}", pet.age));
    lines.push(format!("  weight:    {} kg", pet.weight));
    if !pet.color.is_empty() {
        lines.push(format!("  color:     {}", pet.color));
    }
    lines.push(format!("  avatar:    {}", pet.avatar_kind()));
    if let Some(microchip_id) = &pet.microchip_id {
        lines.push(format!("  microchip: {microchip_id}"));
    }
    if let Some(collar_id) = &pet.collar_id {
        lines.push(format!("  collar:    {collar_id}"));
    }

    if !pet.medical_history.is_empty() {
        lines.push("Medical history:".to_string());
        for record in &pet.medical_history {
            lines.push(format!(
                "  {}  {:<12}  {} at {}",
                format_date(record.date),
                record.kind.to_string(),
                record.veterinarian,
                record.clinic
            ));
        }
    }
    if !pet.vaccinations.is_empty() {
        lines.push("Vaccinations:".to_string());
        for vaccination in &pet.vaccinations {
            lines.push(format!(
                "  {}  {}  (expires {})",
                format_date(vaccination.date),
                vaccination.name,
                format_date(vaccination.expiry_date)
            ));
        }
    }
    if !pet.medications.is_empty() {
        lines.push("Medications:".to_string());
        for medication in &pet.medications {
            lines.push(format!(
                "  {}  {} {}{}",
                medication.name,
                medication.dosage,
                medication.frequency,
                if medication.is_active { "" } else { " (inactive)" }
            ));
        }
    }

    lines
}

fn format_date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let mut truncated = value
            .chars()
            .take(max_chars.saturating_sub(3))
            .collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = now.signed_duration_since(timestamp).num_minutes().max(0);
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        format!("{minutes}m ago")
    } else if days < 1 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else if days < 30 {
        format!("{}w ago", days / 7)
    } else if days < 365 {
        format!("{}mo ago", days / 30)
    } else {
        format!("{}y ago", days / 365)
    }
}

use chrono::Utc;
use hauspet_core::models::{MedicalRecordDraft, MedicationDraft, VaccinationDraft};
use hauspet_core::remote::PetRemote;
use hauspet_core::storage::SecureStore;
use hauspet_core::util::normalize_text_option;
use hauspet_core::OfflinePetRepository;

use crate::cli::{MedicalArgs, MedicationArgs, VaccinationArgs};
use crate::commands::common::{date_or_today, date_to_utc, normalize_pet_identifier, saved_suffix};
use crate::error::CliError;

pub fn medical_draft(args: MedicalArgs, pet_id: &str) -> MedicalRecordDraft {
    MedicalRecordDraft {
        pet_id: pet_id.to_string(),
        date: date_or_today(args.date, Utc::now()),
        kind: args.kind,
        veterinarian: args.veterinarian.trim().to_string(),
        clinic: args.clinic.trim().to_string(),
        diagnosis: normalize_text_option(args.diagnosis),
        treatment: normalize_text_option(args.treatment),
        notes: normalize_text_option(args.notes),
        documents: None,
        next_appointment: args.next_appointment.map(date_to_utc),
    }
}

pub fn vaccination_draft(args: VaccinationArgs) -> VaccinationDraft {
    VaccinationDraft {
        name: args.name.trim().to_string(),
        date: date_or_today(args.date, Utc::now()),
        expiry_date: args.expiry_date.map(date_to_utc),
        veterinarian: args.veterinarian.trim().to_string(),
        batch_number: normalize_text_option(args.batch_number),
        next_due: args.next_due.map(date_to_utc),
    }
}

pub fn medication_draft(args: MedicationArgs) -> MedicationDraft {
    MedicationDraft {
        name: args.name.trim().to_string(),
        dosage: args.dosage.trim().to_string(),
        frequency: args.frequency.trim().to_string(),
        start_date: date_or_today(args.start_date, Utc::now()),
        end_date: args.end_date.map(date_to_utc),
        instructions: args.instructions.trim().to_string(),
        veterinarian: args.veterinarian.trim().to_string(),
        is_active: Some(!args.inactive),
    }
}

pub async fn run_medical<R: PetRemote, S: SecureStore>(
    repo: &OfflinePetRepository<R, S>,
    args: MedicalArgs,
) -> Result<(), CliError> {
    let pet_id = normalize_pet_identifier(&args.pet_id)?;
    let draft = medical_draft(args, &pet_id);

    let outcome = repo.add_medical_record(&pet_id, draft).await;
    println!("{}{}", outcome.value.id, saved_suffix(outcome.origin));
    Ok(())
}

pub async fn run_vaccination<R: PetRemote, S: SecureStore>(
    repo: &OfflinePetRepository<R, S>,
    args: VaccinationArgs,
) -> Result<(), CliError> {
    let pet_id = normalize_pet_identifier(&args.pet_id)?;

    let outcome = repo.add_vaccination(&pet_id, vaccination_draft(args)).await;
    println!("{}{}", outcome.value.id, saved_suffix(outcome.origin));
    Ok(())
}

pub async fn run_medication<R: PetRemote, S: SecureStore>(
    repo: &OfflinePetRepository<R, S>,
    args: MedicationArgs,
) -> Result<(), CliError> {
    let pet_id = normalize_pet_identifier(&args.pet_id)?;

    let outcome = repo.add_medication(&pet_id, medication_draft(args)).await;
    println!("{}{}", outcome.value.id, saved_suffix(outcome.origin));
    Ok(())
}

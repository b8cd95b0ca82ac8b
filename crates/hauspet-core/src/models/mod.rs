//! Data models for HausPet

mod health;
mod local_id;
mod pet;
mod subscription;
mod wire;

pub use health::{
    MedicalRecord, MedicalRecordDraft, MedicalRecordType, Medication, MedicationDraft,
    Vaccination, VaccinationDraft,
};
pub use local_id::LocalId;
pub use pet::{Gender, Pet, PetDraft, PetPatch, Species};
pub use subscription::SubscriptionPlan;

//! Offline-aware pet repository.
//!
//! Every operation tries the remote service first. On success the result is
//! written through to the local mirror; on failure the mirror is read or
//! patched instead and a best-effort result is returned. Remote failures are
//! logged, never returned.

use chrono::Utc;

use crate::http::ApiError;
use crate::models::{
    LocalId, MedicalRecord, MedicalRecordDraft, Medication, MedicationDraft, Pet, PetDraft,
    PetPatch, Vaccination, VaccinationDraft,
};
use crate::remote::PetRemote;
use crate::storage::{LocalMirror, SecureStore};

/// Where an operation's result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The remote service answered and the mirror was updated from it.
    Remote,
    /// The remote call failed; the result was produced from the local mirror.
    Local,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Outcome<T> {
    const fn remote(value: T) -> Self {
        Self {
            value,
            origin: Origin::Remote,
        }
    }

    const fn local(value: T) -> Self {
        Self {
            value,
            origin: Origin::Local,
        }
    }

    pub fn is_local(&self) -> bool {
        self.origin == Origin::Local
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            origin: self.origin,
        }
    }
}

/// Pet CRUD that keeps working when the backend is unreachable.
///
/// Holds no state of its own: each call reads the mirror, modifies it in
/// memory, and writes the whole collection back. Concurrent mutations are not
/// coordinated; the last write wins.
#[derive(Clone)]
pub struct OfflinePetRepository<R, S: SecureStore> {
    remote: R,
    mirror: LocalMirror<S>,
}

impl<R: PetRemote, S: SecureStore> OfflinePetRepository<R, S> {
    pub const fn new(remote: R, mirror: LocalMirror<S>) -> Self {
        Self { remote, mirror }
    }

    pub const fn mirror(&self) -> &LocalMirror<S> {
        &self.mirror
    }

    /// Remote list, mirrored locally; the unmodified mirror when offline.
    pub async fn list(&self) -> Outcome<Vec<Pet>> {
        match self.remote.list().await {
            Ok(pets) => {
                self.mirror.write_all(&pets);
                Outcome::remote(pets)
            }
            Err(error) => {
                log_fallback("list", &error);
                Outcome::local(self.mirror.read_all())
            }
        }
    }

    /// Look up one pet by id through [`Self::list`].
    pub async fn get(&self, id: &str) -> Outcome<Option<Pet>> {
        self.list()
            .await
            .map(|pets| pets.into_iter().find(|pet| pet.id == id))
    }

    /// Create remotely, or synthesize a local record with a time-derived id.
    pub async fn create(&self, draft: PetDraft) -> Outcome<Pet> {
        match self.remote.create(&draft).await {
            Ok(created) => {
                let mut pets = self.mirror.read_all();
                upsert(&mut pets, created.clone());
                self.mirror.write_all(&pets);
                Outcome::remote(created)
            }
            Err(error) => {
                log_fallback("create", &error);
                let pet = draft.into_pet(LocalId::next(), Utc::now());
                let mut pets = self.mirror.read_all();
                pets.push(pet.clone());
                self.mirror.write_all(&pets);
                Outcome::local(pet)
            }
        }
    }

    /// Update remotely, or merge `patch` into the mirrored record. A pet that
    /// is not mirrored is synthesized from `id` and `patch`.
    pub async fn update(&self, id: &str, patch: PetPatch) -> Outcome<Pet> {
        match self.remote.update(id, &patch).await {
            Ok(updated) => {
                let mut pets = self.mirror.read_all();
                match pets.iter_mut().find(|pet| pet.id == id) {
                    Some(slot) => *slot = updated.clone(),
                    None => pets.push(updated.clone()),
                }
                self.mirror.write_all(&pets);
                Outcome::remote(updated)
            }
            Err(error) => {
                log_fallback("update", &error);
                let now = Utc::now();
                let mut pets = self.mirror.read_all();
                let merged = if let Some(slot) = pets.iter_mut().find(|pet| pet.id == id) {
                    slot.apply(patch);
                    slot.updated_at = now;
                    slot.clone()
                } else {
                    let synthesized = Pet::from_patch(id, patch, now);
                    pets.push(synthesized.clone());
                    synthesized
                };
                self.mirror.write_all(&pets);
                Outcome::local(merged)
            }
        }
    }

    /// Delete remotely if possible; the mirrored record is removed either way.
    pub async fn delete(&self, id: &str) -> Outcome<()> {
        let origin = match self.remote.delete(id).await {
            Ok(()) => Origin::Remote,
            Err(error) => {
                log_fallback("delete", &error);
                Origin::Local
            }
        };

        let mut pets = self.mirror.read_all();
        pets.retain(|pet| pet.id != id);
        self.mirror.write_all(&pets);

        Outcome { value: (), origin }
    }

    pub async fn add_medical_record(
        &self,
        pet_id: &str,
        mut draft: MedicalRecordDraft,
    ) -> Outcome<MedicalRecord> {
        if draft.pet_id.is_empty() {
            draft.pet_id = pet_id.to_string();
        }

        let outcome = match self.remote.add_medical_record(pet_id, &draft).await {
            Ok(record) => Outcome::remote(record),
            Err(error) => {
                log_fallback("add_medical_record", &error);
                Outcome::local(draft.into_record(LocalId::next()))
            }
        };
        let record = outcome.value.clone();
        self.append_to_pet(pet_id, |pet| pet.medical_history.push(record));
        outcome
    }

    pub async fn add_vaccination(
        &self,
        pet_id: &str,
        draft: VaccinationDraft,
    ) -> Outcome<Vaccination> {
        let outcome = match self.remote.add_vaccination(pet_id, &draft).await {
            Ok(vaccination) => Outcome::remote(vaccination),
            Err(error) => {
                log_fallback("add_vaccination", &error);
                Outcome::local(draft.into_vaccination(LocalId::next(), Utc::now()))
            }
        };
        let vaccination = outcome.value.clone();
        self.append_to_pet(pet_id, |pet| pet.vaccinations.push(vaccination));
        outcome
    }

    pub async fn add_medication(&self, pet_id: &str, draft: MedicationDraft) -> Outcome<Medication> {
        let outcome = match self.remote.add_medication(pet_id, &draft).await {
            Ok(medication) => Outcome::remote(medication),
            Err(error) => {
                log_fallback("add_medication", &error);
                Outcome::local(draft.into_medication(LocalId::next()))
            }
        };
        let medication = outcome.value.clone();
        self.append_to_pet(pet_id, |pet| pet.medications.push(medication));
        outcome
    }

    fn append_to_pet(&self, pet_id: &str, append: impl FnOnce(&mut Pet)) {
        let mut pets = self.mirror.read_all();
        if let Some(pet) = pets.iter_mut().find(|pet| pet.id == pet_id) {
            append(pet);
            self.mirror.write_all(&pets);
        } else {
            tracing::debug!("Pet {} is not mirrored locally; entry not cached", pet_id);
        }
    }
}

fn upsert(pets: &mut Vec<Pet>, pet: Pet) {
    match pets.iter_mut().find(|existing| existing.id == pet.id) {
        Some(slot) => *slot = pet,
        None => pets.push(pet),
    }
}

fn log_fallback(operation: &str, error: &ApiError) {
    tracing::warn!(
        "Remote pet {} failed, falling back to local mirror: {}",
        operation,
        error
    );
}

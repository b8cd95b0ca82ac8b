//! Remote pet service: thin wrappers over the pets REST endpoints.

use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{ApiClient, ApiResult};
use crate::models::{
    MedicalRecord, MedicalRecordDraft, Medication, MedicationDraft, Pet, PetDraft, PetPatch,
    Vaccination, VaccinationDraft,
};
use crate::storage::SecureStore;

pub const PETS_ENDPOINT: &str = "/api/v1/pets";

/// Authoritative pet backend as seen by the repository.
#[allow(async_fn_in_trait)]
pub trait PetRemote {
    async fn list(&self) -> ApiResult<Vec<Pet>>;

    async fn create(&self, draft: &PetDraft) -> ApiResult<Pet>;

    async fn update(&self, id: &str, patch: &PetPatch) -> ApiResult<Pet>;

    async fn delete(&self, id: &str) -> ApiResult<()>;

    async fn add_medical_record(
        &self,
        pet_id: &str,
        draft: &MedicalRecordDraft,
    ) -> ApiResult<MedicalRecord>;

    async fn add_vaccination(&self, pet_id: &str, draft: &VaccinationDraft)
        -> ApiResult<Vaccination>;

    async fn add_medication(&self, pet_id: &str, draft: &MedicationDraft) -> ApiResult<Medication>;
}

#[derive(Debug, Deserialize)]
struct PetEnvelope {
    pet: Pet,
}

/// `PetRemote` over HTTP.
#[derive(Clone)]
pub struct HttpPetService<C: SecureStore> {
    api: ApiClient<C>,
}

impl<C: SecureStore> HttpPetService<C> {
    pub const fn new(api: ApiClient<C>) -> Self {
        Self { api }
    }

    /// Service for the API located by [`ClientConfig::resolve`], with the
    /// default retry policy.
    pub fn connect(
        explicit_url: Option<&str>,
        configured_url: Option<&str>,
        credentials: C,
    ) -> Result<Self> {
        let config = ClientConfig::resolve(explicit_url, configured_url)?;
        tracing::debug!("Using pets API at {}", config.api_base_url());
        Ok(Self::new(ApiClient::new(config, credentials)?))
    }
}

/// `/api/v1/pets/<id>` with the id percent-encoded.
pub fn pet_path(id: &str) -> String {
    format!("{PETS_ENDPOINT}/{}", urlencoding::encode(id))
}

fn pet_subpath(id: &str, collection: &str) -> String {
    format!("{}/{collection}", pet_path(id))
}

impl<C: SecureStore> PetRemote for HttpPetService<C> {
    async fn list(&self) -> ApiResult<Vec<Pet>> {
        self.api.get(PETS_ENDPOINT).await
    }

    async fn create(&self, draft: &PetDraft) -> ApiResult<Pet> {
        let envelope: PetEnvelope = self.api.post(PETS_ENDPOINT, draft).await?;
        Ok(envelope.pet)
    }

    async fn update(&self, id: &str, patch: &PetPatch) -> ApiResult<Pet> {
        let envelope: PetEnvelope = self.api.put(&pet_path(id), patch).await?;
        Ok(envelope.pet)
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.api.delete(&pet_path(id)).await
    }

    async fn add_medical_record(
        &self,
        pet_id: &str,
        draft: &MedicalRecordDraft,
    ) -> ApiResult<MedicalRecord> {
        self.api.post(&pet_subpath(pet_id, "medical"), draft).await
    }

    async fn add_vaccination(
        &self,
        pet_id: &str,
        draft: &VaccinationDraft,
    ) -> ApiResult<Vaccination> {
        self.api
            .post(&pet_subpath(pet_id, "vaccinations"), draft)
            .await
    }

    async fn add_medication(&self, pet_id: &str, draft: &MedicationDraft) -> ApiResult<Medication> {
        self.api
            .post(&pet_subpath(pet_id, "medications"), draft)
            .await
    }
}

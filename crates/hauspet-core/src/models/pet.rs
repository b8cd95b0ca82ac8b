//! Pet model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::health::{MedicalRecord, Medication, Vaccination};
use super::wire::{deserialize_present, null_as_default, string_or_number_id};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
    #[default]
    Other,
}

impl Species {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
            Self::Other => "other",
        }
    }
}

impl Species {
    /// Lenient mapping for labels read from the backend or the mirror.
    /// Unrecognized kinds are kept as [`Species::Other`].
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Self::Other)
    }
}

impl<'de> Deserialize<'de> for Species {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map_or(Self::Other, |label| Self::from_label(&label)))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dog" => Ok(Self::Dog),
            "cat" => Ok(Self::Cat),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown species '{other}' (expected dog, cat or other)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "male",
            Self::Female => "female",
        })
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(format!("unknown gender '{other}' (expected male or female)")),
        }
    }
}

/// One monitored animal, as stored remotely and mirrored on the device.
///
/// Every field has a default so records synthesized from an id and a partial
/// update still deserialize. Fields this client does not model are kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pet {
    /// Remote-issued or locally synthesized identifier; never changes.
    #[serde(deserialize_with = "string_or_number_id")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub breed: String,
    pub species: Species,
    pub gender: Option<Gender>,
    #[serde(deserialize_with = "null_as_default")]
    pub age: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub weight: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub color: String,
    /// Image URI or a generated-avatar descriptor string.
    pub avatar: Option<String>,
    pub microchip_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub medical_history: Vec<MedicalRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub vaccinations: Vec<Vaccination>,
    #[serde(deserialize_with = "null_as_default")]
    pub medications: Vec<Medication>,
    pub collar_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Pet {
    /// Build a record carrying exactly `id` and the fields present in `patch`.
    pub fn from_patch(id: impl Into<String>, patch: PetPatch, now: DateTime<Utc>) -> Self {
        let mut pet = Self {
            id: id.into(),
            created_at: now,
            updated_at: now,
            ..Self::default()
        };
        pet.apply(patch);
        pet
    }

    /// Overwrite the fields present in `patch`, leaving everything else as is.
    ///
    /// Timestamps are not touched; callers stamp `updated_at` themselves.
    pub fn apply(&mut self, patch: PetPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(breed) = patch.breed {
            self.breed = breed;
        }
        if let Some(species) = patch.species {
            self.species = species;
        }
        if let Some(gender) = patch.gender {
            self.gender = Some(gender);
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(microchip_id) = patch.microchip_id {
            self.microchip_id = Some(microchip_id);
        }
        if let Some(medical_history) = patch.medical_history {
            self.medical_history = medical_history;
        }
        if let Some(vaccinations) = patch.vaccinations {
            self.vaccinations = vaccinations;
        }
        if let Some(medications) = patch.medications {
            self.medications = medications;
        }
        if let Some(collar_id) = patch.collar_id {
            self.collar_id = Some(collar_id);
        }
        if let Some(owner_id) = patch.owner_id {
            self.owner_id = owner_id;
        }
    }

    /// Display label for the avatar: a URI, a generated descriptor, or none.
    pub fn avatar_kind(&self) -> &'static str {
        match self.avatar.as_deref() {
            None => "none",
            Some(value) if value.contains("://") || value.starts_with("data:") => "image",
            Some(_) => "generated",
        }
    }
}

/// Fields accepted when creating a pet; identifier and timestamps are assigned
/// by whoever stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetDraft {
    pub name: String,
    pub breed: String,
    pub species: Species,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub age: f64,
    pub weight: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microchip_id: Option<String>,
    pub medical_history: Vec<MedicalRecord>,
    pub vaccinations: Vec<Vaccination>,
    pub medications: Vec<Medication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collar_id: Option<String>,
    pub owner_id: String,
}

impl PetDraft {
    pub fn new(name: impl Into<String>, species: Species, breed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species,
            breed: breed.into(),
            ..Self::default()
        }
    }

    /// Turn the draft into a stored record with the given id and timestamps.
    pub fn into_pet(self, id: impl Into<String>, now: DateTime<Utc>) -> Pet {
        Pet {
            id: id.into(),
            name: self.name,
            breed: self.breed,
            species: self.species,
            gender: self.gender,
            age: self.age,
            weight: self.weight,
            color: self.color,
            avatar: self.avatar,
            microchip_id: self.microchip_id,
            medical_history: self.medical_history,
            vaccinations: self.vaccinations,
            medications: self.medications,
            collar_id: self.collar_id,
            owner_id: self.owner_id,
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        }
    }
}

/// A partial update. Absent fields are omitted from the wire payload and left
/// untouched when merged locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<Species>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// `Some(None)` clears the avatar and is sent as `null`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub avatar: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microchip_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<Vec<MedicalRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccinations: Option<Vec<Vaccination>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<Medication>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collar_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

impl PetPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
    }

    fn sample_pet() -> Pet {
        PetDraft {
            gender: Some(Gender::Female),
            age: 4.0,
            weight: 27.5,
            color: "golden".to_string(),
            owner_id: "owner-1".to_string(),
            ..PetDraft::new("Maple", Species::Dog, "Golden Retriever")
        }
        .into_pet("pet-1", fixed_time())
    }

    #[test]
    fn pet_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_pet()).unwrap();
        assert_eq!(json["ownerId"], "owner-1");
        assert_eq!(json["species"], "dog");
        assert_eq!(json["gender"], "female");
        assert!(json.get("medicalHistory").is_some());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn pet_preserves_unknown_fields() {
        let raw = r#"{
            "id": "42",
            "name": "Miso",
            "species": "cat",
            "emergencyVet": { "name": "Dr. Reyes" }
        }"#;
        let pet: Pet = serde_json::from_str(raw).unwrap();
        assert_eq!(pet.id, "42");
        assert_eq!(pet.species, Species::Cat);
        assert!(pet.medications.is_empty());

        let back = serde_json::to_value(&pet).unwrap();
        assert_eq!(back["emergencyVet"]["name"], "Dr. Reyes");
    }

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut pet = sample_pet();
        pet.apply(PetPatch {
            name: Some("Maple II".to_string()),
            weight: Some(29.0),
            ..PetPatch::default()
        });

        assert_eq!(pet.name, "Maple II");
        assert_eq!(pet.weight, 29.0);
        assert_eq!(pet.breed, "Golden Retriever");
        assert_eq!(pet.color, "golden");
        assert_eq!(pet.age, 4.0);
        assert_eq!(pet.gender, Some(Gender::Female));
    }

    #[test]
    fn patch_can_clear_avatar() {
        let mut pet = sample_pet();
        pet.avatar = Some("https://cdn.hauspet.net/maple.png".to_string());
        assert_eq!(pet.avatar_kind(), "image");

        pet.apply(PetPatch {
            avatar: Some(None),
            ..PetPatch::default()
        });
        assert_eq!(pet.avatar, None);
        assert_eq!(pet.avatar_kind(), "none");
    }

    #[test]
    fn patch_serialization_omits_absent_fields() {
        let patch = PetPatch {
            age: Some(5.0),
            avatar: Some(None),
            ..PetPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "age": 5.0, "avatar": null }));

        let parsed: PetPatch = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, patch);

        let without_avatar: PetPatch = serde_json::from_str(r#"{"age": 5.0}"#).unwrap();
        assert_eq!(without_avatar.avatar, None);
    }

    #[test]
    fn from_patch_carries_only_id_and_patch_fields() {
        let pet = Pet::from_patch(
            "ghost",
            PetPatch {
                name: Some("Pepper".to_string()),
                ..PetPatch::default()
            },
            fixed_time(),
        );
        assert_eq!(pet.id, "ghost");
        assert_eq!(pet.name, "Pepper");
        assert_eq!(pet.breed, "");
        assert_eq!(pet.species, Species::Other);
        assert_eq!(pet.created_at, fixed_time());
        assert_eq!(pet.updated_at, fixed_time());
    }

    #[test]
    fn pet_decodes_legacy_backend_payload() {
        let raw = r#"{"id": 7, "name": "Rex", "species": "Rabbit", "breed": null, "age": null, "weight": null}"#;
        let pet: Pet = serde_json::from_str(raw).unwrap();
        assert_eq!(pet.id, "7");
        assert_eq!(pet.name, "Rex");
        assert_eq!(pet.species, Species::Other);
        assert_eq!(pet.breed, "");
        assert_eq!(pet.age, 0.0);
        assert_eq!(pet.weight, 0.0);
        assert!(pet.extra.is_empty());
    }

    #[test]
    fn species_decoding_is_case_insensitive_and_lenient() {
        let decoded: Vec<Species> =
            serde_json::from_str(r#"["DOG", "Cat", "hamster", null]"#).unwrap();
        assert_eq!(
            decoded,
            vec![Species::Dog, Species::Cat, Species::Other, Species::Other]
        );
    }

    #[test]
    fn species_and_gender_parse() {
        assert_eq!("Dog".parse::<Species>(), Ok(Species::Dog));
        assert_eq!(" female ".parse::<Gender>(), Ok(Gender::Female));
        assert!("lizard".parse::<Species>().is_err());
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(PetPatch::default().is_empty());
        assert!(!PetPatch {
            color: Some("black".to_string()),
            ..PetPatch::default()
        }
        .is_empty());
    }
}

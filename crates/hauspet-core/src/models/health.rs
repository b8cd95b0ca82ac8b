//! Append-only health sub-collections attached to a pet.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire::string_or_number_id;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicalRecordType {
    #[default]
    Checkup,
    Emergency,
    Surgery,
    Test,
    Prescription,
}

impl fmt::Display for MedicalRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Checkup => "checkup",
            Self::Emergency => "emergency",
            Self::Surgery => "surgery",
            Self::Test => "test",
            Self::Prescription => "prescription",
        })
    }
}

impl FromStr for MedicalRecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checkup" => Ok(Self::Checkup),
            "emergency" => Ok(Self::Emergency),
            "surgery" => Ok(Self::Surgery),
            "test" => Ok(Self::Test),
            "prescription" => Ok(Self::Prescription),
            other => Err(format!("unknown medical record type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MedicalRecord {
    #[serde(deserialize_with = "string_or_number_id")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number_id")]
    pub pet_id: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MedicalRecordType,
    pub veterinarian: String,
    pub clinic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_appointment: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MedicalRecordDraft {
    pub pet_id: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MedicalRecordType,
    pub veterinarian: String,
    pub clinic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_appointment: Option<DateTime<Utc>>,
}

impl MedicalRecordDraft {
    pub fn into_record(self, id: impl Into<String>) -> MedicalRecord {
        MedicalRecord {
            id: id.into(),
            pet_id: self.pet_id,
            date: self.date,
            kind: self.kind,
            veterinarian: self.veterinarian,
            clinic: self.clinic,
            diagnosis: self.diagnosis,
            treatment: self.treatment,
            notes: self.notes,
            documents: self.documents,
            next_appointment: self.next_appointment,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vaccination {
    #[serde(deserialize_with = "string_or_number_id")]
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub veterinarian: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VaccinationDraft {
    pub name: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub veterinarian: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due: Option<DateTime<Utc>>,
}

impl VaccinationDraft {
    /// Build the stored entry; a missing expiry date becomes `now`.
    pub fn into_vaccination(self, id: impl Into<String>, now: DateTime<Utc>) -> Vaccination {
        Vaccination {
            id: id.into(),
            name: self.name,
            date: self.date,
            expiry_date: self.expiry_date.unwrap_or(now),
            veterinarian: self.veterinarian,
            batch_number: self.batch_number,
            next_due: self.next_due,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Medication {
    #[serde(deserialize_with = "string_or_number_id")]
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub instructions: String,
    pub veterinarian: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MedicationDraft {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub instructions: String,
    pub veterinarian: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl MedicationDraft {
    /// Build the stored entry; medications are active unless stated otherwise.
    pub fn into_medication(self, id: impl Into<String>) -> Medication {
        Medication {
            id: id.into(),
            name: self.name,
            dosage: self.dosage,
            frequency: self.frequency,
            start_date: self.start_date,
            end_date: self.end_date,
            instructions: self.instructions,
            veterinarian: self.veterinarian,
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn medical_record_type_uses_type_key() {
        let record = MedicalRecordDraft {
            pet_id: "p1".to_string(),
            kind: MedicalRecordType::Surgery,
            veterinarian: "Dr. Okafor".to_string(),
            clinic: "Riverside".to_string(),
            ..MedicalRecordDraft::default()
        }
        .into_record("m1");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "surgery");
        assert_eq!(json["petId"], "p1");
        assert!(json.get("diagnosis").is_none());
    }

    #[test]
    fn vaccination_expiry_defaults_to_now() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let vaccination = VaccinationDraft {
            name: "Rabies".to_string(),
            ..VaccinationDraft::default()
        }
        .into_vaccination("v1", now);
        assert_eq!(vaccination.expiry_date, now);
    }

    #[test]
    fn medication_defaults_to_active() {
        let active = MedicationDraft::default().into_medication("a");
        assert!(active.is_active);

        let stopped = MedicationDraft {
            is_active: Some(false),
            ..MedicationDraft::default()
        }
        .into_medication("b");
        assert!(!stopped.is_active);
    }

    #[test]
    fn numeric_record_ids_are_read_as_strings() {
        let record: MedicalRecord =
            serde_json::from_str(r#"{"id": 3, "petId": 7, "type": "test"}"#).unwrap();
        assert_eq!(record.id, "3");
        assert_eq!(record.pet_id, "7");
        assert_eq!(record.kind, MedicalRecordType::Test);
    }

    #[test]
    fn medical_record_type_parses() {
        assert_eq!(
            "Prescription".parse::<MedicalRecordType>(),
            Ok(MedicalRecordType::Prescription)
        );
        assert!("spa".parse::<MedicalRecordType>().is_err());
    }
}

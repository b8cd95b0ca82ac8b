use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use hauspet_core::models::{Gender, MedicalRecordType, Species, SubscriptionPlan};

#[derive(Parser, Debug)]
#[command(name = "hauspet")]
#[command(about = "Manage HausPet pet records, online or offline")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory holding the local pet mirror
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List pets
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one pet with its health records
    Show {
        /// Pet ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a new pet
    #[command(alias = "new")]
    Add(AddArgs),
    /// Update fields of an existing pet
    Update(UpdateArgs),
    /// Delete a pet
    #[command(alias = "rm")]
    Delete {
        /// Pet ID
        id: String,
    },
    /// Add a medical record to a pet
    Medical(MedicalArgs),
    /// Add a vaccination to a pet
    Vaccination(VaccinationArgs),
    /// Add a medication to a pet
    Medication(MedicationArgs),
    /// Manage the stored API token
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configure the CLI
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Pet name
    #[arg(long)]
    pub name: String,
    /// dog, cat or other
    #[arg(long)]
    pub species: Species,
    /// Breed description
    #[arg(long)]
    pub breed: String,
    /// male or female
    #[arg(long)]
    pub gender: Option<Gender>,
    /// Age in years
    #[arg(long, default_value_t = 0.0)]
    pub age: f64,
    /// Weight in kilograms
    #[arg(long, default_value_t = 0.0)]
    pub weight: f64,
    #[arg(long, default_value = "")]
    pub color: String,
    /// Image URI or generated avatar descriptor
    #[arg(long)]
    pub avatar: Option<String>,
    #[arg(long)]
    pub microchip_id: Option<String>,
    #[arg(long)]
    pub collar_id: Option<String>,
    #[arg(long, default_value = "")]
    pub owner_id: String,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Pet ID
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub species: Option<Species>,
    #[arg(long)]
    pub breed: Option<String>,
    #[arg(long)]
    pub gender: Option<Gender>,
    #[arg(long)]
    pub age: Option<f64>,
    #[arg(long)]
    pub weight: Option<f64>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long, conflicts_with = "clear_avatar")]
    pub avatar: Option<String>,
    /// Remove the current avatar
    #[arg(long)]
    pub clear_avatar: bool,
    #[arg(long)]
    pub microchip_id: Option<String>,
    #[arg(long)]
    pub collar_id: Option<String>,
    #[arg(long)]
    pub owner_id: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct MedicalArgs {
    /// Pet ID
    pub pet_id: String,
    /// checkup, emergency, surgery, test or prescription
    #[arg(long = "type", default_value = "checkup")]
    pub kind: MedicalRecordType,
    #[arg(long)]
    pub veterinarian: String,
    #[arg(long)]
    pub clinic: String,
    /// Visit date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub diagnosis: Option<String>,
    #[arg(long)]
    pub treatment: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub next_appointment: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone)]
pub struct VaccinationArgs {
    /// Pet ID
    pub pet_id: String,
    /// Vaccine name
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub veterinarian: String,
    /// Date given (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub expiry_date: Option<NaiveDate>,
    #[arg(long)]
    pub batch_number: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub next_due: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone)]
pub struct MedicationArgs {
    /// Pet ID
    pub pet_id: String,
    /// Medication name
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub dosage: String,
    #[arg(long)]
    pub frequency: String,
    #[arg(long, default_value = "")]
    pub instructions: String,
    #[arg(long)]
    pub veterinarian: String,
    /// YYYY-MM-DD, defaults to today
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub end_date: Option<NaiveDate>,
    /// Record the medication as no longer active
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Store an API bearer token in the keychain
    Login {
        /// Bearer token issued by the HausPet backend
        #[arg(long, value_name = "TOKEN")]
        token: String,
    },
    /// Show whether a token is stored
    Status,
    /// Remove the stored token
    Logout,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize or update the config file
    Init {
        /// API base URL (e.g. <https://api.hauspet.net>)
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Subscription plan: basic, premium or family
        #[arg(long)]
        plan: Option<SubscriptionPlan>,
    },
    /// Print the current config
    Show,
}

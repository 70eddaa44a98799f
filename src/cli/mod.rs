//! CLI interface for schoolmed

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

use crate::auth::{Route, UserRole};
use crate::records::Status;

#[derive(Parser)]
#[command(name = "schoolmed")]
#[command(version)]
#[command(about = "School health console: appointments, medical events, registrations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a schoolmed.toml configuration file
    Init,

    /// Log in and store the session locally
    Login {
        /// Account email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Account password (prompted if omitted)
        #[arg(short, long, env = "SCHOOLMED_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the logged-in identity
    Whoami,

    /// Check whether a dashboard route is reachable with the current session
    Route {
        /// Route path, e.g. /admin/users
        path: String,
    },

    /// List records of one kind
    List {
        resource: Resource,

        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: u32,

        /// Page size
        #[arg(long, default_value = "10")]
        size: u32,

        /// Case-insensitive text filter applied to the fetched page
        #[arg(short, long)]
        search: Option<String>,

        /// Only rows with this status (e.g. pending, approved)
        #[arg(long)]
        status: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List the students linked to the logged-in parent
    Children {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

/// Record kinds the console can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    Appointments,
    MedicalEvents,
    MedicineSubmissions,
    VaccinationRegistrations,
    MedicalCheckRegistrations,
    Users,
    Classes,
    Students,
}

impl Resource {
    /// Dashboard route the listing belongs to for `role`
    pub fn route_for(&self, role: Option<&UserRole>) -> Route {
        match (self, role) {
            (Resource::Appointments, Some(UserRole::Parent)) => Route::ParentAppointments,
            (Resource::Appointments, _) => Route::NurseAppointments,
            (Resource::MedicalEvents, _) => Route::NurseMedicalEvents,
            (Resource::MedicineSubmissions, Some(UserRole::Parent)) => {
                Route::ParentMedicineSubmissions
            }
            (Resource::MedicineSubmissions, _) => Route::NurseMedicineSubmissions,
            (Resource::VaccinationRegistrations, Some(UserRole::Parent))
            | (Resource::MedicalCheckRegistrations, Some(UserRole::Parent)) => {
                Route::ParentRegistrations
            }
            (Resource::VaccinationRegistrations, Some(UserRole::Admin)) => {
                Route::AdminVaccinationRegistrations
            }
            (Resource::VaccinationRegistrations, _) => Route::NurseVaccinationRegistrations,
            (Resource::MedicalCheckRegistrations, Some(UserRole::Admin)) => {
                Route::AdminMedicalCheckRegistrations
            }
            (Resource::MedicalCheckRegistrations, _) => Route::NurseMedicalCheckRegistrations,
            (Resource::Users, _) => Route::AdminUsers,
            (Resource::Classes, _) => Route::AdminClasses,
            (Resource::Students, _) => Route::AdminStudents,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Parse a `--status` argument
pub fn parse_status(value: &str) -> Status {
    value.parse().unwrap_or_else(|never| match never {})
}

//! Request and response records exchanged with the backend

use crate::auth::UserRole;
use crate::records::filter::Searchable;
use crate::records::ids;
use crate::records::Status;
use serde::{Deserialize, Serialize};

/// A student enrolled in a class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(deserialize_with = "ids::id")]
    pub id: String,
    #[serde(alias = "name")]
    pub full_name: String,
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub class_id: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolClass {
    #[serde(deserialize_with = "ids::id")]
    pub id: String,
    #[serde(alias = "className")]
    pub name: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub student_count: Option<u32>,
}

/// Account record as managed by admins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(deserialize_with = "ids::id")]
    pub id: String,
    #[serde(default, alias = "name")]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: UserRole,
    #[serde(default, deserialize_with = "ids::id_list")]
    pub student_ids: Vec<String>,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub role: UserRole,
}

/// Consultation booked between a parent and the school nurse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(deserialize_with = "ids::id")]
    pub id: String,
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub student_id: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub nurse_id: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default, alias = "appointmentDate")]
    pub appointment_time: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub student_id: String,
    pub reason: String,
    pub appointment_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Incident handled by the nurse (injury, fever, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalEvent {
    #[serde(deserialize_with = "ids::id")]
    pub id: String,
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub student_id: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<String>,
    #[serde(default)]
    pub handled_by: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicalEvent {
    pub student_id: String,
    pub event_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    pub occurred_at: String,
}

/// Medicine a parent hands in for the nurse to administer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineSubmission {
    #[serde(deserialize_with = "ids::id")]
    pub id: String,
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub student_id: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub medicine_name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub usage_note: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicineSubmission {
    pub student_id: String,
    pub medicine_name: String,
    pub dosage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_note: Option<String>,
    pub start_date: String,
    pub end_date: String,
}

/// Sign-up of a student for a vaccination or medical-check campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(deserialize_with = "ids::id")]
    pub id: String,
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub student_id: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub campaign_name: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub registered_at: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub student_id: String,
    pub campaign_id: String,
    /// Parent consent
    pub consent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of the status-change endpoints
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl StatusUpdate {
    pub fn new(status: Status) -> Self {
        Self { status, note: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

fn push_opt<'a>(fields: &mut Vec<&'a str>, value: &'a Option<String>) {
    if let Some(v) = value {
        fields.push(v);
    }
}

impl Searchable for Student {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str(), self.full_name.as_str()];
        push_opt(&mut fields, &self.class_name);
        fields
    }
}

impl Searchable for SchoolClass {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        push_opt(&mut fields, &self.grade);
        fields
    }
}

impl Searchable for UserAccount {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.full_name.as_str(), self.email.as_str()];
        push_opt(&mut fields, &self.phone);
        fields
    }
}

impl Searchable for Appointment {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.reason.as_str()];
        push_opt(&mut fields, &self.student_name);
        push_opt(&mut fields, &self.note);
        fields
    }

    fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }
}

impl Searchable for MedicalEvent {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.event_type.as_str(), self.description.as_str()];
        push_opt(&mut fields, &self.student_name);
        push_opt(&mut fields, &self.severity);
        fields
    }

    fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }
}

impl Searchable for MedicineSubmission {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.medicine_name.as_str()];
        push_opt(&mut fields, &self.student_name);
        push_opt(&mut fields, &self.usage_note);
        fields
    }

    fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }
}

impl Searchable for Registration {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        push_opt(&mut fields, &self.student_name);
        push_opt(&mut fields, &self.campaign_name);
        push_opt(&mut fields, &self.note);
        fields
    }

    fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }
}

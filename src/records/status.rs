//! Workflow status codes and their display labels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of an appointment, submission or registration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Pending,
    Approved,
    Rejected,
    InProgress,
    Completed,
    Cancelled,
    /// Code this client does not recognise, kept verbatim
    Other(String),
}

impl Status {
    /// Wire code sent back to the backend
    pub fn code(&self) -> &str {
        match self {
            Status::Pending => "PENDING",
            Status::Approved => "APPROVED",
            Status::Rejected => "REJECTED",
            Status::InProgress => "IN_PROGRESS",
            Status::Completed => "COMPLETED",
            Status::Cancelled => "CANCELLED",
            Status::Other(code) => code,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &str {
        match self {
            Status::Pending => "Pending",
            Status::Approved => "Approved",
            Status::Rejected => "Rejected",
            Status::InProgress => "In progress",
            Status::Completed => "Completed",
            Status::Cancelled => "Cancelled",
            Status::Other(code) => code,
        }
    }

    /// No further transitions expected
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Status::Rejected | Status::Completed | Status::Cancelled
        )
    }
}

impl FromStr for Status {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        Ok(match normalized.as_str() {
            "PENDING" | "WAITING" | "SUBMITTED" => Status::Pending,
            "APPROVED" | "ACCEPTED" | "CONFIRMED" => Status::Approved,
            "REJECTED" | "DECLINED" | "DENIED" => Status::Rejected,
            "IN_PROGRESS" | "PROCESSING" => Status::InProgress,
            "COMPLETED" | "DONE" | "FINISHED" => Status::Completed,
            "CANCELLED" | "CANCELED" => Status::Cancelled,
            _ => Status::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_else(|never| match never {})
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.code().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

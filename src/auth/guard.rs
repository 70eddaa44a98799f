//! Navigation guard
//!
//! Decides whether a route may be shown for the current session. The
//! decision is a pure function of the session snapshot and the route's
//! required role and is recomputed on every evaluation.

use crate::auth::models::UserRole;
use crate::auth::session::SessionState;
use serde::Serialize;
use std::fmt;

pub const LOGIN_PATH: &str = "/login";

/// Outcome of evaluating a protected route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "path", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Session not initialized yet, show a loading placeholder
    Pending,
    RedirectToLogin,
    /// Wrong role, send the user to their own home
    Redirect(&'static str),
    Allow,
    /// Wrong role and no known home to send the user to
    Forbidden,
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    /// Path to navigate to, if the decision is a redirect
    pub fn target(&self) -> Option<&'static str> {
        match self {
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::Redirect(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardDecision::Pending => write!(f, "pending"),
            GuardDecision::RedirectToLogin => write!(f, "redirect to {}", LOGIN_PATH),
            GuardDecision::Redirect(path) => write!(f, "redirect to {}", path),
            GuardDecision::Allow => write!(f, "allow"),
            GuardDecision::Forbidden => write!(f, "forbidden"),
        }
    }
}

/// Evaluate a route boundary. First matching rule wins:
/// not ready, not authenticated, role mismatch, allow.
pub fn evaluate(state: &SessionState, required: Option<&UserRole>) -> GuardDecision {
    if !state.ready {
        return GuardDecision::Pending;
    }

    if !state.authenticated {
        return GuardDecision::RedirectToLogin;
    }

    let Some(required) = required else {
        return GuardDecision::Allow;
    };

    let Some(user) = state.user.as_ref() else {
        return GuardDecision::RedirectToLogin;
    };

    if &user.role == required {
        return GuardDecision::Allow;
    }

    match user.role.home_path() {
        Some(home) => GuardDecision::Redirect(home),
        None => GuardDecision::Forbidden,
    }
}

/// Navigable views of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    AdminHome,
    AdminUsers,
    AdminClasses,
    AdminStudents,
    AdminVaccinationRegistrations,
    AdminMedicalCheckRegistrations,
    NurseHome,
    NurseAppointments,
    NurseMedicalEvents,
    NurseMedicineSubmissions,
    NurseVaccinationRegistrations,
    NurseMedicalCheckRegistrations,
    ParentHome,
    ParentChildren,
    ParentAppointments,
    ParentMedicineSubmissions,
    ParentRegistrations,
}

impl Route {
    pub const ALL: [Route; 18] = [
        Route::Login,
        Route::AdminHome,
        Route::AdminUsers,
        Route::AdminClasses,
        Route::AdminStudents,
        Route::AdminVaccinationRegistrations,
        Route::AdminMedicalCheckRegistrations,
        Route::NurseHome,
        Route::NurseAppointments,
        Route::NurseMedicalEvents,
        Route::NurseMedicineSubmissions,
        Route::NurseVaccinationRegistrations,
        Route::NurseMedicalCheckRegistrations,
        Route::ParentHome,
        Route::ParentChildren,
        Route::ParentAppointments,
        Route::ParentMedicineSubmissions,
        Route::ParentRegistrations,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => LOGIN_PATH,
            Route::AdminHome => "/admin",
            Route::AdminUsers => "/admin/users",
            Route::AdminClasses => "/admin/classes",
            Route::AdminStudents => "/admin/students",
            Route::AdminVaccinationRegistrations => "/admin/vaccination-registrations",
            Route::AdminMedicalCheckRegistrations => "/admin/medical-check-registrations",
            Route::NurseHome => "/nurse",
            Route::NurseAppointments => "/nurse/appointments",
            Route::NurseMedicalEvents => "/nurse/medical-events",
            Route::NurseMedicineSubmissions => "/nurse/medicine-submissions",
            Route::NurseVaccinationRegistrations => "/nurse/vaccination-registrations",
            Route::NurseMedicalCheckRegistrations => "/nurse/medical-check-registrations",
            Route::ParentHome => "/parent",
            Route::ParentChildren => "/parent/children",
            Route::ParentAppointments => "/parent/appointments",
            Route::ParentMedicineSubmissions => "/parent/medicine-submissions",
            Route::ParentRegistrations => "/parent/registrations",
        }
    }

    /// Role a user must hold to see this route. `None` for public routes.
    pub fn required_role(&self) -> Option<UserRole> {
        match self {
            Route::Login => None,
            Route::AdminHome
            | Route::AdminUsers
            | Route::AdminClasses
            | Route::AdminStudents
            | Route::AdminVaccinationRegistrations
            | Route::AdminMedicalCheckRegistrations => Some(UserRole::Admin),
            Route::NurseHome
            | Route::NurseAppointments
            | Route::NurseMedicalEvents
            | Route::NurseMedicineSubmissions
            | Route::NurseVaccinationRegistrations
            | Route::NurseMedicalCheckRegistrations => Some(UserRole::Nurse),
            Route::ParentHome
            | Route::ParentChildren
            | Route::ParentAppointments
            | Route::ParentMedicineSubmissions
            | Route::ParentRegistrations => Some(UserRole::Parent),
        }
    }

    pub fn is_public(&self) -> bool {
        self.required_role().is_none()
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.trim();
        let normalized = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }

    /// Evaluate this route against the session
    pub fn check(&self, state: &SessionState) -> GuardDecision {
        if self.is_public() {
            return GuardDecision::Allow;
        }
        evaluate(state, self.required_role().as_ref())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

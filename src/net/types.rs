//! Shared types for the REST API payloads.
//!
//! These are the client's fixed internal shapes. The backend itself is not
//! consistent about field casing on the `/auth/me` endpoint; the mapping from
//! that raw payload into `User`/`UserProfile` lives in `crate::auth::sync`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Account role as assigned by the backend, never by the identity provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[default]
    Professional,
    Inactive,
}

impl Role {
    /// Parse the backend's wire spelling (`ADMIN`/`PROFESSIONAL`/`INACTIVE`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(Self::Admin),
            "PROFESSIONAL" => Some(Self::Professional),
            "INACTIVE" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// Approval status gating access to the main application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileStatus {
    Active,
    #[default]
    Inactive,
}

impl ProfileStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// The authenticated account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// Professional profile attached to an account.
///
/// `specialty` and `phone` are plain strings (empty until the profile form is
/// completed); the remaining demographic fields are optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub status: ProfileStatus,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub rut: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub residence_country: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Partial profile update: the `PUT /auth/profile` body and the shallow-merge
/// argument of the session store's `update_profile`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residence_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
}

impl UserProfile {
    /// Shallow-merge a patch: only fields present in the patch overwrite.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(v) = &patch.full_name {
            self.full_name = Some(v.clone());
        }
        if let Some(v) = &patch.specialty {
            self.specialty = v.clone();
        }
        if let Some(v) = &patch.phone {
            self.phone = v.clone();
        }
        if let Some(v) = &patch.rut {
            self.rut = Some(v.clone());
        }
        if let Some(v) = &patch.bio {
            self.bio = Some(v.clone());
        }
        if let Some(v) = &patch.birth_date {
            self.birth_date = Some(v.clone());
        }
        if let Some(v) = &patch.gender {
            self.gender = Some(v.clone());
        }
        if let Some(v) = &patch.nationality {
            self.nationality = Some(v.clone());
        }
        if let Some(v) = &patch.residence_country {
            self.residence_country = Some(v.clone());
        }
        if let Some(v) = &patch.university {
            self.university = Some(v.clone());
        }
    }
}

/// A patient record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    #[serde(default)]
    pub created_at: String,
    pub personal_info: PatientPersonalInfo,
    #[serde(default)]
    pub consent_pdf_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientPersonalInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub rut: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub diagnosis: Option<String>,
}

impl Patient {
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.personal_info.first_name, self.personal_info.last_name
        )
    }
}

/// Editable patient fields (`PUT /patients/{id}`).
#[derive(Clone, Debug, Default, Serialize)]
pub struct PatientUpdate {
    pub disability_report: String,
    pub care_notes: String,
}

/// Body for creating a treatment session entry.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SessionPayload {
    pub patient_id: String,
    pub intervention_plan: String,
    pub description: String,
    pub has_incident: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

/// A logged treatment session as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreatmentSession {
    pub id: String,
    pub patient_id: String,
    #[serde(default)]
    pub professional_id: Option<String>,
    #[serde(default)]
    pub intervention_plan: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub has_incident: bool,
    #[serde(default)]
    pub incident_details: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Body for creating a clinical report.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ReportPayload {
    pub patient_id: String,
    pub title: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub patient_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: String,
}

/// An uploaded patient document reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientDocument {
    pub id: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// A collaboration invite on a patient record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collaboration {
    pub id: String,
    pub patient_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub status: String,
}

/// An account awaiting admin approval.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A support ticket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Aggregate counters for the professional dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub active_patients: u32,
    #[serde(default)]
    pub monthly_sessions: u32,
    #[serde(default)]
    pub reported_incidents: u32,
}

/// `GET /dashboard/summary` response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_patients: Vec<Patient>,
}

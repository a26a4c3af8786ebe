//! REST API helpers for communicating with the application backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side (SSR):
//! every helper resolves to `ApiError::Unavailable` since the endpoints are
//! only meaningful in the browser.
//!
//! GLOBAL CONTRACT
//! ===============
//! Every outgoing request carries the session store's current token as a
//! bearer credential when one is present, and any 401 response clears the
//! session store before the error reaches the caller. That logout goes
//! through the store directly, not through the identity provider bridge, so
//! this module has no dependency cycle with `crate::auth`.

use leptos::prelude::RwSignal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::net::types::{
    Collaboration, DashboardSummary, Patient, PatientDocument, PatientPersonalInfo,
    PatientUpdate, PendingUser, ProfilePatch, Report, ReportPayload, SessionPayload,
    SupportTicket, TreatmentSession,
};
use crate::state::session::SessionState;

/// Backend base URL, fixed at compile time.
pub fn api_base_url() -> &'static str {
    option_env!("BITACORA_API_URL").unwrap_or("/api")
}

#[derive(Clone, Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("unexpected response shape: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Status(403))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status(401))
    }
}

/// Issue a request and return the response body as loose JSON.
///
/// `Value::Null` stands in for an empty body (deletes, bare 200s).
async fn request_json(
    session: RwSignal<SessionState>,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> Result<Value, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::GetUntracked;

        let url = format!("{}{path}", api_base_url());
        let mut builder = match method {
            "POST" => gloo_net::http::Request::post(&url),
            "PUT" => gloo_net::http::Request::put(&url),
            "DELETE" => gloo_net::http::Request::delete(&url),
            _ => gloo_net::http::Request::get(&url),
        };

        if let Some(token) = session.get_untracked().token {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .json(&json)
                .map_err(|e| ApiError::Network(e.to_string()))?,
            None => builder
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?,
        };

        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if resp.status() == 401 {
            crate::state::session::write(session, SessionState::logout);
            return Err(ApiError::Status(401));
        }
        if !resp.ok() {
            return Err(ApiError::Status(resp.status()));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, method, path, body);
        Err(ApiError::Unavailable)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn to_value<T: serde::Serialize>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

// ─── auth ─────────────────────────────────────────────────────

/// `GET /auth/me` — raw payload; normalization lives in `crate::auth::sync`.
pub async fn fetch_me(session: RwSignal<SessionState>) -> Result<Value, ApiError> {
    request_json(session, "GET", "/auth/me", None).await
}

/// `PUT /auth/profile`.
pub async fn update_profile(
    session: RwSignal<SessionState>,
    patch: &ProfilePatch,
) -> Result<(), ApiError> {
    request_json(session, "PUT", "/auth/profile", Some(to_value(patch)?)).await?;
    Ok(())
}

// ─── dashboard ────────────────────────────────────────────────

pub async fn fetch_dashboard_summary(
    session: RwSignal<SessionState>,
) -> Result<DashboardSummary, ApiError> {
    decode(request_json(session, "GET", "/dashboard/summary", None).await?)
}

// ─── patients ─────────────────────────────────────────────────

pub async fn list_patients(session: RwSignal<SessionState>) -> Result<Vec<Patient>, ApiError> {
    decode(request_json(session, "GET", "/patients/", None).await?)
}

pub async fn create_patient(
    session: RwSignal<SessionState>,
    personal_info: &PatientPersonalInfo,
) -> Result<Patient, ApiError> {
    let body = serde_json::json!({ "personal_info": to_value(personal_info)? });
    decode(request_json(session, "POST", "/patients/", Some(body)).await?)
}

pub async fn fetch_patient(
    session: RwSignal<SessionState>,
    id: &str,
) -> Result<Patient, ApiError> {
    decode(request_json(session, "GET", &format!("/patients/{id}"), None).await?)
}

pub async fn update_patient(
    session: RwSignal<SessionState>,
    id: &str,
    update: &PatientUpdate,
) -> Result<(), ApiError> {
    request_json(
        session,
        "PUT",
        &format!("/patients/{id}"),
        Some(to_value(update)?),
    )
    .await?;
    Ok(())
}

pub async fn list_patient_documents(
    session: RwSignal<SessionState>,
    id: &str,
) -> Result<Vec<PatientDocument>, ApiError> {
    decode(request_json(session, "GET", &format!("/patients/{id}/documents"), None).await?)
}

pub async fn delete_document(
    session: RwSignal<SessionState>,
    doc_id: &str,
) -> Result<(), ApiError> {
    request_json(
        session,
        "DELETE",
        &format!("/patients/documents/{doc_id}"),
        None,
    )
    .await?;
    Ok(())
}

// ─── treatment sessions ───────────────────────────────────────

pub async fn list_sessions(
    session: RwSignal<SessionState>,
    patient_id: &str,
    professional_id: Option<&str>,
) -> Result<Vec<TreatmentSession>, ApiError> {
    let mut path = format!("/sessions/?patient_id={patient_id}");
    if let Some(pid) = professional_id {
        path.push_str(&format!("&professional_id={pid}"));
    }
    decode(request_json(session, "GET", &path, None).await?)
}

pub async fn create_session(
    session: RwSignal<SessionState>,
    payload: &SessionPayload,
) -> Result<TreatmentSession, ApiError> {
    decode(request_json(session, "POST", "/sessions/", Some(to_value(payload)?)).await?)
}

pub async fn update_session(
    session: RwSignal<SessionState>,
    id: &str,
    payload: &SessionPayload,
) -> Result<(), ApiError> {
    request_json(
        session,
        "PUT",
        &format!("/sessions/{id}"),
        Some(to_value(payload)?),
    )
    .await?;
    Ok(())
}

pub async fn delete_session(session: RwSignal<SessionState>, id: &str) -> Result<(), ApiError> {
    request_json(session, "DELETE", &format!("/sessions/{id}"), None).await?;
    Ok(())
}

// ─── reports ──────────────────────────────────────────────────

pub async fn list_reports(
    session: RwSignal<SessionState>,
    patient_id: &str,
) -> Result<Vec<Report>, ApiError> {
    decode(
        request_json(
            session,
            "GET",
            &format!("/reports/list?patient_id={patient_id}"),
            None,
        )
        .await?,
    )
}

pub async fn create_report(
    session: RwSignal<SessionState>,
    payload: &ReportPayload,
) -> Result<Report, ApiError> {
    decode(request_json(session, "POST", "/reports", Some(to_value(payload)?)).await?)
}

/// Consolidated report over a date range; the shape is backend-templated.
pub async fn fetch_master_report(
    session: RwSignal<SessionState>,
    patient_id: &str,
    start_date: &str,
    end_date: &str,
) -> Result<Value, ApiError> {
    request_json(
        session,
        "GET",
        &format!("/reports/master?patient_id={patient_id}&start_date={start_date}&end_date={end_date}"),
        None,
    )
    .await
}

// ─── collaborations ───────────────────────────────────────────

pub async fn invite_collaborator(
    session: RwSignal<SessionState>,
    patient_id: &str,
    email: &str,
) -> Result<(), ApiError> {
    let body = serde_json::json!({ "patient_id": patient_id, "email": email });
    request_json(session, "POST", "/collaborations/invite", Some(body)).await?;
    Ok(())
}

pub async fn fetch_pending_invites(
    session: RwSignal<SessionState>,
) -> Result<Vec<Collaboration>, ApiError> {
    decode(request_json(session, "GET", "/collaborations/pending", None).await?)
}

pub async fn respond_invite(
    session: RwSignal<SessionState>,
    id: &str,
    accept: bool,
) -> Result<(), ApiError> {
    let status = if accept { "ACCEPTED" } else { "REJECTED" };
    let body = serde_json::json!({ "status": status });
    request_json(
        session,
        "PUT",
        &format!("/collaborations/{id}/respond"),
        Some(body),
    )
    .await?;
    Ok(())
}

pub async fn delete_collaboration(
    session: RwSignal<SessionState>,
    id: &str,
) -> Result<(), ApiError> {
    request_json(session, "DELETE", &format!("/collaborations/{id}"), None).await?;
    Ok(())
}

// ─── admin ────────────────────────────────────────────────────

pub async fn fetch_admin_dashboard(session: RwSignal<SessionState>) -> Result<Value, ApiError> {
    request_json(session, "GET", "/admin/dashboard", None).await
}

pub async fn fetch_pending_users(
    session: RwSignal<SessionState>,
) -> Result<Vec<PendingUser>, ApiError> {
    decode(request_json(session, "GET", "/admin/users/pending", None).await?)
}

/// Approve or reject a pending account.
pub async fn review_user(
    session: RwSignal<SessionState>,
    user_id: &str,
    approve: bool,
    reject_reason: Option<&str>,
) -> Result<(), ApiError> {
    let action = if approve { "APPROVE" } else { "REJECT" };
    let body = serde_json::json!({ "action": action, "reject_reason": reject_reason });
    request_json(
        session,
        "PUT",
        &format!("/admin/users/{user_id}/review"),
        Some(body),
    )
    .await?;
    Ok(())
}

// ─── support ──────────────────────────────────────────────────

pub async fn create_ticket(
    session: RwSignal<SessionState>,
    subject: &str,
    message: &str,
) -> Result<(), ApiError> {
    let body = serde_json::json!({ "subject": subject, "message": message });
    request_json(session, "POST", "/support/", Some(body)).await?;
    Ok(())
}

pub async fn list_tickets(
    session: RwSignal<SessionState>,
) -> Result<Vec<SupportTicket>, ApiError> {
    decode(request_json(session, "GET", "/support/", None).await?)
}

pub async fn reply_ticket(
    session: RwSignal<SessionState>,
    id: &str,
    response: &str,
) -> Result<(), ApiError> {
    let body = serde_json::json!({ "response": response });
    request_json(session, "PUT", &format!("/support/{id}/reply"), Some(body)).await?;
    Ok(())
}

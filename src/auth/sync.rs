//! Backend synchronization: turn an identity-provider session into the
//! canonical `{User, UserProfile}` held by the session store.
//!
//! The backend's `/auth/me` payload is untrusted in shape: top-level and
//! nested keys show up in PascalCase, snake_case, or lowercase depending on
//! the serializer that produced them, and the nested profile sometimes
//! arrives as a JSON-encoded string. Every field read below tries the known
//! key variants in priority order.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here throws past the sync boundary. A 403 means the account is
//! awaiting approval and the optimistic placeholder stands; a payload without
//! a recognizable user is logged and the placeholder stands; any other
//! failure clears the session, because an unsynced session is worse than no
//! session.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use serde_json::Value;

use crate::auth::bridge::BridgeSession;
use crate::auth::error::NormalizeError;
use crate::net::types::{ProfileStatus, Role, User, UserProfile};

/// Deduplication guard over the last token handed to the backend.
///
/// The identity provider fires its change subscription on every auth tick,
/// including token refreshes that do not change identity. The gate records
/// the token *before* the network call, so an overlapping re-entrant sync for
/// the same token observes the marker and skips.
#[derive(Debug, Default)]
pub struct SyncGate {
    last_token: Option<String>,
}

impl SyncGate {
    /// Record `token` and report whether a sync should run for it.
    pub fn should_sync(&mut self, token: &str) -> bool {
        if self.last_token.as_deref() == Some(token) {
            return false;
        }
        self.last_token = Some(token.to_owned());
        true
    }

    /// Forget the marker (sign-out path), so the next sign-in always syncs.
    pub fn reset(&mut self) {
        self.last_token = None;
    }
}

/// Minimal low-privilege user committed while the backend call is pending.
pub fn placeholder_user(session: &BridgeSession) -> User {
    User {
        id: session.user_id.clone(),
        email: session.email.clone(),
        role: Role::Professional,
    }
}

/// Placeholder profile: inactive, so the route guards hold the user at the
/// pending screen until the real status arrives.
pub fn placeholder_profile() -> UserProfile {
    UserProfile {
        status: ProfileStatus::Inactive,
        ..UserProfile::default()
    }
}

/// First string found under any of `keys`, in priority order.
fn string_at(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str).map(ToOwned::to_owned))
}

/// The nested profile object, parsing a string-encoded variant if needed.
fn nested_profile(user_obj: &Value) -> Value {
    match user_obj
        .get("ProfileData")
        .or_else(|| user_obj.get("profile_data"))
    {
        Some(Value::String(encoded)) => {
            serde_json::from_str(encoded).unwrap_or_else(|_| Value::Object(Default::default()))
        }
        Some(value) => value.clone(),
        None => Value::Object(Default::default()),
    }
}

/// Reduce a raw `/auth/me` payload to the client's internal shapes.
pub fn normalize_me_payload(raw: &Value) -> Result<(User, UserProfile), NormalizeError> {
    let user_obj = raw
        .get("user")
        .or_else(|| raw.get("User"))
        .ok_or(NormalizeError::MissingUser)?;

    let id = string_at(user_obj, &["ID", "id"]).ok_or(NormalizeError::MissingField("id"))?;
    let email =
        string_at(user_obj, &["Email", "email"]).ok_or(NormalizeError::MissingField("email"))?;
    let role_raw =
        string_at(user_obj, &["Role", "role"]).ok_or(NormalizeError::MissingField("role"))?;
    let role = Role::parse(&role_raw).ok_or(NormalizeError::UnknownRole(role_raw))?;

    let profile_obj = nested_profile(user_obj);
    let profile = UserProfile {
        // Status lives on the user object, not inside the profile blob.
        status: string_at(user_obj, &["Status", "status"])
            .and_then(|s| ProfileStatus::parse(&s))
            .unwrap_or_default(),
        full_name: string_at(&profile_obj, &["full_name", "name"]),
        specialty: string_at(&profile_obj, &["specialty"]).unwrap_or_default(),
        phone: string_at(&profile_obj, &["phone"]).unwrap_or_default(),
        rut: string_at(&profile_obj, &["rut"]),
        bio: string_at(&profile_obj, &["bio"]),
        birth_date: string_at(&profile_obj, &["birth_date"]),
        gender: string_at(&profile_obj, &["gender"]),
        nationality: string_at(&profile_obj, &["nationality"]),
        residence_country: string_at(&profile_obj, &["residence_country"]),
        university: string_at(&profile_obj, &["university"]),
        avatar_url: string_at(user_obj, &["AvatarURL"])
            .or_else(|| string_at(&profile_obj, &["avatar_url", "picture"])),
    };

    Ok((User { id, email, role }, profile))
}

/// How a sync attempt resolved. The caller sets the ready flag on every
/// variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Same token as the last sync; no network call issued.
    Skipped,
    /// Canonical user + profile committed.
    Synced,
    /// Backend answered 403: account awaiting approval, placeholder stands.
    PendingApproval,
    /// Payload had no recognizable user; placeholder stands.
    NormalizeFailed,
    /// The store token changed while the call was in flight; result dropped.
    Superseded,
    /// Any other failure; session cleared.
    Failed,
}

/// Apply the `/auth/me` result to the session, committing the normalized
/// user, holding the placeholder, or clearing the session.
///
/// The commit is guarded: if the session's token no longer matches the token
/// this sync was started for (a logout or newer sign-in landed mid-flight),
/// the stale result is dropped.
pub fn apply_fetch_result(
    result: &Result<serde_json::Value, crate::net::api::ApiError>,
    token: &str,
    state: &mut crate::state::session::SessionState,
) -> SyncOutcome {
    match result {
        Ok(raw) => match normalize_me_payload(raw) {
            Ok((user, profile)) => {
                if state.token.as_deref() != Some(token) {
                    return SyncOutcome::Superseded;
                }
                state.set_auth(token.to_owned(), user, profile);
                SyncOutcome::Synced
            }
            Err(e) => {
                leptos::logging::error!("unusable /auth/me payload: {e}");
                SyncOutcome::NormalizeFailed
            }
        },
        Err(e) if e.is_forbidden() => {
            leptos::logging::warn!("account awaiting approval (403)");
            SyncOutcome::PendingApproval
        }
        Err(e) => {
            leptos::logging::error!("backend sync failed: {e}");
            state.logout();
            SyncOutcome::Failed
        }
    }
}

/// Run one sync pass for a live identity-provider session.
pub async fn sync_with_backend(
    session: leptos::prelude::RwSignal<crate::state::session::SessionState>,
    gate: &std::rc::Rc<std::cell::RefCell<SyncGate>>,
    bridge_session: &BridgeSession,
) -> SyncOutcome {
    let token = bridge_session.access_token.clone();
    if !gate.borrow_mut().should_sync(&token) {
        return SyncOutcome::Skipped;
    }

    // Optimistic pre-commit so the guards have state while the call runs.
    let placeholder = (placeholder_user(bridge_session), placeholder_profile());
    crate::state::session::write(session, |s| {
        s.set_auth(token.clone(), placeholder.0, placeholder.1);
    });

    let result = crate::net::api::fetch_me(session).await;
    let mut outcome = SyncOutcome::Failed;
    crate::state::session::write(session, |s| {
        outcome = apply_fetch_result(&result, &token, s);
    });
    outcome
}

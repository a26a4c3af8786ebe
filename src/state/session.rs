//! Persisted session store: the single source of truth for who is signed in.
//!
//! DESIGN
//! ======
//! The store is a plain `SessionState` value held in an `RwSignal` provided
//! via context by the `App` root. Every mutation goes through the three
//! operations below and through the `write` choke point, which persists the
//! new state to `localStorage` so a reload does not force re-authentication
//! before the identity provider round-trips.
//!
//! `logout` deliberately has no dependency on the identity provider bridge:
//! the 401 handler in `crate::net::api` calls it directly.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::net::types::{ProfilePatch, User, UserProfile};

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "bitacora-auth-storage";

/// Client-side session: bearer token, canonical user, profile, auth flag.
///
/// Invariant: `is_authenticated` is `true` exactly when `token` and `user`
/// are both present. The mutation methods maintain this; nothing else writes
/// the fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<User>,
    pub profile: Option<UserProfile>,
    pub is_authenticated: bool,
}

impl SessionState {
    /// Wholesale replace the session after a sign-in or re-sync.
    pub fn set_auth(&mut self, token: String, user: User, profile: UserProfile) {
        self.token = Some(token);
        self.user = Some(user);
        self.profile = Some(profile);
        self.is_authenticated = true;
    }

    /// Shallow-merge a patch into the profile. No-op when no profile exists.
    pub fn update_profile(&mut self, patch: &ProfilePatch) {
        if let Some(profile) = self.profile.as_mut() {
            profile.apply(patch);
        }
    }

    /// Reset all four fields to their empty defaults.
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
        self.profile = None;
        self.is_authenticated = false;
    }
}

/// Apply a mutation to the session signal and persist the result.
///
/// All components and the auth core mutate the store through this function,
/// so the persisted copy tracks every write.
pub fn write(
    session: leptos::prelude::RwSignal<SessionState>,
    f: impl FnOnce(&mut SessionState),
) {
    use leptos::prelude::{GetUntracked, Update};

    session.update(f);
    persist(&session.get_untracked());
}

/// Read the persisted session once at startup.
///
/// Returns `None` on the server, when nothing was stored, or when the stored
/// record no longer deserializes (e.g. after a schema change).
pub fn load_persisted() -> Option<SessionState> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window()?.local_storage().ok()??;
        let raw = storage.get_item(STORAGE_KEY).ok()??;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

fn persist(state: &SessionState) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            if let Ok(json) = serde_json::to_string(state) {
                let _ = storage.set_item(STORAGE_KEY, &json);
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = state;
    }
}

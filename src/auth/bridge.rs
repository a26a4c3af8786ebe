//! Bridge to the hosted identity provider (GoTrue-style REST API).
//!
//! The bridge owns the identity-provider session: an access/refresh token
//! pair plus the identity claims read from the access token. Role and
//! approval status are NOT taken from claims; they come from the backend via
//! `crate::auth::sync`, which runs off this bridge's change subscription.
//!
//! Subscriber dispatch is synchronous on the single-threaded event loop; the
//! last write to the session store wins.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use std::cell::RefCell;
use std::rc::Rc;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "bitacora-idp-session";

/// Identity provider base URL, fixed at compile time.
pub fn idp_base_url() -> &'static str {
    option_env!("BITACORA_IDP_URL").unwrap_or("https://id.bitacoramedica.cl")
}

/// Public (anon) API key sent with identity provider requests.
#[cfg(feature = "hydrate")]
fn idp_anon_key() -> &'static str {
    option_env!("BITACORA_IDP_KEY").unwrap_or("")
}

/// The browser URL that starts the external Google OAuth flow.
///
/// The provider redirects back into the native shell via the custom scheme
/// handled by `crate::auth::deep_link`.
pub fn google_authorize_url() -> String {
    format!(
        "{}/auth/v1/authorize?provider=google&redirect_to={}",
        idp_base_url(),
        crate::auth::deep_link::AUTH_DEEP_LINK_PREFIX
    )
}

/// A live identity-provider session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub email: String,
}

/// Identity claims carried in the access token payload.
#[derive(Debug, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Decode the claims segment of a JWT without verifying the signature.
///
/// Verification happens server-side on every API call; the client only needs
/// the identity fields to seed the optimistic placeholder session.
pub fn decode_claims(access_token: &str) -> Result<TokenClaims, AuthError> {
    let payload = access_token
        .split('.')
        .nth(1)
        .ok_or(AuthError::MalformedToken)?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AuthError::MalformedToken)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedToken)
}

type Listener = Rc<dyn Fn(Option<&BridgeSession>)>;

#[derive(Default)]
struct BridgeInner {
    session: RefCell<Option<BridgeSession>>,
    listeners: RefCell<Vec<Listener>>,
}

/// Shared handle to the identity provider session.
#[derive(Clone, Default)]
pub struct AuthBridge {
    inner: Rc<BridgeInner>,
}

// SAFETY: `AuthBridge` wraps `Rc`/`RefCell` and is shared through the leptos
// reactive context, whose `provide_context` bound requires `Send + Sync`. The
// app runs single-threaded — in the browser (WASM) and in the single-threaded
// test harness — so the handle is never actually sent to or accessed from
// another thread, and these marker impls are never exercised across threads.
unsafe impl Send for AuthBridge {}
unsafe impl Sync for AuthBridge {}

impl std::fmt::Debug for AuthBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthBridge")
            .field("signed_in", &self.inner.session.borrow().is_some())
            .finish()
    }
}

impl AuthBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current identity provider session, if any.
    pub fn current_session(&self) -> Option<BridgeSession> {
        self.inner.session.borrow().clone()
    }

    /// Subscribe to session changes (sign-in, sign-out, token replacement).
    ///
    /// The callback receives the new session, or `None` on sign-out. This is
    /// the sole trigger for the backend sync.
    pub fn on_session_change(&self, callback: impl Fn(Option<&BridgeSession>) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(callback));
    }

    /// Re-deliver the current state to all subscribers.
    ///
    /// Called once at startup after the persisted session is restored, so the
    /// initial sync fires exactly like a live sign-in would.
    pub fn replay(&self) {
        self.notify();
    }

    /// Establish a session from an externally-obtained token pair.
    ///
    /// Idempotent: the same pair re-applied leaves the session unchanged and
    /// re-notifies subscribers with the identical value.
    pub fn set_session(&self, access_token: &str, refresh_token: &str) -> Result<(), AuthError> {
        let claims = decode_claims(access_token)?;
        let next = BridgeSession {
            access_token: access_token.to_owned(),
            refresh_token: refresh_token.to_owned(),
            user_id: claims.sub,
            email: claims.email.unwrap_or_default(),
        };

        let changed = self.inner.session.borrow().as_ref() != Some(&next);
        if changed {
            *self.inner.session.borrow_mut() = Some(next);
            self.persist();
        }
        self.notify();
        Ok(())
    }

    /// Sign in with email and password against the identity provider.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            #[derive(Deserialize)]
            struct TokenResponse {
                access_token: String,
                refresh_token: String,
            }

            let url = format!("{}/auth/v1/token?grant_type=password", idp_base_url());
            let resp = gloo_net::http::Request::post(&url)
                .header("apikey", idp_anon_key())
                .json(&serde_json::json!({ "email": email, "password": password }))
                .map_err(|e| AuthError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;

            if !resp.ok() {
                let detail = resp
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|v| {
                        v.get("error_description")
                            .or_else(|| v.get("msg"))
                            .and_then(|d| d.as_str())
                            .map(ToOwned::to_owned)
                    })
                    .unwrap_or_else(|| format!("status {}", resp.status()));
                return Err(AuthError::Rejected(detail));
            }

            let tokens: TokenResponse = resp
                .json()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            self.set_session(&tokens.access_token, &tokens.refresh_token)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(AuthError::Unavailable)
        }
    }

    /// Sign out: best-effort token revoke, then clear the local session and
    /// notify subscribers with `None`.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            if let Some(session) = self.current_session() {
                let url = format!("{}/auth/v1/logout", idp_base_url());
                let revoke = gloo_net::http::Request::post(&url)
                    .header("apikey", idp_anon_key())
                    .header(
                        "Authorization",
                        &format!("Bearer {}", session.access_token),
                    )
                    .send()
                    .await;
                if let Err(e) = revoke {
                    leptos::logging::warn!("token revoke failed, clearing locally: {e}");
                }
            }
        }

        *self.inner.session.borrow_mut() = None;
        self.clear_persisted();
        self.notify();
        Ok(())
    }

    /// Restore the persisted session without notifying subscribers.
    ///
    /// `replay` delivers the restored state once the app has subscribed.
    pub fn restore_persisted(&self) {
        #[cfg(feature = "hydrate")]
        {
            let restored = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
                .and_then(|raw| serde_json::from_str::<BridgeSession>(&raw).ok());
            if let Some(session) = restored {
                *self.inner.session.borrow_mut() = Some(session);
            }
        }
    }

    fn notify(&self) {
        let session = self.inner.session.borrow().clone();
        let listeners = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(session.as_ref());
        }
    }

    fn persist(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) =
                web_sys::window().and_then(|w| w.local_storage().ok().flatten())
            {
                if let Ok(json) = serde_json::to_string(&*self.inner.session.borrow()) {
                    let _ = storage.set_item(STORAGE_KEY, &json);
                }
            }
        }
    }

    fn clear_persisted(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) =
                web_sys::window().and_then(|w| w.local_storage().ok().flatten())
            {
                let _ = storage.remove_item(STORAGE_KEY);
            }
        }
    }
}

/// Build an unsigned JWT with the given identity claims.
#[cfg(test)]
pub fn encode_unsigned_jwt_for_tests(sub: &str, email: &str) -> String {
    let header = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .encode(serde_json::json!({ "alg": "none", "typ": "JWT" }).to_string());
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .encode(serde_json::json!({ "sub": sub, "email": email }).to_string());
    format!("{header}.{payload}.")
}

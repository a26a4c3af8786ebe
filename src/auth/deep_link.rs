//! Deep-link capture for the native OAuth hand-off.
//!
//! After an external Google OAuth redirect, the native shell reopens the app
//! with a custom-scheme URL carrying the token pair in the fragment:
//!
//! ```text
//! com.bitacora.medica://google-auth#access_token=...&refresh_token=...
//! ```
//!
//! The shell forwards every URL-open event to the web layer as a window
//! `CustomEvent` named `app-url-open` whose `detail` is the URL string. URLs
//! outside the scheme are ignored; a matching URL without both tokens logs a
//! warning and leaves the current session untouched. Delivering the same link
//! twice is harmless: `set_session` is idempotent for an identical pair.

#[cfg(test)]
#[path = "deep_link_test.rs"]
mod deep_link_test;

use crate::auth::bridge::AuthBridge;

/// Scheme + host prefix signaling a completed Google OAuth redirect.
pub const AUTH_DEEP_LINK_PREFIX: &str = "com.bitacora.medica://google-auth";

/// Access/refresh token pair extracted from a deep link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Extract the token pair from an auth deep link.
///
/// The fragment is treated as a query string (`#` and `?` both start it).
/// Returns `None` for URLs outside the scheme or when either token is absent
/// or empty.
pub fn parse_oauth_deep_link(url: &str) -> Option<TokenPair> {
    let rest = url.strip_prefix(AUTH_DEEP_LINK_PREFIX)?;
    let params = rest
        .find(['#', '?'])
        .map(|idx| &rest[idx + 1..])
        .unwrap_or_default();

    let mut access_token = None;
    let mut refresh_token = None;
    for pair in params.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "access_token" => access_token = Some(value),
            "refresh_token" => refresh_token = Some(value),
            _ => {}
        }
    }

    match (access_token, refresh_token) {
        (Some(a), Some(r)) if !a.is_empty() && !r.is_empty() => Some(TokenPair {
            access_token: a.to_owned(),
            refresh_token: r.to_owned(),
        }),
        _ => None,
    }
}

/// Handle one URL-open event from the native shell.
///
/// Non-matching URLs are a no-op. On success the caller-supplied `navigate`
/// moves the user to the authenticated landing route; on failure the error is
/// logged and the user stays where they are.
pub fn handle_url_open(url: &str, bridge: &AuthBridge, navigate: impl FnOnce(&str)) {
    if !url.starts_with(AUTH_DEEP_LINK_PREFIX) {
        return;
    }

    let Some(pair) = parse_oauth_deep_link(url) else {
        leptos::logging::warn!("auth deep link without tokens: {url}");
        return;
    };

    match bridge.set_session(&pair.access_token, &pair.refresh_token) {
        Ok(()) => {
            leptos::logging::log!("mobile Google login succeeded");
            navigate("/dashboard");
        }
        Err(e) => {
            leptos::logging::error!("error setting session from deep link: {e}");
        }
    }
}

/// Register the window listener for `app-url-open` events.
///
/// Installed once from inside the router so `navigate` is available.
#[cfg(feature = "hydrate")]
pub fn install_url_open_listener(
    bridge: AuthBridge,
    navigate: impl Fn(&str) + Clone + 'static,
) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        return;
    };

    let handler = Closure::<dyn FnMut(web_sys::CustomEvent)>::new(
        move |event: web_sys::CustomEvent| {
            let Some(url) = event.detail().as_string() else {
                return;
            };
            let navigate = navigate.clone();
            handle_url_open(&url, &bridge, move |path| navigate(path));
        },
    );

    if window
        .add_event_listener_with_callback("app-url-open", handler.as_ref().unchecked_ref())
        .is_ok()
    {
        handler.forget();
    }
}

use super::*;
use std::cell::Cell;

fn jwt(sub: &str, email: &str) -> String {
    encode_unsigned_jwt_for_tests(sub, email)
}

// =============================================================
// Claims decoding
// =============================================================

#[test]
fn decode_claims_reads_sub_and_email() {
    let token = jwt("u-42", "doc@example.cl");
    let claims = decode_claims(&token).expect("claims");
    assert_eq!(claims.sub, "u-42");
    assert_eq!(claims.email.as_deref(), Some("doc@example.cl"));
}

#[test]
fn decode_claims_rejects_malformed_tokens() {
    assert!(matches!(
        decode_claims("not-a-jwt"),
        Err(AuthError::MalformedToken)
    ));
    assert!(matches!(
        decode_claims("a.!!notbase64!!.c"),
        Err(AuthError::MalformedToken)
    ));
    assert!(matches!(decode_claims(""), Err(AuthError::MalformedToken)));
}

#[test]
fn decode_claims_tolerates_missing_email() {
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .encode(serde_json::json!({ "sub": "u-1" }).to_string());
    let claims = decode_claims(&format!("h.{payload}.s")).expect("claims");
    assert_eq!(claims.sub, "u-1");
    assert!(claims.email.is_none());
}

// =============================================================
// set_session / subscription
// =============================================================

#[test]
fn set_session_stores_identity_from_claims() {
    let bridge = AuthBridge::new();
    bridge
        .set_session(&jwt("u-1", "doc@example.cl"), "rt-1")
        .expect("session");

    let session = bridge.current_session().expect("session");
    assert_eq!(session.user_id, "u-1");
    assert_eq!(session.email, "doc@example.cl");
    assert_eq!(session.refresh_token, "rt-1");
}

#[test]
fn set_session_notifies_subscribers() {
    let bridge = AuthBridge::new();
    let seen = std::rc::Rc::new(Cell::new(0u32));

    let seen2 = seen.clone();
    bridge.on_session_change(move |s| {
        assert!(s.is_some());
        seen2.set(seen2.get() + 1);
    });

    bridge.set_session(&jwt("u-1", "a@b.cl"), "rt").unwrap();
    assert_eq!(seen.get(), 1);
}

#[test]
fn set_session_same_pair_is_idempotent() {
    let bridge = AuthBridge::new();
    let access = jwt("u-1", "a@b.cl");

    bridge.set_session(&access, "rt").unwrap();
    let first = bridge.current_session();
    bridge.set_session(&access, "rt").unwrap();

    assert_eq!(bridge.current_session(), first);
}

#[test]
fn set_session_malformed_token_leaves_state_unchanged() {
    let bridge = AuthBridge::new();
    bridge.set_session(&jwt("u-1", "a@b.cl"), "rt").unwrap();

    let before = bridge.current_session();
    assert!(bridge.set_session("broken", "rt-2").is_err());
    assert_eq!(bridge.current_session(), before);
}

#[test]
fn replay_delivers_current_state() {
    let bridge = AuthBridge::new();
    bridge.set_session(&jwt("u-1", "a@b.cl"), "rt").unwrap();

    let replayed = std::rc::Rc::new(Cell::new(false));
    let replayed2 = replayed.clone();
    bridge.on_session_change(move |s| {
        replayed2.set(s.is_some());
    });

    bridge.replay();
    assert!(replayed.get());
}

#[test]
fn replay_without_session_delivers_none() {
    let bridge = AuthBridge::new();

    let called = std::rc::Rc::new(Cell::new(false));
    let called2 = called.clone();
    bridge.on_session_change(move |s| {
        assert!(s.is_none());
        called2.set(true);
    });

    bridge.replay();
    assert!(called.get());
}

// =============================================================
// Authorize URL
// =============================================================

#[test]
fn google_authorize_url_targets_deep_link_scheme() {
    let url = google_authorize_url();
    assert!(url.contains("/auth/v1/authorize?provider=google"));
    assert!(url.ends_with(crate::auth::deep_link::AUTH_DEEP_LINK_PREFIX));
}

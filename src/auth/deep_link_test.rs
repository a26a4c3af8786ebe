use super::*;

const LINK: &str =
    "com.bitacora.medica://google-auth#access_token=at-123&refresh_token=rt-456";

// =============================================================
// parse_oauth_deep_link
// =============================================================

#[test]
fn parse_extracts_both_tokens_from_fragment() {
    let pair = parse_oauth_deep_link(LINK).expect("token pair");
    assert_eq!(pair.access_token, "at-123");
    assert_eq!(pair.refresh_token, "rt-456");
}

#[test]
fn parse_accepts_query_style_separator() {
    let pair = parse_oauth_deep_link(
        "com.bitacora.medica://google-auth?refresh_token=rt&access_token=at",
    )
    .expect("token pair");
    assert_eq!(pair.access_token, "at");
    assert_eq!(pair.refresh_token, "rt");
}

#[test]
fn parse_ignores_unknown_params() {
    let pair = parse_oauth_deep_link(
        "com.bitacora.medica://google-auth#expires_in=3600&access_token=at&token_type=bearer&refresh_token=rt",
    )
    .expect("token pair");
    assert_eq!(pair.access_token, "at");
    assert_eq!(pair.refresh_token, "rt");
}

#[test]
fn parse_rejects_foreign_scheme() {
    assert!(parse_oauth_deep_link("https://example.com/#access_token=a&refresh_token=b").is_none());
    assert!(parse_oauth_deep_link("com.bitacora.medica://reset-password#access_token=a&refresh_token=b").is_none());
}

#[test]
fn parse_rejects_missing_or_empty_tokens() {
    assert!(parse_oauth_deep_link("com.bitacora.medica://google-auth#access_token=a").is_none());
    assert!(parse_oauth_deep_link("com.bitacora.medica://google-auth#refresh_token=b").is_none());
    assert!(parse_oauth_deep_link("com.bitacora.medica://google-auth#access_token=&refresh_token=b").is_none());
    assert!(parse_oauth_deep_link("com.bitacora.medica://google-auth").is_none());
}

// =============================================================
// handle_url_open
// =============================================================

fn test_jwt(sub: &str, email: &str) -> String {
    crate::auth::bridge::encode_unsigned_jwt_for_tests(sub, email)
}

#[test]
fn handle_navigates_to_dashboard_on_success() {
    let bridge = AuthBridge::new();
    let access = test_jwt("u-1", "doc@example.cl");
    let url = format!(
        "com.bitacora.medica://google-auth#access_token={access}&refresh_token=rt"
    );

    let mut navigated = None;
    handle_url_open(&url, &bridge, |path| navigated = Some(path.to_owned()));

    assert_eq!(navigated.as_deref(), Some("/dashboard"));
    assert!(bridge.current_session().is_some());
}

#[test]
fn handle_same_link_twice_is_idempotent() {
    let bridge = AuthBridge::new();
    let access = test_jwt("u-1", "doc@example.cl");
    let url = format!(
        "com.bitacora.medica://google-auth#access_token={access}&refresh_token=rt"
    );

    handle_url_open(&url, &bridge, |_| {});
    let first = bridge.current_session();
    handle_url_open(&url, &bridge, |_| {});

    assert_eq!(bridge.current_session(), first);
}

#[test]
fn handle_ignores_unrelated_urls() {
    let bridge = AuthBridge::new();
    let mut navigated = false;
    handle_url_open("https://example.com/", &bridge, |_| navigated = true);

    assert!(!navigated);
    assert!(bridge.current_session().is_none());
}

#[test]
fn handle_bad_token_leaves_session_untouched() {
    let bridge = AuthBridge::new();
    let good = test_jwt("u-1", "doc@example.cl");
    let _ = bridge.set_session(&good, "rt");

    // Malformed access token: bridge rejects, existing session stands.
    let mut navigated = false;
    handle_url_open(
        "com.bitacora.medica://google-auth#access_token=not-a-jwt&refresh_token=rt2",
        &bridge,
        |_| navigated = true,
    );

    assert!(!navigated);
    let session = bridge.current_session().expect("session kept");
    assert_eq!(session.access_token, good);
}

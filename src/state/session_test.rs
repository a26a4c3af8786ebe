use super::*;
use crate::net::types::{ProfileStatus, Role};

fn user() -> User {
    User {
        id: "u-1".to_owned(),
        email: "doc@example.cl".to_owned(),
        role: Role::Professional,
    }
}

fn active_profile() -> UserProfile {
    UserProfile {
        status: ProfileStatus::Active,
        phone: "123".to_owned(),
        ..UserProfile::default()
    }
}

// =============================================================
// Defaults and invariant
// =============================================================

#[test]
fn default_state_is_anonymous() {
    let s = SessionState::default();
    assert!(s.token.is_none());
    assert!(s.user.is_none());
    assert!(s.profile.is_none());
    assert!(!s.is_authenticated);
}

#[test]
fn set_auth_marks_authenticated_with_token_and_user() {
    let mut s = SessionState::default();
    s.set_auth("tok".to_owned(), user(), active_profile());

    assert_eq!(s.token.as_deref(), Some("tok"));
    assert!(s.user.is_some());
    assert!(s.is_authenticated);
}

#[test]
fn set_auth_replaces_wholesale() {
    let mut s = SessionState::default();
    s.set_auth("tok-1".to_owned(), user(), active_profile());

    let other = User {
        id: "u-2".to_owned(),
        email: "otro@example.cl".to_owned(),
        role: Role::Admin,
    };
    s.set_auth("tok-2".to_owned(), other.clone(), UserProfile::default());

    assert_eq!(s.token.as_deref(), Some("tok-2"));
    assert_eq!(s.user, Some(other));
    assert_eq!(s.profile.as_ref().map(|p| p.status), Some(ProfileStatus::Inactive));
}

// =============================================================
// update_profile
// =============================================================

#[test]
fn update_profile_merges_into_existing() {
    let mut s = SessionState::default();
    s.set_auth("tok".to_owned(), user(), active_profile());

    s.update_profile(&ProfilePatch {
        specialty: Some("Kinesiología".to_owned()),
        ..ProfilePatch::default()
    });

    let profile = s.profile.expect("profile");
    assert_eq!(profile.status, ProfileStatus::Active);
    assert_eq!(profile.phone, "123");
    assert_eq!(profile.specialty, "Kinesiología");
}

#[test]
fn update_profile_without_profile_is_noop() {
    let mut s = SessionState::default();
    s.update_profile(&ProfilePatch {
        specialty: Some("Kinesiología".to_owned()),
        ..ProfilePatch::default()
    });
    assert!(s.profile.is_none());
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_resets_all_fields_from_any_state() {
    let mut s = SessionState::default();
    s.set_auth("tok".to_owned(), user(), active_profile());
    s.logout();

    assert_eq!(s, SessionState::default());

    // Logging out an already-anonymous session stays anonymous.
    s.logout();
    assert_eq!(s, SessionState::default());
}

#[test]
fn state_round_trips_through_serde() {
    let mut s = SessionState::default();
    s.set_auth("tok".to_owned(), user(), active_profile());

    let json = serde_json::to_string(&s).unwrap();
    let back: SessionState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, s);
}

use super::*;
use serde_json::json;

// =============================================================
// SyncGate
// =============================================================

#[test]
fn gate_allows_first_sync_and_blocks_repeat() {
    let mut gate = SyncGate::default();
    assert!(gate.should_sync("abc123"));
    assert!(!gate.should_sync("abc123"));
    assert!(!gate.should_sync("abc123"));
}

#[test]
fn gate_marks_before_returning_so_reentrant_call_skips() {
    // The marker is written by the first call itself; a re-entrant second
    // call for the same token must observe it without any await in between.
    let mut gate = SyncGate::default();
    assert!(gate.should_sync("tok"));
    assert!(!gate.should_sync("tok"));
}

#[test]
fn gate_allows_a_different_token() {
    let mut gate = SyncGate::default();
    assert!(gate.should_sync("tok-1"));
    assert!(gate.should_sync("tok-2"));
    assert!(!gate.should_sync("tok-2"));
}

#[test]
fn gate_reset_allows_the_same_token_again() {
    let mut gate = SyncGate::default();
    assert!(gate.should_sync("tok"));
    gate.reset();
    assert!(gate.should_sync("tok"));
}

// =============================================================
// Placeholder session
// =============================================================

#[test]
fn placeholder_is_low_privilege_and_inactive() {
    let bridge_session = crate::auth::bridge::BridgeSession {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        user_id: "u-1".to_owned(),
        email: "doc@example.cl".to_owned(),
    };

    let user = placeholder_user(&bridge_session);
    assert_eq!(user.id, "u-1");
    assert_eq!(user.email, "doc@example.cl");
    assert_eq!(user.role, Role::Professional);

    assert_eq!(placeholder_profile().status, ProfileStatus::Inactive);
}

// =============================================================
// normalize_me_payload — key variants
// =============================================================

#[test]
fn normalize_pascal_case_payload() {
    let raw = json!({
        "User": {
            "ID": "u-1",
            "Email": "doc@example.cl",
            "Role": "ADMIN",
            "Status": "ACTIVE"
        }
    });

    let (user, profile) = normalize_me_payload(&raw).expect("normalized");
    assert_eq!(user.id, "u-1");
    assert_eq!(user.email, "doc@example.cl");
    assert_eq!(user.role, Role::Admin);
    assert_eq!(profile.status, ProfileStatus::Active);
}

#[test]
fn normalize_lowercase_payload() {
    let raw = json!({
        "user": {
            "id": "u-1",
            "email": "doc@example.cl",
            "role": "PROFESSIONAL",
            "status": "INACTIVE"
        }
    });

    let (user, profile) = normalize_me_payload(&raw).expect("normalized");
    assert_eq!(user.id, "u-1");
    assert_eq!(user.email, "doc@example.cl");
    assert_eq!(user.role, Role::Professional);
    assert_eq!(profile.status, ProfileStatus::Inactive);
}

#[test]
fn normalize_prefers_pascal_case_when_both_present() {
    let raw = json!({
        "user": {
            "ID": "pascal",
            "id": "lower",
            "Email": "pascal@example.cl",
            "email": "lower@example.cl",
            "Role": "ADMIN",
            "role": "PROFESSIONAL"
        }
    });

    let (user, _) = normalize_me_payload(&raw).expect("normalized");
    assert_eq!(user.id, "pascal");
    assert_eq!(user.email, "pascal@example.cl");
    assert_eq!(user.role, Role::Admin);
}

#[test]
fn normalize_profile_from_object() {
    let raw = json!({
        "user": {
            "id": "u-1",
            "email": "doc@example.cl",
            "role": "PROFESSIONAL",
            "status": "ACTIVE",
            "profile_data": {
                "full_name": "Ana Rojas",
                "specialty": "Kinesiología",
                "phone": "+56 9 1234 5678",
                "rut": "12.345.678-5",
                "university": "U. de Chile"
            }
        }
    });

    let (_, profile) = normalize_me_payload(&raw).expect("normalized");
    assert_eq!(profile.full_name.as_deref(), Some("Ana Rojas"));
    assert_eq!(profile.specialty, "Kinesiología");
    assert_eq!(profile.phone, "+56 9 1234 5678");
    assert_eq!(profile.rut.as_deref(), Some("12.345.678-5"));
    assert_eq!(profile.university.as_deref(), Some("U. de Chile"));
}

#[test]
fn normalize_profile_from_string_encoded_json() {
    let raw = json!({
        "user": {
            "id": "u-1",
            "email": "doc@example.cl",
            "role": "PROFESSIONAL",
            "ProfileData": "{\"full_name\":\"Ana Rojas\",\"specialty\":\"Fonoaudiología\"}"
        }
    });

    let (_, profile) = normalize_me_payload(&raw).expect("normalized");
    assert_eq!(profile.full_name.as_deref(), Some("Ana Rojas"));
    assert_eq!(profile.specialty, "Fonoaudiología");
}

#[test]
fn normalize_full_name_falls_back_to_name_alias() {
    let raw = json!({
        "user": {
            "id": "u-1",
            "email": "doc@example.cl",
            "role": "PROFESSIONAL",
            "profile_data": { "name": "Ana Rojas" }
        }
    });

    let (_, profile) = normalize_me_payload(&raw).expect("normalized");
    assert_eq!(profile.full_name.as_deref(), Some("Ana Rojas"));
}

#[test]
fn normalize_avatar_prefers_user_level_then_profile_then_picture() {
    let with_user_level = json!({
        "user": {
            "id": "u", "email": "e@x.cl", "role": "PROFESSIONAL",
            "AvatarURL": "https://cdn/user.png",
            "profile_data": { "avatar_url": "https://cdn/profile.png" }
        }
    });
    let (_, profile) = normalize_me_payload(&with_user_level).unwrap();
    assert_eq!(profile.avatar_url.as_deref(), Some("https://cdn/user.png"));

    let with_picture = json!({
        "user": {
            "id": "u", "email": "e@x.cl", "role": "PROFESSIONAL",
            "profile_data": { "picture": "https://cdn/picture.png" }
        }
    });
    let (_, profile) = normalize_me_payload(&with_picture).unwrap();
    assert_eq!(profile.avatar_url.as_deref(), Some("https://cdn/picture.png"));
}

#[test]
fn normalize_missing_status_defaults_to_inactive() {
    let raw = json!({
        "user": { "id": "u-1", "email": "doc@example.cl", "role": "PROFESSIONAL" }
    });

    let (_, profile) = normalize_me_payload(&raw).expect("normalized");
    assert_eq!(profile.status, ProfileStatus::Inactive);
}

#[test]
fn normalize_garbled_profile_string_degrades_to_empty() {
    let raw = json!({
        "user": {
            "id": "u-1",
            "email": "doc@example.cl",
            "role": "PROFESSIONAL",
            "profile_data": "{not json"
        }
    });

    let (_, profile) = normalize_me_payload(&raw).expect("normalized");
    assert!(profile.full_name.is_none());
    assert_eq!(profile.specialty, "");
}

// =============================================================
// normalize_me_payload — errors
// =============================================================

#[test]
fn normalize_without_user_object_fails() {
    let raw = json!({ "data": { "id": "u-1" } });
    assert_eq!(normalize_me_payload(&raw), Err(NormalizeError::MissingUser));
}

#[test]
fn normalize_reports_missing_required_fields() {
    let raw = json!({ "user": { "email": "doc@example.cl", "role": "ADMIN" } });
    assert_eq!(
        normalize_me_payload(&raw),
        Err(NormalizeError::MissingField("id"))
    );

    let raw = json!({ "user": { "id": "u-1", "role": "ADMIN" } });
    assert_eq!(
        normalize_me_payload(&raw),
        Err(NormalizeError::MissingField("email"))
    );

    let raw = json!({ "user": { "id": "u-1", "email": "doc@example.cl" } });
    assert_eq!(
        normalize_me_payload(&raw),
        Err(NormalizeError::MissingField("role"))
    );
}

#[test]
fn normalize_rejects_unknown_role() {
    let raw = json!({
        "user": { "id": "u-1", "email": "doc@example.cl", "role": "SUPERUSER" }
    });
    assert_eq!(
        normalize_me_payload(&raw),
        Err(NormalizeError::UnknownRole("SUPERUSER".to_owned()))
    );
}

// =============================================================
// apply_fetch_result — error handling per outcome
// =============================================================

use crate::net::api::ApiError;
use crate::state::session::SessionState;

fn placeholder_state(token: &str) -> SessionState {
    let bridge_session = crate::auth::bridge::BridgeSession {
        access_token: token.to_owned(),
        refresh_token: "rt".to_owned(),
        user_id: "u-1".to_owned(),
        email: "doc@example.cl".to_owned(),
    };
    let mut state = SessionState::default();
    state.set_auth(
        token.to_owned(),
        placeholder_user(&bridge_session),
        placeholder_profile(),
    );
    state
}

#[test]
fn apply_commits_normalized_session_on_success() {
    let mut state = placeholder_state("tok");
    let result = Ok(json!({
        "user": { "id": "u-1", "email": "doc@example.cl", "role": "ADMIN", "status": "ACTIVE" }
    }));

    assert_eq!(apply_fetch_result(&result, "tok", &mut state), SyncOutcome::Synced);
    assert_eq!(state.user.as_ref().map(|u| u.role), Some(Role::Admin));
    assert_eq!(
        state.profile.as_ref().map(|p| p.status),
        Some(ProfileStatus::Active)
    );
}

#[test]
fn apply_403_keeps_placeholder_and_stays_authenticated() {
    let mut state = placeholder_state("tok");
    let result = Err(ApiError::Status(403));

    assert_eq!(
        apply_fetch_result(&result, "tok", &mut state),
        SyncOutcome::PendingApproval
    );
    assert!(state.is_authenticated);
    assert_eq!(state.token.as_deref(), Some("tok"));
    assert_eq!(
        state.profile.as_ref().map(|p| p.status),
        Some(ProfileStatus::Inactive)
    );
}

#[test]
fn apply_500_clears_the_session() {
    let mut state = placeholder_state("tok");
    let result = Err(ApiError::Status(500));

    assert_eq!(apply_fetch_result(&result, "tok", &mut state), SyncOutcome::Failed);
    assert!(!state.is_authenticated);
    assert_eq!(state, SessionState::default());
}

#[test]
fn apply_network_error_clears_the_session() {
    let mut state = placeholder_state("tok");
    let result = Err(ApiError::Network("connection refused".to_owned()));

    assert_eq!(apply_fetch_result(&result, "tok", &mut state), SyncOutcome::Failed);
    assert_eq!(state, SessionState::default());
}

#[test]
fn apply_unusable_payload_keeps_placeholder() {
    let mut state = placeholder_state("tok");
    let result = Ok(json!({ "message": "ok" }));

    assert_eq!(
        apply_fetch_result(&result, "tok", &mut state),
        SyncOutcome::NormalizeFailed
    );
    assert!(state.is_authenticated);
    assert_eq!(
        state.user.as_ref().map(|u| u.role),
        Some(Role::Professional)
    );
}

#[test]
fn apply_stale_result_does_not_resurrect_a_logged_out_session() {
    // Logout landed while the fetch was in flight.
    let mut state = SessionState::default();
    let result = Ok(json!({
        "user": { "id": "u-1", "email": "doc@example.cl", "role": "ADMIN", "status": "ACTIVE" }
    }));

    assert_eq!(
        apply_fetch_result(&result, "tok", &mut state),
        SyncOutcome::Superseded
    );
    assert_eq!(state, SessionState::default());
}

#[test]
fn apply_stale_result_does_not_clobber_a_newer_session() {
    let mut state = placeholder_state("tok-new");
    let result = Ok(json!({
        "user": { "id": "u-old", "email": "old@example.cl", "role": "ADMIN" }
    }));

    assert_eq!(
        apply_fetch_result(&result, "tok-old", &mut state),
        SyncOutcome::Superseded
    );
    assert_eq!(state.token.as_deref(), Some("tok-new"));
    assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("u-1"));
}

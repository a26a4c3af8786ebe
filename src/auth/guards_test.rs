use super::*;
use crate::net::types::{Role, User, UserProfile};

fn authed(status: ProfileStatus) -> SessionState {
    let mut s = SessionState::default();
    s.set_auth(
        "tok".to_owned(),
        User {
            id: "u-1".to_owned(),
            email: "doc@example.cl".to_owned(),
            role: Role::Professional,
        },
        UserProfile {
            status,
            ..UserProfile::default()
        },
    );
    s
}

// =============================================================
// protected_gate
// =============================================================

#[test]
fn anonymous_is_sent_to_login() {
    assert_eq!(protected_gate(&SessionState::default()), RouteGate::ToLogin);
}

#[test]
fn inactive_profile_is_sent_to_pending_never_allowed() {
    assert_eq!(
        protected_gate(&authed(ProfileStatus::Inactive)),
        RouteGate::ToPending
    );
}

#[test]
fn active_profile_is_allowed() {
    assert_eq!(
        protected_gate(&authed(ProfileStatus::Active)),
        RouteGate::Allow
    );
}

#[test]
fn authenticated_without_profile_is_allowed() {
    // No profile at all (e.g. store restored mid-sync): authentication is the
    // only criterion the protected gate can apply.
    let mut s = authed(ProfileStatus::Active);
    s.profile = None;
    assert_eq!(protected_gate(&s), RouteGate::Allow);
}

// =============================================================
// pre_auth_gate
// =============================================================

#[test]
fn active_user_is_bounced_off_pre_auth_screens() {
    assert_eq!(
        pre_auth_gate(&authed(ProfileStatus::Active)),
        RouteGate::ToDashboard
    );
}

#[test]
fn pending_user_may_stay_on_pre_auth_screens() {
    assert_eq!(
        pre_auth_gate(&authed(ProfileStatus::Inactive)),
        RouteGate::Allow
    );
}

#[test]
fn anonymous_may_stay_on_pre_auth_screens() {
    assert_eq!(pre_auth_gate(&SessionState::default()), RouteGate::Allow);
}

// =============================================================
// State machine walk: ANONYMOUS → PENDING_APPROVAL → ACTIVE
// =============================================================

#[test]
fn approval_state_machine_has_no_forward_shortcut() {
    // ANONYMOUS
    let mut s = SessionState::default();
    assert_eq!(protected_gate(&s), RouteGate::ToLogin);

    // Sync lands with INACTIVE: PENDING_APPROVAL, dashboard unreachable.
    s = authed(ProfileStatus::Inactive);
    assert_eq!(protected_gate(&s), RouteGate::ToPending);
    assert_eq!(pre_auth_gate(&s), RouteGate::Allow);

    // Only a re-sync reporting ACTIVE opens the dashboard.
    s = authed(ProfileStatus::Active);
    assert_eq!(protected_gate(&s), RouteGate::Allow);
    assert_eq!(pre_auth_gate(&s), RouteGate::ToDashboard);

    // Logout from any state returns to ANONYMOUS.
    s.logout();
    assert_eq!(protected_gate(&s), RouteGate::ToLogin);
    assert_eq!(pre_auth_gate(&s), RouteGate::Allow);
}

//! Route guards evaluated on every navigation.
//!
//! Approval moves an account through three states: anonymous, pending
//! approval, active. The gates below are pure functions over the session
//! store; the components wrap them for the router. A freshly-synced inactive
//! profile can only reach the main app through a later re-sync that reports
//! `ACTIVE` — there is no forward shortcut.

#[cfg(test)]
#[path = "guards_test.rs"]
mod guards_test;

use leptos::prelude::*;
use leptos_router::components::{Outlet, Redirect};

use crate::net::types::ProfileStatus;
use crate::state::session::SessionState;

/// Where a navigation attempt should land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteGate {
    Allow,
    ToLogin,
    ToPending,
    ToDashboard,
}

/// Gate for the authenticated area (`/dashboard` tree).
pub fn protected_gate(session: &SessionState) -> RouteGate {
    if !session.is_authenticated {
        return RouteGate::ToLogin;
    }
    if session
        .profile
        .as_ref()
        .is_some_and(|p| p.status == ProfileStatus::Inactive)
    {
        return RouteGate::ToPending;
    }
    RouteGate::Allow
}

/// Gate for the pre-authentication screens (login, pending approval).
///
/// An authenticated, approved user has no business on either screen.
pub fn pre_auth_gate(session: &SessionState) -> RouteGate {
    let active = session.is_authenticated
        && session
            .profile
            .as_ref()
            .is_some_and(|p| p.status == ProfileStatus::Active);
    if active {
        RouteGate::ToDashboard
    } else {
        RouteGate::Allow
    }
}

/// Router shell for the authenticated area: renders the nested routes or
/// redirects according to `protected_gate`.
#[component]
pub fn ProtectedRoutes() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    move || match protected_gate(&session.get()) {
        RouteGate::ToLogin => view! { <Redirect path="/auth/login"/> }.into_any(),
        RouteGate::ToPending => view! { <Redirect path="/pending-approval"/> }.into_any(),
        _ => view! { <Outlet/> }.into_any(),
    }
}

/// Router shell for the login and pending-approval screens.
#[component]
pub fn PreAuthRoutes() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    move || match pre_auth_gate(&session.get()) {
        RouteGate::ToDashboard => view! { <Redirect path="/dashboard"/> }.into_any(),
        _ => view! { <Outlet/> }.into_any(),
    }
}

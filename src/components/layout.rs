//! Authenticated shell: fixed sidebar, header, and routed content area.

use leptos::prelude::*;
use leptos_router::components::Outlet;

use crate::net::types::Role;
use crate::state::session::SessionState;

/// Layout for every page under `/dashboard`.
#[component]
pub fn DashboardLayout() -> impl IntoView {
    let collapsed = RwSignal::new(false);

    view! {
        <div class="app-shell">
            <Sidebar collapsed=collapsed/>
            <Header collapsed=collapsed/>
            <main class=move || {
                if collapsed.get() { "app-shell__main app-shell__main--wide" } else { "app-shell__main" }
            }>
                <Outlet/>
            </main>
        </div>
    }
}

/// Side navigation. The admin entry only renders for admin accounts.
#[component]
fn Sidebar(collapsed: RwSignal<bool>) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let is_admin = move || {
        session
            .get()
            .user
            .as_ref()
            .is_some_and(|u| u.role == Role::Admin)
    };

    view! {
        <nav class=move || {
            if collapsed.get() { "sidebar sidebar--collapsed" } else { "sidebar" }
        }>
            <div class="sidebar__brand">
                <span class="sidebar__logo">"+"</span>
                <span class="sidebar__title">"Bitácora Médica"</span>
            </div>

            <a href="/dashboard" class="sidebar__link">"Inicio"</a>
            <a href="/dashboard/patients" class="sidebar__link">"Pacientes"</a>
            <Show when=is_admin>
                <a href="/dashboard/admin" class="sidebar__link">"Administración"</a>
            </Show>
            <a href="/dashboard/support" class="sidebar__link">"Soporte"</a>
            <a href="/dashboard/settings" class="sidebar__link">"Mi Perfil"</a>

            <div class="sidebar__spacer"></div>
            <LogoutButton/>
        </nav>
    }
}

/// Top bar: collapse toggle, professional name, theme switch.
#[component]
fn Header(collapsed: RwSignal<bool>) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let theme = RwSignal::new(crate::util::theme::read_preference());

    let display_name = move || {
        let state = session.get();
        state
            .profile
            .as_ref()
            .and_then(|p| p.full_name.clone())
            .or_else(|| state.user.as_ref().map(|u| u.email.clone()))
            .unwrap_or_default()
    };

    view! {
        <header class="topbar">
            <button
                class="topbar__toggle"
                on:click=move |_| collapsed.update(|c| *c = !*c)
            >
                "☰"
            </button>
            <span class="topbar__spacer"></span>
            <button
                class="topbar__theme"
                on:click=move |_| theme.set(crate::util::theme::toggle(theme.get()))
            >
                {move || if theme.get().is_dark() { "Claro" } else { "Oscuro" }}
            </button>
            <span class="topbar__user">{display_name}</span>
        </header>
    }
}

/// Sign out through the bridge; the session-change subscription clears the
/// store and the guards take the user back to the login screen.
#[component]
pub fn LogoutButton() -> impl IntoView {
    let bridge = expect_context::<crate::auth::bridge::AuthBridge>();

    let on_click = move |_| {
        let bridge = bridge.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = bridge.sign_out().await {
                leptos::logging::warn!("sign out failed: {e}");
            }
        });
    };

    view! {
        <button class="sidebar__logout" on:click=on_click>
            "Cerrar sesión"
        </button>
    }
}

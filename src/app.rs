//! Root application component: shared contexts, auth wiring, and routing.
//!
//! STARTUP SEQUENCE
//! ================
//! 1. Restore the persisted session store and identity-provider session.
//! 2. Subscribe to the bridge: a live session triggers a backend sync, a
//!    `None` tick clears the store without a network round-trip.
//! 3. Replay the restored bridge state so step 2 fires once immediately.
//! 4. Render a blocking "initializing" screen until the first sync resolves;
//!    afterwards the store is the single source of truth and later syncs run
//!    behind the optimistic placeholder.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, Redirect, Route, Router, Routes},
};

use crate::auth::bridge::AuthBridge;
use crate::auth::guards::{PreAuthRoutes, ProtectedRoutes};
use crate::components::layout::DashboardLayout;
use crate::pages::{
    admin::AdminPage, dashboard::DashboardPage, login::LoginPage,
    patient_detail::PatientDetailPage, patient_form::PatientFormPage,
    patients::PatientListPage, pending_approval::PendingApprovalPage, profile::ProfilePage,
    support::SupportPage,
};
use crate::state::session;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(session::load_persisted().unwrap_or_default());
    provide_context(session);

    let bridge = AuthBridge::new();
    bridge.restore_persisted();
    provide_context(bridge.clone());

    crate::util::theme::apply(crate::util::theme::read_preference());

    // Blocks the UI until the first sync resolves, one way or the other.
    let ready = RwSignal::new(cfg!(not(feature = "hydrate")));

    #[cfg(feature = "hydrate")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;

        let gate = Rc::new(RefCell::new(crate::auth::sync::SyncGate::default()));
        bridge.on_session_change(move |bridge_session| match bridge_session {
            Some(bs) => {
                let bs = bs.clone();
                let gate = gate.clone();
                leptos::task::spawn_local(async move {
                    let _ = crate::auth::sync::sync_with_backend(session, &gate, &bs).await;
                    ready.set(true);
                });
            }
            None => {
                gate.borrow_mut().reset();
                session::write(session, session::SessionState::logout);
                ready.set(true);
            }
        });

        bridge.replay();
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/bitacora-client.css"/>
        <Title text="Bitácora Médica"/>

        <Show
            when=move || ready.get()
            fallback=|| {
                view! {
                    <div class="boot-screen">
                        <div class="boot-screen__spinner"></div>
                        <p>"Iniciando sistema..."</p>
                    </div>
                }
            }
        >
            <Router>
                <DeepLinkListener/>
                <Routes fallback=|| "Página no encontrada.".into_view()>
                    <ParentRoute path=StaticSegment("auth") view=PreAuthRoutes>
                        <Route path=StaticSegment("login") view=LoginPage/>
                    </ParentRoute>
                    <ParentRoute path=StaticSegment("pending-approval") view=PreAuthRoutes>
                        <Route path=StaticSegment("") view=PendingApprovalPage/>
                    </ParentRoute>
                    <Route
                        path=StaticSegment("")
                        view=|| view! { <Redirect path="/dashboard"/> }
                    />
                    <ParentRoute path=StaticSegment("dashboard") view=ProtectedRoutes>
                        <ParentRoute path=StaticSegment("") view=DashboardLayout>
                            <Route path=StaticSegment("") view=DashboardPage/>
                            <Route path=StaticSegment("admin") view=AdminPage/>
                            <Route path=StaticSegment("patients") view=PatientListPage/>
                            <Route
                                path=(StaticSegment("patients"), StaticSegment("new"))
                                view=PatientFormPage
                            />
                            <Route
                                path=(StaticSegment("patients"), ParamSegment("id"))
                                view=PatientDetailPage
                            />
                            <Route path=StaticSegment("support") view=SupportPage/>
                            <Route path=StaticSegment("settings") view=ProfilePage/>
                        </ParentRoute>
                    </ParentRoute>
                </Routes>
            </Router>
        </Show>
    }
}

/// Installs the native-shell URL-open listener once the router exists, so
/// the deep-link handler can navigate after a successful sign-in.
#[component]
fn DeepLinkListener() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    {
        use leptos_router::hooks::use_navigate;

        let bridge = expect_context::<AuthBridge>();
        let navigate = use_navigate();
        crate::auth::deep_link::install_url_open_listener(bridge, move |path| {
            navigate(path, leptos_router::NavigateOptions::default());
        });
    }
}

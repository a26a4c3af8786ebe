//! Login page: email/password sign-in plus the external Google OAuth flow.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::auth::bridge::{AuthBridge, google_authorize_url};
use crate::components::form::{FormError, TextField};

/// Login page. Password sign-in goes through the identity provider bridge;
/// the Google button leaves the app for the provider's authorize page, which
/// re-enters through the deep link.
#[component]
pub fn LoginPage() -> impl IntoView {
    let bridge = expect_context::<AuthBridge>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get() || email.get().trim().is_empty() || password.get().is_empty() {
            return;
        }

        pending.set(true);
        error.set(None);

        let bridge = bridge.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match bridge
                .sign_in_with_password(email.get_untracked().trim(), &password.get_untracked())
                .await
            {
                Ok(()) => navigate("/dashboard", NavigateOptions::default()),
                Err(e) => {
                    leptos::logging::warn!("password sign-in failed: {e}");
                    error.set(Some("Credenciales inválidas o cuenta inexistente.".to_owned()));
                }
            }
            pending.set(false);
        });
    };

    let on_google = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(&google_authorize_url());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = google_authorize_url();
        }
    };

    view! {
        <div class="login-page">
            <div class="login-page__card">
                <h1 class="login-page__logo">"Bitácora Médica"</h1>
                <h2>"¡Hola de nuevo!"</h2>
                <p class="login-page__hint">"Ingresa a tu cuenta para continuar"</p>

                <form on:submit=on_submit>
                    <TextField label="Correo electrónico" value=email kind="email"/>
                    <TextField label="Contraseña" value=password kind="password"/>
                    <FormError error=error/>
                    <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                        {move || if pending.get() { "Ingresando..." } else { "Ingresar" }}
                    </button>
                </form>

                <div class="login-page__divider">"o"</div>
                <button class="btn btn--google" on:click=on_google>
                    "Continuar con Google"
                </button>
            </div>
        </div>
    }
}

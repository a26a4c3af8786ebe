//! Profile settings for an approved account.

use leptos::prelude::*;

use crate::components::form::{FormError, TextAreaField, TextField};
use crate::net::types::ProfilePatch;
use crate::state::session::{self, SessionState};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let profile = session.get_untracked().profile.unwrap_or_default();
    let full_name = RwSignal::new(profile.full_name.unwrap_or_default());
    let specialty = RwSignal::new(profile.specialty);
    let phone = RwSignal::new(profile.phone);
    let university = RwSignal::new(profile.university.unwrap_or_default());
    let bio = RwSignal::new(profile.bio.unwrap_or_default());

    let error = RwSignal::new(None::<String>);
    let saved = RwSignal::new(false);
    let pending = RwSignal::new(false);

    let email = move || {
        session
            .get()
            .user
            .as_ref()
            .map(|u| u.email.clone())
            .unwrap_or_default()
    };
    let avatar = move || {
        session
            .get()
            .profile
            .as_ref()
            .and_then(|p| p.avatar_url.clone())
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        if full_name.get().trim().is_empty() {
            error.set(Some("El nombre completo es requerido".to_owned()));
            return;
        }

        let patch = ProfilePatch {
            full_name: Some(full_name.get().trim().to_owned()),
            specialty: Some(specialty.get().trim().to_owned()),
            phone: Some(phone.get().trim().to_owned()),
            university: Some(university.get().trim().to_owned()),
            bio: Some(bio.get().trim().to_owned()),
            ..ProfilePatch::default()
        };

        pending.set(true);
        error.set(None);
        saved.set(false);
        leptos::task::spawn_local(async move {
            match crate::net::api::update_profile(session, &patch).await {
                Ok(()) => {
                    session::write(session, |s| s.update_profile(&patch));
                    saved.set(true);
                }
                Err(e) => {
                    leptos::logging::error!("profile update failed: {e}");
                    error.set(Some("No pudimos guardar los cambios.".to_owned()));
                }
            }
            pending.set(false);
        });
    };

    view! {
        <div class="profile-page">
            <h1>"Mi Perfil"</h1>

            <div class="profile-page__identity">
                {move || {
                    avatar()
                        .map(|url| view! { <img class="profile-page__avatar" src=url alt="Avatar"/> })
                }}
                <span class="profile-page__email">{email}</span>
            </div>

            <form on:submit=on_submit>
                <TextField label="Nombre completo" value=full_name/>
                <TextField label="Especialidad" value=specialty/>
                <TextField label="Teléfono" value=phone/>
                <TextField label="Universidad de egreso" value=university/>
                <TextAreaField label="Biografía" value=bio/>
                <FormError error=error/>
                <Show when=move || saved.get()>
                    <p class="profile-page__saved">"Cambios guardados."</p>
                </Show>
                <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Guardando..." } else { "Guardar cambios" }}
                </button>
            </form>
        </div>
    }
}

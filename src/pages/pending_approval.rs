//! Pending-approval screen: the account is authenticated but inactive.
//!
//! While an administrator reviews the account, the professional completes
//! their profile here. The saved data merges into the session store so the
//! form stays filled across visits; the status itself only changes through a
//! later backend sync.

use leptos::prelude::*;

use crate::components::form::{FormError, TextAreaField, TextField};
use crate::components::layout::LogoutButton;
use crate::net::types::ProfilePatch;
use crate::state::session::{self, SessionState};
use crate::util::rut::{format_rut, validate_rut};

#[component]
pub fn PendingApprovalPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let profile = session.get_untracked().profile.unwrap_or_default();
    let full_name = RwSignal::new(profile.full_name.unwrap_or_default());
    let specialty = RwSignal::new(profile.specialty);
    let phone = RwSignal::new(profile.phone);
    let rut = RwSignal::new(profile.rut.unwrap_or_default());
    let birth_date = RwSignal::new(profile.birth_date.unwrap_or_default());
    let gender = RwSignal::new(profile.gender.unwrap_or_default());
    let nationality = RwSignal::new(profile.nationality.unwrap_or_default());
    let residence_country = RwSignal::new(profile.residence_country.unwrap_or_default());
    let university = RwSignal::new(profile.university.unwrap_or_default());
    let bio = RwSignal::new(profile.bio.unwrap_or_default());

    let error = RwSignal::new(None::<String>);
    let saved = RwSignal::new(false);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }

        if full_name.get().trim().len() < 3 {
            error.set(Some("El nombre completo es requerido".to_owned()));
            return;
        }
        if specialty.get().trim().len() < 3 {
            error.set(Some("Indica tu especialidad médica".to_owned()));
            return;
        }
        if phone.get().trim().len() < 8 {
            error.set(Some("Teléfono inválido".to_owned()));
            return;
        }
        if !validate_rut(&rut.get()) {
            error.set(Some("RUT inválido".to_owned()));
            return;
        }

        let patch = ProfilePatch {
            full_name: Some(full_name.get().trim().to_owned()),
            specialty: Some(specialty.get().trim().to_owned()),
            phone: Some(phone.get().trim().to_owned()),
            rut: Some(format_rut(&rut.get())),
            birth_date: Some(birth_date.get()),
            gender: Some(gender.get()),
            nationality: Some(nationality.get()),
            residence_country: Some(residence_country.get()),
            university: Some(university.get()),
            bio: Some(bio.get()),
        };

        pending.set(true);
        error.set(None);
        leptos::task::spawn_local(async move {
            match crate::net::api::update_profile(session, &patch).await {
                Ok(()) => {
                    session::write(session, |s| s.update_profile(&patch));
                    saved.set(true);
                }
                Err(e) => {
                    leptos::logging::error!("profile update failed: {e}");
                    error.set(Some("No pudimos guardar tu perfil. Intenta de nuevo.".to_owned()));
                }
            }
            pending.set(false);
        });
    };

    view! {
        <div class="pending-page">
            <div class="pending-page__card">
                <h1>"Cuenta en revisión"</h1>
                <p class="pending-page__hint">
                    "Un administrador revisará tu cuenta. Mientras tanto, completa tu perfil profesional."
                </p>

                <Show when=move || saved.get()>
                    <p class="pending-page__saved">"Perfil guardado. Te avisaremos cuando tu cuenta sea aprobada."</p>
                </Show>

                <form on:submit=on_submit>
                    <TextField label="Nombre completo" value=full_name/>
                    <TextField label="RUT" value=rut placeholder="12.345.678-5"/>
                    <TextField label="Especialidad" value=specialty/>
                    <TextField label="Universidad de egreso" value=university/>
                    <TextField label="Teléfono" value=phone placeholder="+56 9 1234 5678"/>
                    <TextField label="Fecha de nacimiento" value=birth_date kind="date"/>
                    <TextField label="Género" value=gender/>
                    <TextField label="Nacionalidad" value=nationality/>
                    <TextField label="País de residencia" value=residence_country/>
                    <TextAreaField label="Biografía (opcional)" value=bio/>
                    <FormError error=error/>
                    <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                        {move || if pending.get() { "Guardando..." } else { "Guardar perfil" }}
                    </button>
                </form>

                <LogoutButton/>
            </div>
        </div>
    }
}

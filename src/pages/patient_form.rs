//! New patient form.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::form::{FormError, TextField};
use crate::net::types::PatientPersonalInfo;
use crate::state::session::SessionState;
use crate::util::rut::{format_rut, validate_rut};

#[component]
pub fn PatientFormPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let rut = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let birth_date = RwSignal::new(String::new());
    let diagnosis = RwSignal::new(String::new());

    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }

        if first_name.get().trim().is_empty() || last_name.get().trim().is_empty() {
            error.set(Some("Nombre y apellido son requeridos".to_owned()));
            return;
        }
        if !validate_rut(&rut.get()) {
            error.set(Some("RUT inválido".to_owned()));
            return;
        }

        let info = PatientPersonalInfo {
            first_name: first_name.get().trim().to_owned(),
            last_name: last_name.get().trim().to_owned(),
            rut: format_rut(&rut.get()),
            email: email.get().trim().to_owned(),
            phone: phone.get().trim().to_owned(),
            birth_date: birth_date.get(),
            diagnosis: match diagnosis.get().trim() {
                "" => None,
                d => Some(d.to_owned()),
            },
        };

        pending.set(true);
        error.set(None);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::create_patient(session, &info).await {
                Ok(patient) => {
                    navigate(
                        &format!("/dashboard/patients/{}", patient.id),
                        NavigateOptions::default(),
                    );
                }
                Err(e) => {
                    leptos::logging::error!("patient creation failed: {e}");
                    error.set(Some("No pudimos crear el paciente.".to_owned()));
                    pending.set(false);
                }
            }
        });
    };

    view! {
        <div class="patient-form-page">
            <h1>"Nuevo Paciente"</h1>
            <form on:submit=on_submit>
                <TextField label="Nombres" value=first_name/>
                <TextField label="Apellidos" value=last_name/>
                <TextField label="RUT" value=rut placeholder="12.345.678-5"/>
                <TextField label="Correo" value=email kind="email"/>
                <TextField label="Teléfono" value=phone/>
                <TextField label="Fecha de nacimiento" value=birth_date kind="date"/>
                <TextField label="Diagnóstico (opcional)" value=diagnosis/>
                <FormError error=error/>
                <div class="patient-form-page__actions">
                    <a href="/dashboard/patients" class="btn">"Cancelar"</a>
                    <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                        {move || if pending.get() { "Creando..." } else { "Crear paciente" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

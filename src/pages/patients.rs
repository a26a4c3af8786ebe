//! Patient list with client-side search.

use leptos::prelude::*;

use crate::net::types::Patient;
use crate::state::session::SessionState;

#[component]
pub fn PatientListPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let patients = LocalResource::new(move || crate::net::api::list_patients(session));
    let search = RwSignal::new(String::new());

    let matches = move |patient: &Patient| {
        let needle = search.get().to_lowercase();
        needle.is_empty()
            || patient.display_name().to_lowercase().contains(&needle)
            || patient.personal_info.rut.to_lowercase().contains(&needle)
    };

    view! {
        <div class="patients-page">
            <header class="patients-page__header">
                <h1>"Pacientes"</h1>
                <a href="/dashboard/patients/new" class="btn btn--primary">"+ Nuevo Paciente"</a>
            </header>

            <input
                class="patients-page__search"
                type="search"
                placeholder="Buscar por nombre o RUT..."
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />

            <Suspense fallback=move || view! { <p>"Cargando pacientes..."</p> }>
                {move || {
                    patients.get().map(|result| match result {
                        Ok(list) => {
                            let visible: Vec<_> = list.into_iter().filter(|p| matches(p)).collect();
                            if visible.is_empty() {
                                view! { <p class="patients-page__empty">"Sin resultados."</p> }.into_any()
                            } else {
                                view! {
                                    <ul class="patients-page__list">
                                        {visible
                                            .into_iter()
                                            .map(|p| view! { <PatientRow patient=p/> })
                                            .collect::<Vec<_>>()}
                                    </ul>
                                }
                                    .into_any()
                            }
                        }
                        Err(e) => {
                            view! { <p class="patients-page__error">{format!("No pudimos cargar los pacientes: {e}")}</p> }
                                .into_any()
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn PatientRow(patient: Patient) -> impl IntoView {
    let href = format!("/dashboard/patients/{}", patient.id);
    let diagnosis = patient
        .personal_info
        .diagnosis
        .clone()
        .unwrap_or_else(|| "Sin diagnóstico".to_owned());

    view! {
        <li class="patient-row">
            <a href=href class="patient-row__link">
                <span class="patient-row__name">{patient.display_name()}</span>
                <span class="patient-row__rut">{patient.personal_info.rut.clone()}</span>
                <span class="patient-row__diagnosis">{diagnosis}</span>
            </a>
        </li>
    }
}

//! Patient detail: clinical record, session timeline, and collaboration.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::form::{FormError, TextAreaField, TextField};
use crate::net::types::SessionPayload;
use crate::state::session::SessionState;

#[component]
pub fn PatientDetailPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let params = use_params_map();
    let patient_id = move || params.read().get("id").unwrap_or_default();

    let patient = LocalResource::new(move || {
        let id = patient_id();
        async move { crate::net::api::fetch_patient(session, &id).await }
    });
    let sessions = LocalResource::new(move || {
        let id = patient_id();
        async move { crate::net::api::list_sessions(session, &id, None).await }
    });
    let reports = LocalResource::new(move || {
        let id = patient_id();
        async move { crate::net::api::list_reports(session, &id).await }
    });

    view! {
        <div class="patient-detail-page">
            <Suspense fallback=move || view! { <p>"Cargando ficha..."</p> }>
                {move || {
                    patient.get().map(|result| match result {
                        Ok(p) => {
                            let info = p.personal_info.clone();
                            view! {
                                <header class="patient-detail-page__header">
                                    <h1>{p.display_name()}</h1>
                                    <p class="patient-detail-page__meta">
                                        {info.rut} " · " {info.phone} " · "
                                        {info.diagnosis.unwrap_or_else(|| "Sin diagnóstico".to_owned())}
                                    </p>
                                </header>
                            }
                                .into_any()
                        }
                        Err(e) => view! { <p class="patient-detail-page__error">{format!("Ficha no disponible: {e}")}</p> }.into_any(),
                    })
                }}
            </Suspense>

            <SessionTimeline sessions=sessions/>
            <NewSessionForm patient_id=Signal::derive(patient_id) sessions=sessions/>

            <section class="patient-detail-page__reports">
                <h3>"Informes"</h3>
                <Suspense fallback=move || view! { <p>"Cargando informes..."</p> }>
                    {move || {
                        reports.get().map(|result| {
                            let list = result.unwrap_or_default();
                            if list.is_empty() {
                                view! { <p>"Sin informes emitidos."</p> }.into_any()
                            } else {
                                view! {
                                    <ul>
                                        {list
                                            .into_iter()
                                            .map(|r| view! { <li>{r.title} " — " {r.created_at}</li> })
                                            .collect::<Vec<_>>()}
                                    </ul>
                                }
                                    .into_any()
                            }
                        })
                    }}
                </Suspense>
            </section>

            <InvitePanel patient_id=Signal::derive(patient_id)/>
        </div>
    }
}

/// Chronological list of logged treatment sessions.
#[component]
fn SessionTimeline(
    sessions: LocalResource<Result<Vec<crate::net::types::TreatmentSession>, crate::net::api::ApiError>>,
) -> impl IntoView {
    view! {
        <section class="patient-detail-page__sessions">
            <h3>"Bitácora de sesiones"</h3>
            <Suspense fallback=move || view! { <p>"Cargando sesiones..."</p> }>
                {move || {
                    sessions.get().map(|result| {
                        let list = result.unwrap_or_default();
                        if list.is_empty() {
                            view! { <p>"Aún no hay sesiones registradas."</p> }.into_any()
                        } else {
                            view! {
                                <ul class="session-timeline">
                                    {list
                                        .into_iter()
                                        .map(|s| {
                                            let incident = s.has_incident.then(|| {
                                                let details = s
                                                    .incident_details
                                                    .clone()
                                                    .unwrap_or_else(|| "sin detalle".to_owned());
                                                view! { <p class="session-timeline__incident">"⚠ Incidente: " {details}</p> }
                                            });
                                            view! {
                                                <li class="session-timeline__item">
                                                    <span class="session-timeline__date">{s.created_at.clone()}</span>
                                                    <p class="session-timeline__plan">{s.intervention_plan.clone()}</p>
                                                    <p>{s.description.clone()}</p>
                                                    {incident}
                                                </li>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </ul>
                            }
                                .into_any()
                        }
                    })
                }}
            </Suspense>
        </section>
    }
}

/// Form logging a new treatment session for this patient.
#[component]
fn NewSessionForm(
    patient_id: Signal<String>,
    sessions: LocalResource<Result<Vec<crate::net::types::TreatmentSession>, crate::net::api::ApiError>>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let intervention_plan = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let has_incident = RwSignal::new(false);
    let incident_details = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        if description.get().trim().is_empty() {
            error.set(Some("Describe la evolución de la sesión".to_owned()));
            return;
        }

        let payload = SessionPayload {
            patient_id: patient_id.get(),
            intervention_plan: intervention_plan.get().trim().to_owned(),
            description: description.get().trim().to_owned(),
            has_incident: has_incident.get(),
            incident_details: has_incident
                .get()
                .then(|| incident_details.get().trim().to_owned()),
            photos: None,
        };

        pending.set(true);
        error.set(None);
        leptos::task::spawn_local(async move {
            match crate::net::api::create_session(session, &payload).await {
                Ok(_) => {
                    intervention_plan.set(String::new());
                    description.set(String::new());
                    has_incident.set(false);
                    incident_details.set(String::new());
                    sessions.refetch();
                }
                Err(e) => {
                    leptos::logging::error!("session creation failed: {e}");
                    error.set(Some("No pudimos registrar la sesión.".to_owned()));
                }
            }
            pending.set(false);
        });
    };

    view! {
        <section class="patient-detail-page__new-session">
            <h3>"Registrar sesión"</h3>
            <form on:submit=on_submit>
                <TextField label="Plan de intervención" value=intervention_plan/>
                <TextAreaField label="Evolución" value=description/>
                <label class="field field--inline">
                    <input
                        type="checkbox"
                        prop:checked=move || has_incident.get()
                        on:change=move |ev| has_incident.set(event_target_checked(&ev))
                    />
                    <span>"Hubo un incidente"</span>
                </label>
                <Show when=move || has_incident.get()>
                    <TextAreaField label="Detalle del incidente" value=incident_details/>
                </Show>
                <FormError error=error/>
                <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Guardando..." } else { "Guardar sesión" }}
                </button>
            </form>
        </section>
    }
}

/// Invite another professional to collaborate on this record.
#[component]
fn InvitePanel(patient_id: Signal<String>) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let email = RwSignal::new(String::new());
    let sent = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let on_invite = move |_| {
        let address = email.get().trim().to_owned();
        if address.is_empty() {
            return;
        }
        error.set(None);
        leptos::task::spawn_local(async move {
            match crate::net::api::invite_collaborator(session, &patient_id.get_untracked(), &address)
                .await
            {
                Ok(()) => {
                    sent.set(true);
                    email.set(String::new());
                }
                Err(e) => {
                    leptos::logging::error!("collaboration invite failed: {e}");
                    error.set(Some("No pudimos enviar la invitación.".to_owned()));
                }
            }
        });
    };

    view! {
        <section class="patient-detail-page__invite">
            <h3>"Invitar colaborador"</h3>
            <div class="invite-panel">
                <input
                    type="email"
                    placeholder="correo@profesional.cl"
                    prop:value=move || email.get()
                    on:input=move |ev| {
                        email.set(event_target_value(&ev));
                        sent.set(false);
                    }
                />
                <button class="btn" on:click=on_invite>"Invitar"</button>
            </div>
            <Show when=move || sent.get()>
                <p class="invite-panel__sent">"Invitación enviada."</p>
            </Show>
            <FormError error=error/>
        </section>
    }
}

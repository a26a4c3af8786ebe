//! Professional dashboard: activity counters and recent patients.

use leptos::prelude::*;

use crate::state::session::SessionState;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let summary = LocalResource::new(move || crate::net::api::fetch_dashboard_summary(session));

    let greeting = move || {
        let name = session
            .get()
            .profile
            .as_ref()
            .and_then(|p| p.full_name.clone())
            .unwrap_or_else(|| "Colega".to_owned());
        format!("Hola, {name}")
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{greeting}</h1>
                <p>"Resumen de tu actividad clínica."</p>
            </header>

            <Suspense fallback=move || view! { <p class="dashboard-page__loading">"Cargando tu resumen..."</p> }>
                {move || {
                    summary.get().map(|result| {
                        let data = result.unwrap_or_default();
                        view! {
                            <div class="dashboard-page__kpis">
                                <KpiCard title="Pacientes Activos" value=data.stats.active_patients subtext="Total asignados"/>
                                <KpiCard title="Sesiones este Mes" value=data.stats.monthly_sessions subtext="Evoluciones registradas"/>
                                <KpiCard title="Incidentes Históricos" value=data.stats.reported_incidents subtext="Eventos adversos"/>
                            </div>

                            <section class="dashboard-page__recent">
                                <h3>"Pacientes recientes"</h3>
                                {if data.recent_patients.is_empty() {
                                    view! { <p class="dashboard-page__empty">"Aún no registras pacientes."</p> }.into_any()
                                } else {
                                    view! {
                                        <ul class="dashboard-page__patients">
                                            {data
                                                .recent_patients
                                                .into_iter()
                                                .map(|p| {
                                                    let href = format!("/dashboard/patients/{}", p.id);
                                                    view! {
                                                        <li>
                                                            <a href=href>{p.display_name()}</a>
                                                        </li>
                                                    }
                                                })
                                                .collect::<Vec<_>>()}
                                        </ul>
                                    }
                                        .into_any()
                                }}
                            </section>
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

/// Single dashboard indicator.
#[component]
fn KpiCard(title: &'static str, value: u32, subtext: &'static str) -> impl IntoView {
    view! {
        <div class="kpi-card">
            <span class="kpi-card__title">{title}</span>
            <span class="kpi-card__value">{value}</span>
            <span class="kpi-card__subtext">{subtext}</span>
        </div>
    }
}

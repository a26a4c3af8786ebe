//! Admin dashboard: review accounts awaiting approval.

use leptos::prelude::*;

use crate::net::types::PendingUser;
use crate::state::session::SessionState;

#[component]
pub fn AdminPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let pending_users = LocalResource::new(move || crate::net::api::fetch_pending_users(session));

    view! {
        <div class="admin-page">
            <h1>"Administración"</h1>
            <h3>"Cuentas pendientes de aprobación"</h3>

            <Suspense fallback=move || view! { <p>"Cargando solicitudes..."</p> }>
                {move || {
                    pending_users.get().map(|result| match result {
                        Ok(list) => {
                            if list.is_empty() {
                                view! { <p class="admin-page__empty">"No hay solicitudes pendientes."</p> }.into_any()
                            } else {
                                view! {
                                    <ul class="admin-page__list">
                                        {list
                                            .into_iter()
                                            .map(|u| view! { <PendingUserRow user=u users=pending_users/> })
                                            .collect::<Vec<_>>()}
                                    </ul>
                                }
                                    .into_any()
                            }
                        }
                        Err(e) => view! { <p class="admin-page__error">{format!("Error cargando solicitudes: {e}")}</p> }.into_any(),
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn PendingUserRow(
    user: PendingUser,
    users: LocalResource<Result<Vec<PendingUser>, crate::net::api::ApiError>>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let reason = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let user_id = user.id.clone();
    let review = Callback::new(move |approve: bool| {
        if busy.get() {
            return;
        }
        busy.set(true);
        let user_id = user_id.clone();
        leptos::task::spawn_local(async move {
            let reject_reason = (!approve).then(|| reason.get_untracked());
            let outcome = crate::net::api::review_user(
                session,
                &user_id,
                approve,
                reject_reason.as_deref(),
            )
            .await;
            match outcome {
                Ok(()) => users.refetch(),
                Err(e) => leptos::logging::error!("account review failed: {e}"),
            }
            busy.set(false);
        });
    });

    let name = user
        .full_name
        .clone()
        .unwrap_or_else(|| user.email.clone());
    let specialty = user
        .specialty
        .clone()
        .unwrap_or_else(|| "Sin especialidad declarada".to_owned());

    view! {
        <li class="pending-user">
            <div class="pending-user__info">
                <span class="pending-user__name">{name}</span>
                <span class="pending-user__email">{user.email.clone()}</span>
                <span class="pending-user__specialty">{specialty}</span>
            </div>
            <div class="pending-user__actions">
                <input
                    type="text"
                    placeholder="Motivo de rechazo (opcional)"
                    prop:value=move || reason.get()
                    on:input=move |ev| reason.set(event_target_value(&ev))
                />
                <button class="btn btn--danger" disabled=move || busy.get() on:click=move |_| review.run(false)>
                    "Rechazar"
                </button>
                <button class="btn btn--primary" disabled=move || busy.get() on:click=move |_| review.run(true)>
                    "Aprobar"
                </button>
            </div>
        </li>
    }
}

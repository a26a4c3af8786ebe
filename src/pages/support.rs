//! Support page: open a ticket and review previous ones.

use leptos::prelude::*;

use crate::components::form::{FormError, TextAreaField, TextField};
use crate::state::session::SessionState;

#[component]
pub fn SupportPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let tickets = LocalResource::new(move || crate::net::api::list_tickets(session));

    let subject = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        if subject.get().trim().is_empty() || message.get().trim().is_empty() {
            error.set(Some("Asunto y mensaje son requeridos".to_owned()));
            return;
        }

        pending.set(true);
        error.set(None);
        leptos::task::spawn_local(async move {
            let outcome = crate::net::api::create_ticket(
                session,
                subject.get_untracked().trim(),
                message.get_untracked().trim(),
            )
            .await;
            match outcome {
                Ok(()) => {
                    subject.set(String::new());
                    message.set(String::new());
                    tickets.refetch();
                }
                Err(e) => {
                    leptos::logging::error!("ticket creation failed: {e}");
                    error.set(Some("No pudimos crear el ticket.".to_owned()));
                }
            }
            pending.set(false);
        });
    };

    view! {
        <div class="support-page">
            <h1>"Soporte"</h1>

            <form class="support-page__form" on:submit=on_submit>
                <TextField label="Asunto" value=subject/>
                <TextAreaField label="Mensaje" value=message/>
                <FormError error=error/>
                <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Enviando..." } else { "Enviar" }}
                </button>
            </form>

            <h3>"Tus tickets"</h3>
            <Suspense fallback=move || view! { <p>"Cargando tickets..."</p> }>
                {move || {
                    tickets.get().map(|result| {
                        let list = result.unwrap_or_default();
                        if list.is_empty() {
                            view! { <p class="support-page__empty">"Sin tickets anteriores."</p> }.into_any()
                        } else {
                            view! {
                                <ul class="support-page__list">
                                    {list
                                        .into_iter()
                                        .map(|t| {
                                            let response = t.response.clone().map(|r| {
                                                view! { <p class="ticket__response">"Respuesta: " {r}</p> }
                                            });
                                            view! {
                                                <li class="ticket">
                                                    <span class="ticket__subject">{t.subject.clone()}</span>
                                                    <span class="ticket__status">{t.status.clone()}</span>
                                                    <p>{t.message.clone()}</p>
                                                    {response}
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
        </div>
    }
}

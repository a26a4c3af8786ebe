//! # bitacora-client
//!
//! Leptos + WASM frontend for the Bitácora Médica clinical logbook platform:
//! professionals register patients, log treatment sessions, and generate
//! reports; administrators approve accounts. The app consumes a REST backend
//! and a hosted identity provider; a native shell delivers OAuth redirects
//! back into the app through a custom-scheme deep link.
//!
//! The authentication core lives in [`auth`]: the identity provider bridge,
//! deep-link capture, backend sync/normalization, and route guards, all
//! reading and writing the persisted session store in [`state::session`].

pub mod app;
pub mod auth;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(App);
}

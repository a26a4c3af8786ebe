//! Authentication core: identity provider bridge, deep-link capture, backend
//! sync, and route guards.
//!
//! DATA FLOW
//! =========
//! Deep-Link Capture → Identity Provider Bridge (establish session) →
//! session-change subscription → Backend Sync (fetch + normalize profile) →
//! Session Store commit → Route Guard re-evaluation.

pub mod bridge;
pub mod deep_link;
pub mod error;
pub mod guards;
pub mod sync;

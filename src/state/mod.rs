//! Shared client-side state.
//!
//! The session store is the only process-wide mutable state; everything else
//! lives in page-local signals and resources.

pub mod session;

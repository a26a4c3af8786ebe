//! Page components, one module per route.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod patient_detail;
pub mod patient_form;
pub mod patients;
pub mod pending_approval;
pub mod profile;
pub mod support;

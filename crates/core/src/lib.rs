//! # Clinicdesk Core
//!
//! Domain types and pure logic for doctor schedules: the time-slot validator,
//! shift presets, the command-driven schedule form and the caller's
//! authorization context. Nothing here performs I/O.

pub mod auth;
pub mod errors;
pub mod form;
pub mod models;
pub mod presets;
pub mod validation;

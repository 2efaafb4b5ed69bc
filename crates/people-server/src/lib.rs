//! people-server - REST service for person records.
//!
//! The binary wires a [`DocumentStore`](people_core::DocumentStore) chosen at
//! startup into the axum router in [`api`]. Everything handlers share is
//! built once by [`bootstrap`] and read-only afterwards.

pub mod api;
pub mod bootstrap;
pub mod cli;

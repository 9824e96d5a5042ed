//! Lumína: REST gateway over a school's administrative records.
//!
//! Every entity (students, classes, teachers, payments, attendance,
//! activities, activity enrolments and users) is a declarative
//! [`schema::EntitySchema`]; one generic set of handlers serves them all
//! through an injected [`database::RecordStore`].

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;

pub use router::build_router;
pub use state::AppState;

//! Domain types shared across the Pawhub reference-data crates.
//!
//! Holds the error taxonomy, ID/timestamp aliases, and the slug
//! derivation rules used by both the API server and the admin
//! controller.

pub mod error;
pub mod slug;
pub mod types;

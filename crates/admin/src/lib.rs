//! Admin controller for the Pawhub reference-data workflow.
//!
//! A rendering-agnostic state machine behind the city administration
//! screen: it mirrors the server's city list, drives the add/edit
//! dialogs and the delete confirmation, and reconciles every mutation
//! against the server's response. A UI shell renders the state and
//! forwards user events; it never talks to the Reference API directly.

pub mod controller;
pub mod gateway;

pub use controller::{CityAdminController, CityRow, Dialog, Draft, PendingSubmit};
pub use gateway::{CityGateway, CityPayload, CityRecord, CountryRef, GatewayError, HttpGateway};

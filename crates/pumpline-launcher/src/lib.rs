//! Token creation against the pumpportal trade API.
//!
//! The launcher is a startup-time collaborator: it creates the token whose
//! trades the rest of the system watches. Creation happens once; a failure
//! aborts startup rather than being retried.

pub mod client;
pub mod config;
pub mod creator;
pub mod error;

pub use client::PumpPortalCreator;
pub use config::LaunchConfig;
pub use creator::{BoxFuture, MockTokenCreator, TokenCreator};
pub use error::{LaunchError, LaunchResult};

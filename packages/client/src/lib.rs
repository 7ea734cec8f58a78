//! Tallyroom CLI participant.
//!
//! Mirrors the shared selection state broadcast by the server into a local
//! store and turns terminal commands into upstream actions.

pub mod command;
pub mod error;
pub mod reducer;
pub mod render;
pub mod runner;
pub mod session;
pub mod url;

pub use runner::run_client;

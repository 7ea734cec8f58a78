//! Tallyroom server: one shared selection state, broadcast to every participant on change.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

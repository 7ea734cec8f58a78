//! Code shared between the Tallyroom server and client.

pub mod logger;
pub mod name;
pub mod protocol;
pub mod time;

//! tally_engine - Line-based calculation engine for notes.

pub(crate) mod builtins;
pub mod engine;
pub mod error;

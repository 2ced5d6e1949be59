//! Core types: severity levels and log entries

mod level;
mod entry;

pub use level::{Level, ParseLevelError};
pub use entry::Entry;

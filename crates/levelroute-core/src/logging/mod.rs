//! Diagnostic side channel for the router's own failures

mod traits;
mod noop;
mod console;
mod memory;

pub use traits::{Logger, LoggerExt, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::MemoryLogger;

//! Hook abstraction used by the owning logging pipeline
//!
//! - `Hook` trait, implemented by `LevelRouter`
//! - `LevelHooks` registry that dispatches entries by level

mod traits;
mod level_hooks;

pub use traits::{Hook, HookError, HookResult};
pub use level_hooks::LevelHooks;

//! Registry that fans entries out to the hooks registered for their level

use std::collections::HashMap;
use std::sync::Arc;

use super::traits::{Hook, HookResult};
use crate::types::{Entry, Level};

/// Hooks grouped by the levels they claim
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use levelroute_core::hook::LevelHooks;
/// use levelroute_core::{Entry, Level, LevelRouter};
///
/// let mut hooks = LevelHooks::new();
/// hooks.add(Arc::new(LevelRouter::passthrough()));
/// assert_eq!(hooks.hooks_for(Level::Debug).len(), 1);
/// hooks.fire(&Entry::new(Level::Debug, "dropped")).unwrap();
/// ```
#[derive(Default, Clone)]
pub struct LevelHooks {
    hooks: HashMap<Level, Vec<Arc<dyn Hook>>>,
}

impl LevelHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` under every level it reports
    pub fn add(&mut self, hook: Arc<dyn Hook>) {
        for level in hook.levels() {
            self.hooks.entry(*level).or_default().push(Arc::clone(&hook));
        }
    }

    /// Hooks registered for `level`, in registration order
    pub fn hooks_for(&self, level: Level) -> &[Arc<dyn Hook>] {
        self.hooks.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fire every hook registered for the entry's level
    ///
    /// Stops at the first hook that fails and returns its error.
    pub fn fire(&self, entry: &Entry) -> HookResult<()> {
        for hook in self.hooks_for(entry.level) {
            hook.fire(entry)?;
        }
        Ok(())
    }

    /// Number of levels with at least one hook
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for LevelHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(Level, usize)> =
            self.hooks.iter().map(|(l, h)| (*l, h.len())).collect();
        counts.sort();
        f.debug_struct("LevelHooks").field("hooks", &counts).finish()
    }
}

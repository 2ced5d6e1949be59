//! Routing tables: which destination each level goes to

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::types::Level;

/// A stream destination that several levels (or routers) can share
///
/// Any `Arc<Mutex<W>>` with `W: Write + Send` coerces into this, so callers
/// can keep their own typed handle to the same buffer.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Wrap a writer so it can be placed in a `WriterMap` or used as a default
pub fn shared_writer<W: Write + Send + 'static>(writer: W) -> SharedWriter {
    Arc::new(Mutex::new(writer))
}

/// Level to file path. Several levels may share a path.
pub type PathMap = HashMap<Level, PathBuf>;

/// Level to stream. Several levels may share a writer.
pub type WriterMap = HashMap<Level, SharedWriter>;

/// The per-level mapping a router is built with
#[derive(Clone, Default)]
pub enum RoutingTable {
    /// No table; only defaults (if any) receive entries
    #[default]
    None,
    /// Append each entry to the file mapped to its level
    ByPath(PathMap),
    /// Write each entry to the stream mapped to its level
    ByWriter(WriterMap),
}

impl RoutingTable {
    /// Build a path table from `(level, path)` pairs
    pub fn paths<I, P>(routes: I) -> Self
    where
        I: IntoIterator<Item = (Level, P)>,
        P: Into<PathBuf>,
    {
        RoutingTable::ByPath(routes.into_iter().map(|(l, p)| (l, p.into())).collect())
    }

    /// Build a writer table from `(level, writer)` pairs
    pub fn writers<I>(routes: I) -> Self
    where
        I: IntoIterator<Item = (Level, SharedWriter)>,
    {
        RoutingTable::ByWriter(routes.into_iter().collect())
    }

    /// Levels that have an explicit entry, most severe first
    pub fn mapped_levels(&self) -> Vec<Level> {
        let mut levels: Vec<Level> = match self {
            RoutingTable::None => Vec::new(),
            RoutingTable::ByPath(map) => map.keys().copied().collect(),
            RoutingTable::ByWriter(map) => map.keys().copied().collect(),
        };
        levels.sort();
        levels
    }
}

impl std::fmt::Debug for RoutingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingTable::None => f.write_str("None"),
            RoutingTable::ByPath(map) => f.debug_tuple("ByPath").field(map).finish(),
            RoutingTable::ByWriter(_) => f
                .debug_tuple("ByWriter")
                .field(&self.mapped_levels())
                .finish(),
        }
    }
}

impl From<PathMap> for RoutingTable {
    fn from(map: PathMap) -> Self {
        RoutingTable::ByPath(map)
    }
}

impl From<WriterMap> for RoutingTable {
    fn from(map: WriterMap) -> Self {
        RoutingTable::ByWriter(map)
    }
}

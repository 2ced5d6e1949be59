//! Level router: sends each entry to the file or stream mapped to its level

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use super::error::{DestinationKind, RouteError, RouteResult};
use super::table::{RoutingTable, SharedWriter};
use crate::formatter::{default_formatter, BoxedFormatter, Formatter};
use crate::logging::{ConsoleLogger, SharedLogger};
use crate::log_error;
use crate::types::{Entry, Level};

/// How a router dispatches, derived from its table and defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
    /// Entries go to writers
    Stream,
    /// Entries are appended to files
    File,
    /// Nothing is configured; every entry is dropped
    PassThrough,
}

/// Where a single entry ends up
enum Destination {
    Writer(SharedWriter),
    Path(PathBuf),
    Nowhere,
}

/// Everything `fire` reads, guarded by the router's one lock
struct RouterState {
    table: RoutingTable,
    default_path: Option<PathBuf>,
    default_writer: Option<SharedWriter>,
    formatter: BoxedFormatter,
    diagnostics: SharedLogger,
}

impl RouterState {
    /// Writer signals are checked before path signals.
    fn mode(&self) -> RouteMode {
        if matches!(self.table, RoutingTable::ByWriter(_)) || self.default_writer.is_some() {
            RouteMode::Stream
        } else if matches!(self.table, RoutingTable::ByPath(_)) || self.default_path.is_some() {
            RouteMode::File
        } else {
            RouteMode::PassThrough
        }
    }

    fn resolve(&self, level: Level) -> Destination {
        match self.mode() {
            RouteMode::Stream => {
                let mapped = match &self.table {
                    RoutingTable::ByWriter(writers) => writers.get(&level),
                    _ => None,
                };
                match mapped.or(self.default_writer.as_ref()) {
                    Some(writer) => Destination::Writer(Arc::clone(writer)),
                    None => Destination::Nowhere,
                }
            }
            RouteMode::File => {
                let mapped = match &self.table {
                    RoutingTable::ByPath(paths) => paths.get(&level),
                    _ => None,
                };
                match mapped.or(self.default_path.as_ref()) {
                    Some(path) => Destination::Path(path.clone()),
                    None => Destination::Nowhere,
                }
            }
            RouteMode::PassThrough => Destination::Nowhere,
        }
    }

    /// Render the entry, reporting failures on the diagnostic channel
    fn format(&self, entry: &Entry) -> RouteResult<Vec<u8>> {
        self.formatter.format(entry).map_err(|e| {
            log_error!(self.diagnostics, "failed to generate string for entry: {}", e);
            RouteError::from(e)
        })
    }

    fn write_stream(&self, writer: &SharedWriter, entry: &Entry) -> RouteResult<()> {
        let msg = self.format(entry)?;
        writer.lock().write_all(&msg).map_err(RouteError::Write)
    }

    fn write_file(&self, path: &Path, entry: &Entry) -> RouteResult<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            // best-effort; a real problem surfaces as an open failure below
            let _ = fs::create_dir_all(dir);
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| {
                log_error!(self.diagnostics, "failed to open logfile: {} {}", path.display(), e);
                RouteError::open(path, e)
            })?;

        let msg = self.format(entry)?;
        // file writes are best-effort
        let _ = file.write_all(&msg);
        Ok(())
    }
}

/// Routes log entries to per-level files or streams
///
/// A router is built from a [`RoutingTable`]: by path (each entry is
/// appended to a file that is opened and closed per write), by writer (each
/// entry is written to a shared stream), or none. Levels missing from the
/// table fall back to a default destination of the same kind; with no
/// default the entry is silently dropped.
///
/// One lock serializes configuration changes and every format-and-write, so
/// concurrent callers never interleave bytes within a destination.
///
/// # Example
///
/// ```no_run
/// use levelroute_core::{Entry, Level, LevelRouter, RoutingTable};
///
/// let router = LevelRouter::new(
///     RoutingTable::paths([(Level::Error, "/var/log/app/error.log")]),
///     None,
/// );
/// router.set_default_path("/var/log/app/app.log").unwrap();
///
/// router.fire(&Entry::new(Level::Info, "started")).unwrap();
/// ```
pub struct LevelRouter {
    state: Mutex<RouterState>,
}

impl LevelRouter {
    /// Create a router from a table and an optional formatter
    ///
    /// Without a formatter, a plain text formatter with colors disabled is
    /// used. No I/O happens here.
    pub fn new(table: RoutingTable, formatter: Option<BoxedFormatter>) -> Self {
        Self {
            state: Mutex::new(RouterState {
                table,
                default_path: None,
                default_writer: None,
                formatter: formatter.unwrap_or_else(default_formatter),
                diagnostics: Arc::new(ConsoleLogger::new()),
            }),
        }
    }

    /// Router with no table; entries are dropped until a default is set
    pub fn passthrough() -> Self {
        Self::new(RoutingTable::None, None)
    }

    /// File-mode router from `(level, path)` pairs
    pub fn with_paths<I, P>(routes: I) -> Self
    where
        I: IntoIterator<Item = (Level, P)>,
        P: Into<PathBuf>,
    {
        Self::new(RoutingTable::paths(routes), None)
    }

    /// Stream-mode router from `(level, writer)` pairs
    pub fn with_writers<I>(routes: I) -> Self
    where
        I: IntoIterator<Item = (Level, SharedWriter)>,
    {
        Self::new(RoutingTable::writers(routes), None)
    }

    /// Replace the diagnostic channel (stderr by default)
    pub fn with_diagnostics(self, diagnostics: SharedLogger) -> Self {
        self.set_diagnostics(diagnostics);
        self
    }

    /// Replace the active formatter
    ///
    /// The formatter's terminal styling is switched off, so a text
    /// formatter never writes ANSI escapes into routed output.
    pub fn set_formatter<F: Formatter + 'static>(&self, formatter: F) {
        let mut formatter: BoxedFormatter = Box::new(formatter);
        formatter.disable_colors();
        self.state.lock().formatter = formatter;
    }

    /// Set the file used for levels without a table entry
    ///
    /// Fails with [`RouteError::MixedDestinations`] on a router that already
    /// routes to writers.
    pub fn set_default_path(&self, path: impl Into<PathBuf>) -> RouteResult<()> {
        let mut state = self.state.lock();
        if matches!(state.table, RoutingTable::ByWriter(_)) || state.default_writer.is_some() {
            return Err(RouteError::mixed(DestinationKind::Writer, DestinationKind::Path));
        }
        state.default_path = Some(path.into());
        Ok(())
    }

    /// Set the stream used for levels without a table entry
    ///
    /// Fails with [`RouteError::MixedDestinations`] on a router that already
    /// routes to files.
    pub fn set_default_writer(&self, writer: SharedWriter) -> RouteResult<()> {
        let mut state = self.state.lock();
        if matches!(state.table, RoutingTable::ByPath(_)) || state.default_path.is_some() {
            return Err(RouteError::mixed(DestinationKind::Path, DestinationKind::Writer));
        }
        state.default_writer = Some(writer);
        Ok(())
    }

    /// Replace the channel that receives formatter and open failures
    pub fn set_diagnostics(&self, diagnostics: SharedLogger) {
        self.state.lock().diagnostics = diagnostics;
    }

    /// Current dispatch mode
    pub fn mode(&self) -> RouteMode {
        self.state.lock().mode()
    }

    /// Default file, if one is set
    pub fn default_path(&self) -> Option<PathBuf> {
        self.state.lock().default_path.clone()
    }

    /// Route one entry
    ///
    /// Produces at most one write. Returns an error only when formatting
    /// fails, the target file cannot be opened, or a stream write fails.
    /// An entry with no destination is not an error.
    pub fn fire(&self, entry: &Entry) -> RouteResult<()> {
        let state = self.state.lock();
        match state.resolve(entry.level) {
            Destination::Writer(writer) => state.write_stream(&writer, entry),
            Destination::Path(path) => state.write_file(&path, entry),
            Destination::Nowhere => Ok(()),
        }
    }

    /// Levels this router accepts: always every level
    ///
    /// Per-level selection happens in [`fire`](Self::fire), so registration
    /// never filters.
    pub fn levels(&self) -> &'static [Level] {
        &Level::ALL
    }
}

impl std::fmt::Debug for LevelRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LevelRouter")
            .field("table", &state.table)
            .field("default_path", &state.default_path)
            .field("has_default_writer", &state.default_writer.is_some())
            .field("mode", &state.mode())
            .finish()
    }
}

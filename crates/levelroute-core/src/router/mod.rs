//! Per-level routing of formatted entries to files or streams

mod error;
mod table;
mod level_router;

pub use error::{DestinationKind, RouteError, RouteResult};
pub use table::{shared_writer, PathMap, RoutingTable, SharedWriter, WriterMap};
pub use level_router::{LevelRouter, RouteMode};

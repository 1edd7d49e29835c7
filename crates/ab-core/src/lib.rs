pub mod convert;
pub mod filename;
pub mod id;
pub mod model;
pub mod path;

pub use convert::{from_arguebuf, to_aif, to_arguebuf};
pub use filename::{FileKind, Timestamp, export_filename};
pub use id::ElementId;
pub use model::*;
pub use path::PropertyPath;

// Index types returned by `ArgGraph::add_*`.
pub use petgraph::graph::{EdgeIndex, NodeIndex};

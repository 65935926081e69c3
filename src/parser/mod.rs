//! Dependency parsing: record construction, the model handle, lazy sentence
//! streams and the [`DependencyParser`] facade.

pub mod coordinator;
pub mod graph;
pub mod model;
pub mod record;
pub mod stream;

pub use coordinator::{DependencyParser, DependencyParserBuilder};
pub use graph::{DependencyEdge, DependencyGraph, GraphToken, ROOT};
pub use model::{ModelHandle, ParsingEngine, ParsingModel};
pub use record::{build_record, ColumnarRecord, RecordLine};
pub use stream::SentenceStream;

pub mod cache;
pub mod classify;
pub mod config;
pub mod deps;
pub mod error;
pub mod events;
pub mod extract;
pub mod graph;
pub mod layer;
pub mod path;
pub mod pipeline;
pub mod protocol;
pub mod scan;
pub mod stats;
pub mod types;

pub use config::Config;
pub use error::{AnalyzerError, ErrorKind};
pub use events::{HostAdapter, LogSink};
pub use extract::{DependencyExtractor, FileAnnotator, FileMap, SourceFile};
pub use graph::DependencyGraph;
pub use pipeline::{AnalysisOutcome, ProjectAnalyzer};
pub use types::*;

// src/models.rs
mod collected_record;
mod document;
mod graph;
mod word_stats;

pub use collected_record::{CollectedRecord, READ_ERROR_CONTENT};
pub use document::{Document, DocumentKind};
pub use graph::{GraphData, GraphLink, GraphNode};
pub use word_stats::WordStats;

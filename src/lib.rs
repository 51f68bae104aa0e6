// src/lib.rs
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod session;
pub mod utils;
pub mod vault;

pub use crate::cli::{Args, run};
pub use crate::config::Settings;
pub use crate::core::changes::{has_changed, path_set};
pub use crate::core::collector::{DocumentStore, collect};
pub use crate::core::exclude::is_excluded;
pub use crate::core::export::{
    ClipboardSink, ExportStore, NO_RELATED_FILES, SaveOutcome, StdoutClipboard, format_export,
};
pub use crate::core::links::{LinkIndex, LinkResolver};
pub use crate::core::words::count_words;
pub use crate::error::{CollectionError, ConfigError, ExportError};
pub use crate::models::{
    CollectedRecord, Document, DocumentKind, GraphData, GraphLink, GraphNode, READ_ERROR_CONTENT,
    WordStats,
};
pub use crate::session::{CollectOutcome, CollectionSummary, Notifier, Session, StderrNotifier};
pub use crate::vault::Vault;

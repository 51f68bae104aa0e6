// src/session.rs
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::Settings;
use crate::core::changes::{has_changed, path_set};
use crate::core::collector::{DocumentStore, collect};
use crate::core::exclude::is_excluded;
use crate::core::export::{ClipboardSink, ExportStore, SaveOutcome, StdoutClipboard, format_export};
use crate::core::links::{LinkIndex, LinkResolver};
use crate::error::{CollectionError, ExportError};
use crate::models::{CollectedRecord, Document, GraphData, WordStats};
use crate::utils::normalize_output_filename;

pub const BUSY_NOTICE: &str = "Collection already in progress...";

/// Receives short, user-facing status messages.
pub trait Notifier {
    fn notice(&self, message: &str);
}

/// Prints notices to standard error, keeping stdout free for exports.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notice(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSummary {
    pub count: usize,
    /// Whether the set of collected paths differs from the previous run.
    pub changed: bool,
    pub stats: WordStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    Collected(CollectionSummary),
    /// Another collection was running; nothing was done.
    Busy,
}

#[derive(Debug, Default)]
struct SessionState {
    records: Option<Vec<CollectedRecord>>,
    last_paths: HashSet<String>,
    word_stats: Option<WordStats>,
    graph: Option<GraphData>,
}

/// Collection, statistics and export around one start note.
///
/// A session holds the latest collection and everything derived from it.
/// Only one collection runs at a time: a request arriving while another is in
/// flight is turned away with a notice instead of queuing.
pub struct Session<'a, V: ?Sized> {
    start: Document,
    settings: Settings,
    vault: &'a V,
    clipboard: Box<dyn ClipboardSink + Send + Sync + 'a>,
    notifier: Box<dyn Notifier + Send + Sync + 'a>,
    busy: AtomicBool,
    state: Mutex<SessionState>,
}

impl<'a, V> Session<'a, V>
where
    V: LinkIndex + DocumentStore + ExportStore + ?Sized,
{
    #[must_use]
    pub fn new(start: Document, settings: Settings, vault: &'a V) -> Self {
        Self {
            start,
            settings,
            vault,
            clipboard: Box::new(StdoutClipboard),
            notifier: Box::new(StderrNotifier),
            busy: AtomicBool::new(false),
            state: Mutex::new(SessionState::default()),
        }
    }

    #[must_use]
    pub fn with_clipboard(mut self, clipboard: impl ClipboardSink + Send + Sync + 'a) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + Send + Sync + 'a) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Changes the hop limit and collects again.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Settings`] if `max_depth` is out of range,
    /// leaving the current settings and collection untouched, or any error
    /// from [`Session::collect`].
    pub fn set_max_depth(&mut self, max_depth: usize) -> Result<CollectOutcome, CollectionError> {
        let settings = Settings {
            max_depth,
            ..self.settings.clone()
        };
        settings.validate()?;
        self.settings = settings;
        self.collect()
    }

    /// Turns backlink traversal on or off and collects again.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Session::collect`].
    pub fn set_include_backlinks(
        &mut self,
        include_backlinks: bool,
    ) -> Result<CollectOutcome, CollectionError> {
        self.settings.include_backlinks = include_backlinks;
        self.collect()
    }

    #[inline]
    #[must_use]
    pub fn is_collecting(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Runs a fresh collection and replaces the held one.
    ///
    /// Graph data is rebuilt only when the set of collected paths changed.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError`] if the start note cannot be read. The
    /// previous collection is kept in that case.
    pub fn collect(&self) -> Result<CollectOutcome, CollectionError> {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            self.notifier.notice(BUSY_NOTICE);
            return Ok(CollectOutcome::Busy);
        };

        log::info!(
            "Collecting notes around {} (depth {}, backlinks {})",
            self.start.path,
            self.settings.max_depth,
            self.settings.include_backlinks
        );

        let resolver = LinkResolver::new(self.vault, self.settings.include_backlinks);
        let excludes = &self.settings.exclude_paths;
        let records = collect(
            &self.start,
            self.settings.max_depth,
            &resolver,
            |path| is_excluded(path, excludes),
            self.vault,
        )
        .inspect_err(|err| {
            self.notifier.notice(&format!("Collection error: {err}"));
        })?;

        let stats = WordStats::aggregate(&records);
        let mut state = self.lock_state();
        let changed = has_changed(&state.last_paths, &records);
        if changed {
            state.graph = Some(GraphData::from_records(&records));
        } else {
            log::debug!("Collection unchanged, keeping graph data");
        }
        state.last_paths = path_set(&records);
        state.word_stats = Some(stats);

        let summary = CollectionSummary {
            count: records.len(),
            changed,
            stats,
        };
        state.records = Some(records);
        log::info!("Collected {} notes.", summary.count);

        Ok(CollectOutcome::Collected(summary))
    }

    /// Collects unless a collection is already held. While another collection
    /// is running this only posts a notice.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError`] if a needed collection fails.
    pub fn ensure_collection(&self) -> Result<(), CollectionError> {
        if self.is_collecting() {
            self.notifier.notice(BUSY_NOTICE);
            return Ok(());
        }
        if self.lock_state().records.is_none() {
            self.collect()?;
        }
        Ok(())
    }

    /// Sends the export to the clipboard sink and returns how many notes it holds.
    ///
    /// # Errors
    ///
    /// Returns an error if collection fails or the clipboard rejects the text.
    pub fn copy_to_clipboard(&self) -> Result<usize, ExportError> {
        self.ensure_collection()?;

        let Some((text, count)) = self.export_with_count() else {
            self.notifier.notice("No notes to copy.");
            return Ok(0);
        };

        self.clipboard.write_text(&text).map_err(|source| {
            self.notifier.notice(&format!("Error copying to clipboard: {source}"));
            ExportError::Clipboard(source)
        })?;
        self.notifier
            .notice(&format!("Copied {count} notes to clipboard!"));
        Ok(count)
    }

    /// Saves the export into the vault, at `filename` or the configured
    /// output file. Returns `None` when there was nothing to save.
    ///
    /// # Errors
    ///
    /// Returns an error if collection fails or the file cannot be written.
    /// The collection stays held either way, so the save can be retried.
    pub fn save_to_file(&self, filename: Option<&str>) -> Result<Option<SaveOutcome>, ExportError> {
        self.ensure_collection()?;

        let Some((text, _)) = self.export_with_count() else {
            self.notifier.notice("No notes to save.");
            return Ok(None);
        };

        let path = normalize_output_filename(filename.unwrap_or(&self.settings.output_file));
        match self.vault.save(&path, &text) {
            Ok(outcome) => {
                let verb = match outcome {
                    SaveOutcome::Created => "Created",
                    SaveOutcome::Updated => "Updated",
                };
                self.notifier.notice(&format!("{verb} file: {path}"));
                Ok(Some(outcome))
            }
            Err(source) => {
                self.notifier.notice(&format!("Error saving file: {source}"));
                Err(ExportError::Save { path, source })
            }
        }
    }

    /// The export of the held collection, if any.
    #[must_use]
    pub fn export_text(&self) -> Option<String> {
        self.export_with_count().map(|(text, _)| text)
    }

    #[must_use]
    pub fn records(&self) -> Option<Vec<CollectedRecord>> {
        self.lock_state().records.clone()
    }

    #[must_use]
    pub fn word_stats(&self) -> Option<WordStats> {
        self.lock_state().word_stats
    }

    #[must_use]
    pub fn graph(&self) -> Option<GraphData> {
        self.lock_state().graph.clone()
    }

    fn export_with_count(&self) -> Option<(String, usize)> {
        let state = self.lock_state();
        let records = state.records.as_deref().filter(|r| !r.is_empty())?;
        let start_name = records
            .iter()
            .find(|r| r.depth == 0)
            .map_or("", |r| r.document.name.as_str());
        let text = format_export(records, self.settings.max_depth, start_name);
        Some((text, records.len()))
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the busy flag for the lifetime of one collection.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// tests/integration_tests/session_test.rs
use super::common::{RecordingNotifier, setup_test_vault};
use anyhow::{Result, anyhow};
use packup::session::BUSY_NOTICE;
use packup::{
    ClipboardSink, CollectOutcome, CollectedRecord, CollectionError, CollectionSummary,
    ConfigError, Document, DocumentStore, ExportError, ExportStore, LinkIndex, SaveOutcome,
    Session, Settings, Vault,
};
use std::fs;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;

#[derive(Clone, Default)]
struct RecordingClipboard {
    text: Arc<Mutex<String>>,
}

impl RecordingClipboard {
    fn text(&self) -> String {
        self.text.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl ClipboardSink for RecordingClipboard {
    fn write_text(&self, text: &str) -> io::Result<()> {
        let mut held = self
            .text
            .lock()
            .map_err(|_| io::Error::other("clipboard poisoned"))?;
        *held = text.to_owned();
        Ok(())
    }
}

/// Vault wrapper whose first read blocks until released, and whose saves can fail.
struct GatedVault {
    inner: Vault,
    gate: AtomicBool,
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
    fail_saves: bool,
}

impl GatedVault {
    fn new(inner: Vault, gated: bool, fail_saves: bool) -> (Self, mpsc::Receiver<()>, mpsc::Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let vault = Self {
            inner,
            gate: AtomicBool::new(gated),
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
            fail_saves,
        };
        (vault, entered_rx, release_tx)
    }
}

impl LinkIndex for GatedVault {
    fn forward_links(&self, document: &Document) -> Vec<Document> {
        self.inner.forward_links(document)
    }

    fn backlinks(&self, document: &Document) -> Vec<Document> {
        self.inner.backlinks(document)
    }
}

impl DocumentStore for GatedVault {
    fn read(&self, document: &Document) -> io::Result<String> {
        if self.gate.swap(false, Ordering::SeqCst) {
            if let Ok(entered) = self.entered.lock() {
                let _ = entered.send(());
            }
            if let Ok(release) = self.release.lock() {
                let _ = release.recv();
            }
        }
        self.inner.read(document)
    }
}

impl ExportStore for GatedVault {
    fn save(&self, path: &str, content: &str) -> io::Result<SaveOutcome> {
        if self.fail_saves {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only vault"));
        }
        self.inner.save(path, content)
    }
}

fn start_of(vault: &Vault) -> Result<Document> {
    vault
        .document("A.md")
        .cloned()
        .ok_or_else(|| anyhow!("A.md not indexed"))
}

#[test]
fn test_collect_reports_changes_between_runs() -> Result<()> {
    let dir = setup_test_vault()?;
    let vault = Vault::open(dir.path())?;
    let session = Session::new(start_of(&vault)?, Settings::default(), &vault)
        .with_notifier(RecordingNotifier::default());

    let CollectOutcome::Collected(first) = session.collect()? else {
        return Err(anyhow!("first collection should run"));
    };
    assert!(first.changed);
    assert_eq!(first.count, session.records().map_or(0, |r| r.len()));
    assert_eq!(Some(first.stats), session.word_stats());

    let CollectOutcome::Collected(second) = session.collect()? else {
        return Err(anyhow!("second collection should run"));
    };
    assert!(!second.changed);

    let graph = session.graph().expect("graph built on first collection");
    assert_eq!(graph.nodes.len(), first.count);
    assert_eq!(graph.links.len(), first.count - 1);
    Ok(())
}

fn summary_of(outcome: CollectOutcome) -> Result<CollectionSummary> {
    match outcome {
        CollectOutcome::Collected(summary) => Ok(summary),
        CollectOutcome::Busy => Err(anyhow!("collection unexpectedly busy")),
    }
}

#[test]
fn test_setting_changes_recollect_and_rebuild_graph() -> Result<()> {
    let dir = setup_test_vault()?;
    let vault = Vault::open(dir.path())?;
    let settings = Settings {
        max_depth: 1,
        include_backlinks: false,
        ..Settings::default()
    };
    let mut session = Session::new(start_of(&vault)?, settings, &vault)
        .with_notifier(RecordingNotifier::default());

    let shallow = summary_of(session.collect()?)?;
    assert_eq!(shallow.count, 3);
    assert_eq!(session.graph().map(|g| g.nodes.len()), Some(3));

    let deep = summary_of(session.set_max_depth(3)?)?;
    assert!(deep.changed);
    assert_eq!(deep.count, 5);
    assert_eq!(session.settings().max_depth, 3);
    let deep_graph = session.graph();
    assert_eq!(deep_graph.as_ref().map(|g| g.nodes.len()), Some(5));

    let again = summary_of(session.collect()?)?;
    assert!(!again.changed);
    assert_eq!(session.graph(), deep_graph);

    let with_backlinks = summary_of(session.set_include_backlinks(true)?)?;
    assert!(with_backlinks.changed);
    assert_eq!(session.graph().map(|g| g.nodes.len()), Some(6));
    assert!(
        session
            .export_text()
            .is_some_and(|text| text.contains("up to **3** hops"))
    );
    Ok(())
}

#[test]
fn test_invalid_depth_keeps_current_settings() -> Result<()> {
    let dir = setup_test_vault()?;
    let vault = Vault::open(dir.path())?;
    let mut session = Session::new(start_of(&vault)?, Settings::default(), &vault)
        .with_notifier(RecordingNotifier::default());
    session.collect()?;
    let before = session.records();

    for depth in [0, 11] {
        let err = session.set_max_depth(depth).expect_err("depth out of range");
        assert!(matches!(
            err,
            CollectionError::Settings(ConfigError::DepthOutOfRange { .. })
        ));
    }
    assert_eq!(session.settings().max_depth, 3);
    assert_eq!(session.records(), before);
    Ok(())
}

#[test]
fn test_save_creates_then_updates_output_file() -> Result<()> {
    let dir = setup_test_vault()?;
    let vault = Vault::open(dir.path())?;
    let notifier = RecordingNotifier::default();
    let session =
        Session::new(start_of(&vault)?, Settings::default(), &vault).with_notifier(notifier.clone());

    assert_eq!(session.save_to_file(None)?, Some(SaveOutcome::Created));
    assert_eq!(session.save_to_file(None)?, Some(SaveOutcome::Updated));

    let saved = fs::read_to_string(dir.path().join("packup-output.md"))?;
    assert_eq!(Some(saved), session.export_text());
    assert_eq!(
        notifier.messages(),
        vec![
            "Created file: packup-output.md".to_owned(),
            "Updated file: packup-output.md".to_owned(),
        ]
    );
    Ok(())
}

#[test]
fn test_save_normalizes_filename() -> Result<()> {
    let dir = setup_test_vault()?;
    let vault = Vault::open(dir.path())?;
    let session = Session::new(start_of(&vault)?, Settings::default(), &vault)
        .with_notifier(RecordingNotifier::default());

    session.save_to_file(Some("exports\\context"))?;
    assert!(dir.path().join("exports/context.md").is_file());
    Ok(())
}

#[test]
fn test_output_file_is_excluded_from_next_collection() -> Result<()> {
    let dir = setup_test_vault()?;
    let vault = Vault::open(dir.path())?;
    let session = Session::new(start_of(&vault)?, Settings::default(), &vault)
        .with_notifier(RecordingNotifier::default());
    session.save_to_file(None)?;

    let reopened = Vault::open(dir.path())?;
    let session = Session::new(start_of(&reopened)?, Settings::default(), &reopened)
        .with_notifier(RecordingNotifier::default());
    session.collect()?;
    let records: Vec<CollectedRecord> = session.records().unwrap_or_default();
    assert!(records.iter().all(|r| r.path() != "packup-output.md"));
    Ok(())
}

#[test]
fn test_copy_to_clipboard() -> Result<()> {
    let dir = setup_test_vault()?;
    let vault = Vault::open(dir.path())?;
    let notifier = RecordingNotifier::default();
    let clipboard = RecordingClipboard::default();
    let session = Session::new(start_of(&vault)?, Settings::default(), &vault)
        .with_notifier(notifier.clone())
        .with_clipboard(clipboard.clone());

    let count = session.copy_to_clipboard()?;
    assert_eq!(Some(clipboard.text()), session.export_text());
    assert_eq!(
        notifier.messages(),
        vec![format!("Copied {count} notes to clipboard!")]
    );
    Ok(())
}

#[test]
fn test_failed_save_keeps_collection_for_retry() -> Result<()> {
    let dir = setup_test_vault()?;
    let (vault, _entered, _release) = GatedVault::new(Vault::open(dir.path())?, false, true);
    let notifier = RecordingNotifier::default();
    let session = Session::new(start_of(&vault.inner)?, Settings::default(), &vault)
        .with_notifier(notifier.clone());

    let err = session.save_to_file(None).expect_err("save should fail");
    assert!(matches!(err, ExportError::Save { .. }));
    assert!(session.export_text().is_some());
    assert_eq!(
        notifier.messages(),
        vec!["Error saving file: read-only vault".to_owned()]
    );
    Ok(())
}

#[test]
fn test_collection_error_is_noticed() -> Result<()> {
    let dir = setup_test_vault()?;
    let vault = Vault::open(dir.path())?;
    fs::remove_file(dir.path().join("A.md"))?;
    let notifier = RecordingNotifier::default();
    let session =
        Session::new(start_of(&vault)?, Settings::default(), &vault).with_notifier(notifier.clone());

    let err = session.collect().expect_err("start note is gone");
    assert!(matches!(err, CollectionError::StartUnreadable { .. }));
    assert!(session.records().is_none());
    assert!(
        notifier
            .messages()
            .first()
            .is_some_and(|m| m.starts_with("Collection error: Collection failed:"))
    );
    Ok(())
}

#[test]
fn test_second_collection_while_busy_is_rejected() -> Result<()> {
    let dir = setup_test_vault()?;
    let (vault, entered, release) = GatedVault::new(Vault::open(dir.path())?, true, false);
    let notifier = RecordingNotifier::default();
    let session = Session::new(start_of(&vault.inner)?, Settings::default(), &vault)
        .with_notifier(notifier.clone());

    thread::scope(|scope| -> Result<()> {
        let running = scope.spawn(|| session.collect());

        entered.recv()?;
        assert!(session.is_collecting());
        assert_eq!(session.collect()?, CollectOutcome::Busy);
        session.ensure_collection()?;
        release.send(())?;

        let outcome = running
            .join()
            .map_err(|_| anyhow!("collector thread panicked"))??;
        assert!(matches!(outcome, CollectOutcome::Collected(_)));
        Ok(())
    })?;

    assert!(!session.is_collecting());
    assert_eq!(
        notifier.messages(),
        vec![BUSY_NOTICE.to_owned(), BUSY_NOTICE.to_owned()]
    );
    Ok(())
}

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use wordhtml_core::models::preset::Preset;
use wordhtml_desktop::error::SessionError;
use wordhtml_desktop::session::Session;
use wordhtml_export::converter::{BoxFuture, DocumentConverter};
use wordhtml_export::directives::Directives;
use wordhtml_export::error::ExportError;

/// Counts invocations and returns a fixed fragment.
#[derive(Default)]
struct CountingConverter {
    calls: AtomicUsize,
}

impl DocumentConverter for CountingConverter {
    fn name(&self) -> &str {
        "counting"
    }

    fn convert<'a>(
        &'a self,
        _input: &'a Path,
        _directives: &'a Directives,
    ) -> BoxFuture<'a, Result<String, ExportError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async { Ok("<p>converted</p>".to_string()) })
    }
}

fn touch(dir: &Path, name: &str, bytes: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, vec![b'x'; bytes]).unwrap();
    path
}

#[test]
fn new_session_starts_from_the_default_preset() {
    let session = Session::new();
    assert!(session.files().is_empty());
    assert!(session.output_dir().is_none());
    assert_eq!(session.preset(), Some(Preset::Default));
    assert_eq!(*session.options(), Preset::Default.options());
}

#[test]
fn add_files_keeps_only_word_documents() {
    let dir = tempfile::tempdir().unwrap();
    let docx = touch(dir.path(), "report.docx", 1536);
    let doc = touch(dir.path(), "LEGACY.DOC", 10);
    let txt = touch(dir.path(), "notes.txt", 10);

    let mut session = Session::new();
    let added = session.add_files([docx.clone(), txt, doc.clone()]).unwrap();

    assert_eq!(added, 2);
    let names: Vec<&str> = session.files().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["report.docx", "LEGACY.DOC"]);
    assert_eq!(session.files()[0].path, docx);
    assert_eq!(session.files()[0].size, "1.5 KB");
    assert_eq!(session.files()[1].size, "10 Bytes");
}

#[test]
fn add_files_ignores_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let a = touch(dir.path(), "a.docx", 1);
    let b = touch(dir.path(), "b.docx", 1);

    let mut session = Session::new();
    session.add_files([a.clone()]).unwrap();
    assert_eq!(session.add_files([a.clone(), b, a.clone()]).unwrap(), 1);
    assert_eq!(session.files().len(), 2);

    let err = session.add_files([a]).unwrap_err();
    assert!(matches!(err, SessionError::AllAlreadySelected));
}

#[test]
fn add_files_without_documents_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let txt = touch(dir.path(), "notes.txt", 1);
    let missing = dir.path().join("gone.docx");

    let mut session = Session::new();
    let err = session.add_files([txt, missing]).unwrap_err();
    assert!(matches!(err, SessionError::NoValidDocuments));
    assert!(session.files().is_empty());
}

#[test]
fn remove_and_clear_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = touch(dir.path(), "a.docx", 1);
    let b = touch(dir.path(), "b.docx", 1);

    let mut session = Session::new();
    session.add_files([a, b]).unwrap();

    let removed = session.remove_file(0).unwrap();
    assert_eq!(removed.name, "a.docx");
    assert_eq!(session.files().len(), 1);
    assert!(matches!(
        session.remove_file(5),
        Err(SessionError::NoSuchFile(5))
    ));

    session.clear_files();
    assert!(session.files().is_empty());
}

#[test]
fn applying_a_preset_leaves_selection_and_output_alone() {
    let dir = tempfile::tempdir().unwrap();
    let a = touch(dir.path(), "a.docx", 1);

    let mut session = Session::new();
    session.add_files([a]).unwrap();
    session.set_output_dir(dir.path().to_path_buf());
    let files_before = session.files().to_vec();

    session.apply_preset(Preset::Print);

    assert_eq!(session.files(), files_before.as_slice());
    assert_eq!(session.output_dir(), Some(dir.path()));
    assert_eq!(*session.options(), Preset::Print.options());
    assert_eq!(session.preset(), Some(Preset::Print));
}

#[test]
fn sequential_presets_end_in_the_last_one() {
    let mut session = Session::new();
    session.apply_preset(Preset::Clean);
    session.apply_preset(Preset::Web);
    assert_eq!(*session.options(), Preset::Web.options());
    assert_eq!(session.preset(), Some(Preset::Web));
}

#[test]
fn editing_an_option_clears_the_preset_marker() {
    let mut session = Session::new();
    session.set_option("font_size", "18").unwrap();
    assert_eq!(session.options().font_size, 18);
    assert_eq!(session.preset(), None);

    session.apply_preset(Preset::Clean);
    session.assign_option("table-striped=yes").unwrap();
    assert!(session.options().table_striped);
    assert_eq!(session.preset(), None);
}

#[test]
fn invalid_option_leaves_options_unchanged() {
    let mut session = Session::new();
    let err = session.set_option("font_size", "0").unwrap_err();
    assert!(matches!(err, SessionError::Core(_)));
    assert_eq!(*session.options(), Preset::Default.options());
    assert_eq!(session.preset(), Some(Preset::Default));
}

#[tokio::test]
async fn conversion_requires_files() {
    let dir = tempfile::tempdir().unwrap();
    let converter = CountingConverter::default();
    let mut session = Session::new();
    session.set_output_dir(dir.path().to_path_buf());

    let err = session
        .start_conversion(&converter, |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::NoFilesSelected));
    assert_eq!(converter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn conversion_requires_an_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let a = touch(dir.path(), "a.docx", 1);
    let converter = CountingConverter::default();
    let mut session = Session::new();
    session.add_files([a]).unwrap();

    let err = session
        .start_conversion(&converter, |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::NoOutputDirectory));
    assert_eq!(converter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn conversion_runs_every_selected_file_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let a = touch(dir.path(), "a.docx", 1);
    let b = touch(dir.path(), "b.docx", 1);
    let converter = CountingConverter::default();

    let mut session = Session::new();
    session.add_files([b, a]).unwrap();
    session.set_output_dir(out.path().to_path_buf());

    let mut progress = Vec::new();
    let results = session
        .start_conversion(&converter, |p| progress.push(p.file.clone()))
        .await
        .unwrap();

    assert_eq!(converter.calls.load(Ordering::SeqCst), 2);
    let files: Vec<&str> = results.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, ["b.docx", "a.docx"]);
    assert_eq!(progress, ["b.docx", "a.docx"]);
    assert!(results.iter().all(|r| r.is_success()));
    assert!(out.path().join("a.html").exists());
    assert!(out.path().join("b.html").exists());
}

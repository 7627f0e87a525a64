#![allow(clippy::unwrap_used)]
//! End-to-end session tests.
//!
//! Each test drives the whole flow (languages, document, model, review) with
//! a scripted key sequence, an in-memory terminal and a stub backend, then
//! checks what ended up on disk.

use anyhow::{Result, bail};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use segtran::app::App;
use segtran::document::{DocumentStore, format};
use segtran::error::{BackendError, StartupError};
use segtran::input::{Key, KeySource};
use segtran::session::Stage;
use segtran::translation::TranslationBackend;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct ScriptedKeys(VecDeque<Key>);

impl ScriptedKeys {
    fn new(keys: &[Key]) -> Self {
        Self(keys.iter().copied().collect())
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> Result<Key> {
        match self.0.pop_front() {
            Some(key) => Ok(key),
            None => bail!("key script exhausted"),
        }
    }
}

/// Translates "Hello" and "World", hands out queued model lists, and can be
/// told to fail the next translation.
struct StubBackend {
    models: RefCell<VecDeque<Vec<String>>>,
    fail_next: Cell<bool>,
    translations: Cell<usize>,
}

impl StubBackend {
    fn new(model_lists: &[&[&str]]) -> Self {
        Self {
            models: RefCell::new(
                model_lists
                    .iter()
                    .map(|list| list.iter().map(ToString::to_string).collect())
                    .collect(),
            ),
            fail_next: Cell::new(false),
            translations: Cell::new(0),
        }
    }
}

impl TranslationBackend for StubBackend {
    fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
        _model: &str,
    ) -> Result<String, BackendError> {
        if self.fail_next.replace(false) {
            return Err(BackendError::Timeout(std::time::Duration::from_secs(120)));
        }
        self.translations.set(self.translations.get() + 1);
        Ok(match (text, target_language) {
            ("Hello", "French") => "Bonjour".to_string(),
            ("World", "French") => "Monde".to_string(),
            (other, target) => format!("{other} ({target})"),
        })
    }

    fn list_models(&self) -> Result<Vec<String>, BackendError> {
        Ok(self.models.borrow_mut().pop_front().unwrap_or_default())
    }
}

struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    fn new(documents: &[(&str, &str)]) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let docs = temp_dir.path().join("documents");
        fs::create_dir_all(&docs).unwrap();
        for (name, content) in documents {
            fs::write(docs.join(name), content).unwrap();
        }
        Self { temp_dir }
    }

    fn store(&self) -> DocumentStore {
        DocumentStore::new(
            self.temp_dir.path().join("documents"),
            self.temp_dir.path().join("translations"),
        )
    }

    fn output(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join("translations").join(name)
    }

    fn run(&self, backend: &StubBackend, keys: &[Key]) -> Result<segtran::session::Session> {
        let languages = vec!["English".to_string(), "French".to_string()];
        let app = App::new(self.store(), backend, languages, 1000);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        app.run(&mut terminal, &mut ScriptedKeys::new(keys))
    }
}

/// Target French, confirm the first document and the first model.
const TO_REVIEW: [Key; 4] = [Key::Right, Key::Enter, Key::Enter, Key::Enter];

fn with_review(keys: &[Key]) -> Vec<Key> {
    TO_REVIEW.iter().chain(keys).copied().collect()
}

#[test]
fn test_translate_first_segment_and_quit() {
    let workspace = Workspace::new(&[("doc.txt", "Hello\n\nWorld\n")]);
    let backend = StubBackend::new(&[&["llama3"]]);

    let session = workspace
        .run(&backend, &with_review(&[Key::Enter, Key::Char('q')]))
        .unwrap();

    assert_eq!(session.state.stage, Stage::Review);
    assert_eq!(
        fs::read_to_string(workspace.output("doc_French.txt")).unwrap(),
        "Bonjour\n\n"
    );
}

#[test]
fn test_accept_as_is_keeps_source_text() {
    let workspace = Workspace::new(&[("doc.txt", "Hello\nWorld")]);
    let backend = StubBackend::new(&[&["llama3"]]);

    let session = workspace
        .run(
            &backend,
            &with_review(&[Key::Enter, Key::Down, Key::Right, Key::Char('q')]),
        )
        .unwrap();

    let review = session.review.as_ref().unwrap();
    assert_eq!(review.translations(), ["Bonjour", "World"]);
    assert_eq!(backend.translations.get(), 1);
    assert_eq!(
        fs::read_to_string(workspace.output("doc_French.txt")).unwrap(),
        "Bonjour\n\nWorld"
    );
}

#[test]
fn test_resume_restores_previous_session() {
    let workspace = Workspace::new(&[("doc.txt", "Hello\nWorld")]);
    let backend = StubBackend::new(&[&["llama3"], &["llama3"]]);

    workspace
        .run(&backend, &with_review(&[Key::Enter, Key::Char('q')]))
        .unwrap();
    let session = workspace
        .run(
            &backend,
            &with_review(&[Key::Down, Key::Enter, Key::Char('q')]),
        )
        .unwrap();

    let review = session.review.as_ref().unwrap();
    assert_eq!(review.restored(), 1);
    assert_eq!(review.translations(), ["Bonjour", "Monde"]);
    assert_eq!(
        fs::read_to_string(workspace.output("doc_French.txt")).unwrap(),
        "Bonjour\n\nMonde"
    );
}

#[test]
fn test_unreadable_translation_file_is_kept_as_backup() {
    let workspace = Workspace::new(&[("doc.txt", "Hello\nWorld")]);
    let translations = workspace.temp_dir.path().join("translations");
    fs::create_dir_all(&translations).unwrap();
    let original = b"Bonjour\n\nMonde caf\xE9".to_vec();
    fs::write(workspace.output("doc_French.txt"), &original).unwrap();
    let backend = StubBackend::new(&[&["llama3"]]);

    let session = workspace
        .run(&backend, &with_review(&[Key::Char('q')]))
        .unwrap();

    let review = session.review.as_ref().unwrap();
    assert!(review.resume_error().is_some());
    assert_eq!(
        fs::read(workspace.output("doc_French.txt.bak")).unwrap(),
        original
    );
    assert_eq!(
        fs::read_to_string(workspace.output("doc_French.txt")).unwrap(),
        "\n\n"
    );
}

#[test]
fn test_docx_document_round_trip() {
    let workspace = Workspace::new(&[]);
    let source = workspace.temp_dir.path().join("documents").join("doc.docx");
    let paragraphs = ["Hello", "", "World"].map(String::from);
    format::for_path(&source)
        .write_entries(&source, &paragraphs)
        .unwrap();
    let backend = StubBackend::new(&[&["llama3"], &["llama3"]]);

    workspace
        .run(&backend, &with_review(&[Key::Enter, Key::Char('q')]))
        .unwrap();
    let output = workspace.output("doc_French.docx");
    assert_eq!(
        format::for_path(&output).read_entries(&output).unwrap(),
        Some(vec!["Bonjour".to_string(), String::new()])
    );

    let session = workspace
        .run(
            &backend,
            &with_review(&[Key::Down, Key::Enter, Key::Char('q')]),
        )
        .unwrap();

    assert_eq!(session.review.as_ref().unwrap().restored(), 1);
    assert_eq!(
        format::for_path(&output).read_entries(&output).unwrap(),
        Some(vec!["Bonjour".to_string(), "Monde".to_string()])
    );
}

#[test]
fn test_empty_model_list_waits_for_refresh() {
    let workspace = Workspace::new(&[("doc.txt", "Hello")]);
    let backend = StubBackend::new(&[&[], &["gemma3", "llama3"]]);

    let keys = [
        Key::Right,
        Key::Enter,
        Key::Enter,
        // No models yet: confirmation is rejected
        Key::Enter,
        Key::Char('r'),
        Key::Down,
        Key::Enter,
        Key::Enter,
        Key::Char('q'),
    ];
    let session = workspace.run(&backend, &keys).unwrap();

    assert_eq!(session.state.model_id.as_deref(), Some("llama3"));
    assert_eq!(
        fs::read_to_string(workspace.output("doc_French.txt")).unwrap(),
        "Bonjour"
    );
}

#[test]
fn test_backend_failure_is_recoverable() {
    let workspace = Workspace::new(&[("doc.txt", "Hello")]);
    let backend = StubBackend::new(&[&["llama3"]]);
    backend.fail_next.set(true);

    let session = workspace
        .run(&backend, &with_review(&[Key::Enter, Key::Enter, Key::Char('q')]))
        .unwrap();

    assert_eq!(session.review.as_ref().unwrap().translations(), ["Bonjour"]);
    assert_eq!(backend.translations.get(), 1);
}

#[test]
fn test_quit_during_selection_writes_nothing() {
    let workspace = Workspace::new(&[("doc.txt", "Hello")]);
    let backend = StubBackend::new(&[&["llama3"]]);

    let session = workspace
        .run(&backend, &[Key::Right, Key::Enter, Key::Char('q')])
        .unwrap();

    assert_eq!(session.state.stage, Stage::Document);
    assert!(!workspace.output("doc_French.txt").exists());
}

#[test]
fn test_redraw_keys_are_ignored() {
    let workspace = Workspace::new(&[("doc.txt", "Hello")]);
    let backend = StubBackend::new(&[&["llama3"]]);

    let session = workspace
        .run(&backend, &[Key::Redraw, Key::Right, Key::Redraw, Key::Char('q')])
        .unwrap();

    assert_eq!(session.state.stage, Stage::Language);
    assert_eq!(session.target_language(), "French");
}

#[test]
fn test_terminal_too_small_aborts_before_selection() {
    let workspace = Workspace::new(&[("doc.txt", "Hello")]);
    let backend = StubBackend::new(&[&["llama3"]]);
    let app = App::new(workspace.store(), &backend, vec!["English".to_string()], 1000);
    let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
    let mut keys = ScriptedKeys::new(&[Key::Char('q')]);

    let err = app.run(&mut terminal, &mut keys).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<StartupError>(),
        Some(StartupError::TerminalTooSmall {
            width: 80,
            height: 10,
            ..
        })
    ));
    assert_eq!(keys.0.len(), 1);
}

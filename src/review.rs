//! The review loop: navigate segments, translate or accept them, and keep
//! the translation file in step with every change.

use anyhow::bail;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::format;
use crate::document::persist;
use crate::input::Key;
use crate::session::{Flow, Session, Status};
use crate::translation::TranslationBackend;

/// Segments of one document and their index-aligned translations.
#[derive(Debug)]
pub struct Review {
    document: String,
    segments: Vec<String>,
    translations: Vec<String>,
    output_path: PathBuf,
    restored: usize,
    /// Why an existing translation file could not be resumed.
    resume_error: Option<String>,
    /// Where that unreadable file was moved.
    backup_path: Option<PathBuf>,
    /// The unreadable file is still at `output_path` and must not be replaced.
    overwrite_blocked: bool,
    /// The last save failed; the on-disk file is behind.
    unsaved: bool,
    /// Quit was requested while unsaved; the next quit leaves anyway.
    quit_armed: bool,
}

impl Review {
    /// Starts reviewing `segments`, resuming from `output_path` if it exists.
    ///
    /// A translation file that exists but cannot be read is moved to a
    /// `.bak` sibling before anything is saved. If it cannot be moved, saves
    /// fail until the session ends.
    pub fn open(document: String, segments: Vec<String>, output_path: PathBuf) -> Self {
        let mut translations = vec![String::new(); segments.len()];
        let mut resume_error = None;
        let mut backup_path = None;
        let mut overwrite_blocked = false;

        let restored = match format::for_path(&output_path).read_entries(&output_path) {
            Ok(Some(persisted)) => persist::merge(&mut translations, persisted),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(
                    path = %output_path.display(),
                    error = %format!("{e:#}"),
                    "cannot resume translations"
                );
                resume_error = Some(format!("{e:#}"));
                match move_aside(&output_path) {
                    Ok(backup) => backup_path = Some(backup),
                    Err(e) => {
                        tracing::error!(error = %e, "cannot back up unreadable translations");
                        overwrite_blocked = true;
                    }
                }
                0
            }
        };

        tracing::info!(
            document = %document,
            segments = segments.len(),
            restored,
            "review started"
        );

        Self {
            document,
            segments,
            translations,
            output_path,
            restored,
            resume_error,
            backup_path,
            overwrite_blocked,
            unsaved: false,
            quit_armed: false,
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn translations(&self) -> &[String] {
        &self.translations
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Non-empty translations merged from disk when the review opened.
    pub const fn restored(&self) -> usize {
        self.restored
    }

    /// Set when an existing translation file could not be read.
    pub fn resume_error(&self) -> Option<&str> {
        self.resume_error.as_deref()
    }

    /// Where the unreadable translation file was kept.
    pub fn backup_path(&self) -> Option<&Path> {
        self.backup_path.as_deref()
    }

    pub const fn unsaved(&self) -> bool {
        self.unsaved
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn word_count(&self, index: usize) -> usize {
        self.segments
            .get(index)
            .map_or(0, |s| s.split_whitespace().count())
    }

    /// Writes the whole translation map to disk.
    fn save(&mut self) -> anyhow::Result<()> {
        let result = if self.overwrite_blocked {
            Err(anyhow::anyhow!(
                "{} could not be read and was not replaced",
                self.output_path.display()
            ))
        } else {
            format::for_path(&self.output_path)
                .write_entries(&self.output_path, &self.translations)
        };
        self.unsaved = result.is_err();
        if self.unsaved {
            tracing::error!(path = %self.output_path.display(), "failed to save translations");
        } else {
            self.quit_armed = false;
        }
        result
    }
}

/// Renames `path` to the first free `{name}.bak` / `{name}.bak.N` sibling.
fn move_aside(path: &Path) -> anyhow::Result<PathBuf> {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        bail!("{} has no file name", path.display());
    };

    let backup = (0..100)
        .map(|n| match n {
            0 => path.with_file_name(format!("{name}.bak")),
            n => path.with_file_name(format!("{name}.bak.{n}")),
        })
        .find(|candidate| !candidate.exists());
    let Some(backup) = backup else {
        bail!("no free backup name next to {}", path.display());
    };

    fs::rename(path, &backup)?;
    tracing::info!(
        from = %path.display(),
        to = %backup.display(),
        "moved unreadable translations aside"
    );
    Ok(backup)
}

/// Review stage: Up/Down move between segments, Enter translates, Right
/// accepts the source text as-is, `q` saves and quits.
pub fn on_key(session: &mut Session, key: Key, translator: &dyn TranslationBackend) -> Flow {
    let Some(review) = session.review.as_mut() else {
        tracing::error!("review stage without a review");
        return Flow::Quit;
    };
    if review.is_empty() && !key.is_quit() {
        return Flow::Continue;
    }
    let last = review.len().saturating_sub(1);
    let current = session.state.current_segment.min(last);

    match key {
        k if k.is_quit() => return quit(session),
        Key::Up => session.state.current_segment = current.saturating_sub(1),
        Key::Down => session.state.current_segment = (current + 1).min(last),
        Key::Enter => translate_current(session, current, translator),
        Key::Right => {
            review.translations[current] = review.segments[current].clone();
            tracing::debug!(segment = current, "accepted as-is");
            persist(session);
        }
        _ => {}
    }
    Flow::Continue
}

fn translate_current(session: &mut Session, index: usize, translator: &dyn TranslationBackend) {
    let source_language = session.source_language().to_string();
    let target_language = session.target_language().to_string();
    let model = session.state.model_id.clone().unwrap_or_default();
    let Some(review) = session.review.as_mut() else {
        return;
    };

    let segment = &review.segments[index];
    if segment.trim().is_empty() {
        review.translations[index] = String::new();
        persist(session);
        return;
    }

    match translator.translate(segment, &source_language, &target_language, &model) {
        Ok(translated) => {
            tracing::info!(segment = index, model = %model, "segment translated");
            review.translations[index] = translated;
            persist(session);
        }
        Err(e) => {
            tracing::warn!(segment = index, error = %e, "translation failed");
            session.set_status(Status::error(format!("Translation failed: {e}")));
        }
    }
}

/// Saves after a mutation; failures stay visible and are retried next time.
fn persist(session: &mut Session) {
    let Some(review) = session.review.as_mut() else {
        return;
    };
    if let Err(e) = review.save() {
        session.set_status(Status::error(format!("Could not save translations: {e:#}")));
    }
}

fn quit(session: &mut Session) -> Flow {
    let Some(review) = session.review.as_mut() else {
        return Flow::Quit;
    };

    match review.save() {
        Ok(()) => {
            tracing::info!(path = %review.output_path.display(), "review finished");
            Flow::Quit
        }
        Err(_) if review.quit_armed => {
            tracing::error!("quitting with unsaved translations");
            Flow::Quit
        }
        Err(e) => {
            review.quit_armed = true;
            session.set_status(Status::error(format!(
                "Could not save translations: {e:#}. Press 'q' again to quit without saving."
            )));
            Flow::Continue
        }
    }
}

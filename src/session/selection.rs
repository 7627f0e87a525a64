use super::{Flow, LoadedDocument, Session, Stage, Status, cycle};
use crate::document::DocumentStore;
use crate::input::Key;
use crate::review::Review;
use crate::translation::TranslationBackend;

/// Language stage: Up/Down pick the source language, Left/Right the target.
pub fn on_language(session: &mut Session, key: Key, store: &DocumentStore) -> Flow {
    let len = session.languages.len();
    let state = &mut session.state;

    match key {
        k if k.is_quit() => return Flow::Quit,
        Key::Up => state.source_lang = cycle(state.source_lang, len, false),
        Key::Down => state.source_lang = cycle(state.source_lang, len, true),
        Key::Left => state.target_lang = cycle(state.target_lang, len, false),
        Key::Right => state.target_lang = cycle(state.target_lang, len, true),
        Key::Enter => {
            tracing::info!(
                source = session.source_language(),
                target = session.target_language(),
                "languages selected"
            );
            enter_document_stage(session, store);
        }
        _ => {}
    }
    Flow::Continue
}

/// Document stage: Up/Down pick a document, Enter loads and segments it.
pub fn on_document(
    session: &mut Session,
    key: Key,
    store: &DocumentStore,
    translator: &dyn TranslationBackend,
) -> Flow {
    let len = session.documents.len();
    let state = &mut session.state;

    match key {
        k if k.is_quit() => return Flow::Quit,
        Key::Up => state.selected_document = cycle(state.selected_document, len, false),
        Key::Down => state.selected_document = cycle(state.selected_document, len, true),
        Key::Enter => confirm_document(session, store, translator),
        _ => {}
    }
    Flow::Continue
}

/// Model stage: Up/Down pick a model, `r` refreshes the list, Enter starts
/// the review. Confirmation does nothing while no model is available.
pub fn on_model(
    session: &mut Session,
    key: Key,
    store: &DocumentStore,
    translator: &dyn TranslationBackend,
) -> Flow {
    let len = session.models.len();
    let state = &mut session.state;

    match key {
        k if k.is_quit() => return Flow::Quit,
        Key::Up => state.selected_model = cycle(state.selected_model, len, false),
        Key::Down => state.selected_model = cycle(state.selected_model, len, true),
        Key::Char('r') => refresh_models(session, translator),
        Key::Enter => match session.models.get(session.state.selected_model).cloned() {
            Some(model) => {
                tracing::info!(model, "model selected");
                session.state.model_id = Some(model);
                return enter_review(session, store);
            }
            None => session.set_status(Status::error(
                "No models available. Press 'r' to refresh.",
            )),
        },
        _ => {}
    }
    Flow::Continue
}

fn enter_document_stage(session: &mut Session, store: &DocumentStore) {
    session.documents = store.list_documents();
    if session.state.selected_document >= session.documents.len() {
        session.state.selected_document = 0;
    }
    session.state.stage = Stage::Document;
}

fn confirm_document(
    session: &mut Session,
    store: &DocumentStore,
    translator: &dyn TranslationBackend,
) {
    let Some(name) = session.documents.get(session.state.selected_document).cloned() else {
        session.set_status(Status::error(format!(
            "No documents to translate in {}",
            store.documents_dir().display()
        )));
        return;
    };

    let segments = match store.read_document(&name) {
        Ok(segments) => segments,
        Err(e) => {
            tracing::warn!(document = %name, error = %format!("{e:#}"), "failed to read document");
            session.set_status(Status::error(format!("Could not read {name}: {e:#}")));
            return;
        }
    };
    if segments.is_empty() {
        session.set_status(Status::error(format!("{name} has no text to translate")));
        return;
    }

    tracing::info!(document = %name, segments = segments.len(), "document loaded");
    session.document = Some(LoadedDocument { name, segments });
    session.state.stage = Stage::Model;
    refresh_models(session, translator);
}

/// Re-queries the backend. On failure the previous list is kept.
fn refresh_models(session: &mut Session, translator: &dyn TranslationBackend) {
    match translator.list_models() {
        Ok(models) => {
            tracing::info!(count = models.len(), "model list refreshed");
            if session.state.selected_model >= models.len() {
                session.state.selected_model = 0;
            }
            session.models = models;
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to list models");
            session.set_status(Status::error(format!("Could not list models: {e}")));
        }
    }
}

fn enter_review(session: &mut Session, store: &DocumentStore) -> Flow {
    let Some(document) = session.document.take() else {
        tracing::error!("model confirmed without a loaded document");
        return Flow::Quit;
    };

    let output_path = store.output_path(&document.name, session.target_language());
    let review = Review::open(document.name, document.segments, output_path);

    let location = review.output_path().display().to_string();
    session.set_status(match (review.resume_error(), review.backup_path(), review.restored()) {
        (Some(e), Some(backup), _) => Status::error(format!(
            "Could not resume from {location}: {e}. Moved it to {}",
            backup.display()
        )),
        (Some(e), None, _) => Status::error(format!(
            "Could not resume from {location}: {e}. It will not be overwritten."
        )),
        (None, _, 0) => Status::info(format!("Saving to {location}")),
        (None, _, n) => Status::info(format!("Resumed {n} translated segments from {location}")),
    });

    session.state.current_segment = 0;
    session.state.scroll_offset = 0;
    session.state.stage = Stage::Review;
    session.review = Some(review);
    Flow::Continue
}

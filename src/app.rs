//! The interactive driver: draw, read a key, dispatch to the stage handler.

use std::io;
use std::time::Duration;

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::config::ConfigFile;
use crate::document::DocumentStore;
use crate::error::StartupError;
use crate::input::{Key, KeySource, TerminalKeys};
use crate::review;
use crate::session::{Flow, Session, Stage, Status, selection};
use crate::terminal::TerminalGuard;
use crate::translation::{TranslationBackend, TranslationClient, load_languages};
use crate::ui::{self, MIN_HEIGHT, MIN_WIDTH, ViewOptions};

/// Collaborators of one interactive session.
pub struct App<'a> {
    documents: DocumentStore,
    translator: &'a dyn TranslationBackend,
    languages: Vec<String>,
    options: ViewOptions,
}

impl<'a> App<'a> {
    pub fn new(
        documents: DocumentStore,
        translator: &'a dyn TranslationBackend,
        languages: Vec<String>,
        word_warning: usize,
    ) -> Self {
        let options = ViewOptions {
            word_warning,
            documents_dir: documents.documents_dir().display().to_string(),
        };
        Self {
            documents,
            translator,
            languages,
            options,
        }
    }

    /// Runs the session until the user quits and returns its final state.
    ///
    /// Fails with [`StartupError::TerminalTooSmall`] before reading any key
    /// when the terminal is below the minimum size.
    pub fn run<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        keys: &mut dyn KeySource,
    ) -> Result<Session> {
        let area = terminal.size()?;
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            return Err(StartupError::TerminalTooSmall {
                width: area.width,
                height: area.height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            }
            .into());
        }

        let mut session = Session::new(self.languages.clone())?;
        tracing::info!(languages = session.languages.len(), "session started");

        loop {
            terminal.draw(|frame| ui::draw(frame, &mut session, &self.options))?;

            let key = keys.next_key()?;
            if key == Key::Redraw {
                continue;
            }
            session.status = None;

            if session.state.stage == Stage::Review && key == Key::Enter {
                // Translation blocks; show that it is in progress first
                session.set_status(Status::info("Translating..."));
                terminal.draw(|frame| ui::draw(frame, &mut session, &self.options))?;
                session.status = None;
            }

            if self.dispatch(&mut session, key) == Flow::Quit {
                break;
            }
        }

        tracing::info!(stage = ?session.state.stage, "session ended");
        Ok(session)
    }

    fn dispatch(&self, session: &mut Session, key: Key) -> Flow {
        match session.state.stage {
            Stage::Language => selection::on_language(session, key, &self.documents),
            Stage::Document => {
                selection::on_document(session, key, &self.documents, self.translator)
            }
            Stage::Model => selection::on_model(session, key, &self.documents, self.translator),
            Stage::Review => review::on_key(session, key, self.translator),
        }
    }
}

/// Loads the language list, connects the backend and runs a full-screen
/// session on the real terminal.
pub fn run(config: &ConfigFile) -> Result<()> {
    let languages = load_languages(&config.paths.languages)?;

    let translator = TranslationClient::new(
        config.backend.endpoint.clone(),
        config.backend.get_api_key(),
        Duration::from_secs(config.backend.timeout_secs),
    )?;
    let documents = DocumentStore::new(
        config.paths.documents.clone(),
        config.paths.translations.clone(),
    );
    let app = App::new(documents, &translator, languages, config.review.word_warning);

    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    app.run(&mut terminal, &mut TerminalKeys)?;
    Ok(())
}

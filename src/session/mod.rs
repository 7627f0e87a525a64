//! Session context and the pre-review selection flow.
//!
//! A [`Session`] is the single owner of everything the interactive loop
//! mutates. Stage handlers receive it by `&mut` and return a [`Flow`].

/// Language, document and model selection handlers.
pub mod selection;
mod state;

pub use state::{SessionState, Stage, cycle};

use crate::error::StartupError;
use crate::review::Review;

/// One-line message shown in the status area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self::Info(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Info(text) | Self::Error(text) => text,
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// What the driver should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A document picked in the document stage, already segmented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub name: String,
    pub segments: Vec<String>,
}

/// Everything one interactive session works on.
#[derive(Debug)]
pub struct Session {
    pub state: SessionState,
    pub languages: Vec<String>,
    pub documents: Vec<String>,
    pub models: Vec<String>,
    pub status: Option<Status>,
    pub document: Option<LoadedDocument>,
    pub review: Option<Review>,
}

impl Session {
    pub fn new(languages: Vec<String>) -> Result<Self, StartupError> {
        if languages.is_empty() {
            return Err(StartupError::EmptyLanguages {
                path: "languages".into(),
            });
        }

        Ok(Self {
            state: SessionState::default(),
            languages,
            documents: Vec::new(),
            models: Vec::new(),
            status: None,
            document: None,
            review: None,
        })
    }

    pub fn source_language(&self) -> &str {
        &self.languages[self.state.source_lang % self.languages.len()]
    }

    pub fn target_language(&self) -> &str {
        &self.languages[self.state.target_lang % self.languages.len()]
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }
}

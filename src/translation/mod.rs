mod client;
mod language;
mod prompt;
mod sse_parser;

pub use client::{TranslationClient, TranslationRequest, filter_translation_models};
pub use language::{load_languages, parse_languages};

use crate::error::BackendError;

/// The translation service as seen by the session.
///
/// Calls block until the backend answers or fails. Implementations decide
/// how to bound that wait; the session only sees the `Result`.
pub trait TranslationBackend {
    /// Translates `text` from `source_language` into `target_language`.
    fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        model: &str,
    ) -> Result<String, BackendError>;

    /// Lists models usable for translation. May legitimately be empty.
    fn list_models(&self) -> Result<Vec<String>, BackendError>;
}

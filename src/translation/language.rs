//! Language list loading.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::StartupError;

/// Parses a newline-delimited language list. Entries are trimmed and blank
/// lines are skipped.
pub fn parse_languages(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Loads the language list offered in the selection flow.
///
/// # Errors
///
/// Returns a [`StartupError`] if the file is missing, unreadable, or lists
/// no languages.
pub fn load_languages(path: &Path) -> Result<Vec<String>, StartupError> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StartupError::MissingLanguages {
            path: path.to_path_buf(),
        },
        _ => StartupError::UnreadableLanguages {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let languages = parse_languages(&contents);
    if languages.is_empty() {
        return Err(StartupError::EmptyLanguages {
            path: path.to_path_buf(),
        });
    }

    Ok(languages)
}

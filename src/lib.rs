//! # segtran - Segment-by-Segment Document Translation
//!
//! `segtran` walks a document (plain text or `.docx`) one segment at a time,
//! shows each segment beside its translation, and asks an OpenAI-compatible
//! backend to translate on demand. Every change is saved immediately, so
//! quitting and starting again resumes where the previous session stopped.
//!
//! ## Quick Start
//!
//! ```bash
//! printf 'English\nFrench\n' > languages.txt
//! mkdir documents && cp notes.txt documents/
//! segtran
//! ```
//!
//! Translations land in `translations/notes_French.txt`. A `.docx` document
//! is translated into a `.docx` file with one paragraph per segment.
//!
//! ## Configuration
//!
//! Settings are read from `~/.config/segtran/config.toml`:
//!
//! ```toml
//! [paths]
//! languages = "languages.txt"
//! documents = "documents"
//! translations = "translations"
//!
//! [backend]
//! endpoint = "http://localhost:11434"
//! timeout_secs = 120
//!
//! [review]
//! word_warning = 1000
//!
//! [log]
//! level = "info"
//! ```

/// Interactive driver and program entry.
pub mod app;

/// Command-line interface definitions.
pub mod cli;

/// Configuration file management.
pub mod config;

/// Segmentation, document discovery and translation persistence.
pub mod document;

/// Startup and backend error types.
pub mod error;

/// File system utilities.
pub mod fs;

/// Key events.
pub mod input;

/// Dual-pane line layout.
pub mod layout;

/// File logging setup.
pub mod logging;

/// XDG-style path utilities for configuration and logs.
pub mod paths;

/// The review loop.
pub mod review;

/// Session state and selection flow.
pub mod session;

/// Raw mode and alternate screen guard.
pub mod terminal;

/// Translation client for OpenAI-compatible APIs.
pub mod translation;

/// Terminal rendering.
pub mod ui;

//! Colored text for messages printed to stderr once the full-screen
//! interface has closed, such as startup failures.

use owo_colors::OwoColorize;
use std::fmt::Display;

pub struct Style;

impl Style {
    /// Prefix of fatal messages.
    pub fn error<T: Display>(text: T) -> String {
        text.red().bold().to_string()
    }

    /// File system paths.
    pub fn path<T: Display>(text: T) -> String {
        text.cyan().to_string()
    }

    pub fn hint<T: Display>(text: T) -> String {
        text.dimmed().to_string()
    }
}

//! Cell styles for the full-screen interface.

use ratatui::style::{Color, Modifier, Style};

/// Styles for different semantic elements on screen.
pub struct Theme;

impl Theme {
    /// Screen titles and pane headers
    pub fn title() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// The highlighted entry of a selection list
    pub fn selected() -> Style {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    /// Rows of the segment under review
    pub fn active_segment() -> Style {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    /// Key hints and other secondary text
    pub fn hint() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    /// Word counts above the warning threshold
    pub fn warning() -> Style {
        Style::default().fg(Color::Red)
    }
}

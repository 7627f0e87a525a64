//! Terminal rendering.
//!
//! [`draw`] repaints the whole screen from the session on every frame, so a
//! resize only needs another call.

mod panes;
mod screens;
mod style;
mod theme;

pub use style::Style;
pub use theme::Theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::session::{Session, Stage, Status};

/// Smallest usable terminal.
pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 20;

/// Rendering settings that do not live in the session.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Word count above which the current segment is flagged.
    pub word_warning: usize,
    /// Shown when the documents directory is empty.
    pub documents_dir: String,
}

/// Draws the screen for the session's current stage.
pub fn draw(frame: &mut Frame, session: &mut Session, options: &ViewOptions) {
    let area = frame.size();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        draw_too_small(frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(area);
    let (body, footer) = (chunks[0], chunks[1]);

    match session.state.stage {
        Stage::Language => screens::draw_languages(frame, body, session),
        Stage::Document => screens::draw_documents(frame, body, session, options),
        Stage::Model => screens::draw_models(frame, body, session),
        Stage::Review => panes::draw_review(frame, body, session),
    }

    let first = match session.state.stage {
        Stage::Review => panes::progress_line(session, options),
        _ => status_line(session.status.as_ref()),
    };
    let footer_text = vec![first, hint_line(session)];
    frame.render_widget(Paragraph::new(footer_text), footer);
}

fn draw_too_small(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal window too small ({}x{}). Please resize to at least {MIN_WIDTH}x{MIN_HEIGHT}.",
        area.width, area.height
    );
    frame.render_widget(
        Paragraph::new(Span::styled(message, Theme::error())).wrap(Wrap { trim: true }),
        area,
    );
}

fn status_line(status: Option<&Status>) -> Line<'static> {
    status.map_or_else(Line::default, |status| Line::from(status_span(status)))
}

fn status_span(status: &Status) -> Span<'static> {
    let style = if status.is_error() {
        Theme::error()
    } else {
        Theme::info()
    };
    Span::styled(status.text().to_string(), style)
}

fn hint_line(session: &Session) -> Line<'static> {
    let hints = match session.state.stage {
        Stage::Language => "↑/↓ source · ←/→ target · Enter confirm · q quit",
        Stage::Document => "↑/↓ select · Enter confirm · q quit",
        Stage::Model => "↑/↓ select · r refresh · Enter confirm · q quit",
        Stage::Review => "↑/↓ segment · Enter translate · → accept as-is · q save & quit",
    };
    Line::from(Span::styled(hints, Theme::hint()))
}

//! The dual-pane review screen.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use super::{Theme, ViewOptions, status_span};
use crate::layout::layout;
use crate::session::Session;

pub fn draw_review(frame: &mut Frame, area: Rect, session: &mut Session) {
    let Some(review) = session.review.as_ref() else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let model = session.state.model_id.as_deref().unwrap_or_default();
    let left_block = pane(format!("{} · {}", review.document(), session.source_language()));
    let right_block = pane(format!("{} · {model}", session.target_language()));
    let left_inner = left_block.inner(columns[0]);
    let right_inner = right_block.inner(columns[1]);

    // Both panes wrap to the same width so their rows line up
    let pane_width = left_inner.width.min(right_inner.width).max(1) as usize;
    let pane_height = left_inner.height.max(1) as usize;
    let current = session.state.current_segment.min(review.len().saturating_sub(1));

    let buffer = layout(
        review.segments(),
        review.translations(),
        current,
        pane_width,
        pane_height,
    );

    let mut left = Vec::with_capacity(pane_height);
    let mut right = Vec::with_capacity(pane_height);
    for (row, source, target) in buffer.visible(pane_height) {
        let style = if buffer.active.contains(&row) {
            Theme::active_segment()
        } else {
            Style::default()
        };
        left.push(Line::from(Span::styled(source.to_string(), style)));
        right.push(Line::from(Span::styled(target.to_string(), style)));
    }

    frame.render_widget(Paragraph::new(left).block(left_block), columns[0]);
    frame.render_widget(Paragraph::new(right).block(right_block), columns[1]);

    session.state.scroll_offset = buffer.scroll_offset;
}

/// `Segment i/N · Words: w`, followed by the save marker and status message.
pub fn progress_line(session: &Session, options: &ViewOptions) -> Line<'static> {
    let Some(review) = session.review.as_ref() else {
        return Line::default();
    };

    let current = session.state.current_segment.min(review.len().saturating_sub(1));
    let words = review.word_count(current);
    let word_style = if words > options.word_warning {
        Theme::warning()
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::raw(format!("Segment {}/{} · ", current + 1, review.len())),
        Span::styled(format!("Words: {words}"), word_style),
    ];
    if review.unsaved() {
        spans.push(Span::raw(" · "));
        spans.push(Span::styled("unsaved", Theme::error()));
    }
    if let Some(status) = session.status.as_ref() {
        spans.push(Span::raw(" · "));
        spans.push(status_span(status));
    }
    Line::from(spans)
}

fn pane(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .title(Span::styled(title, Theme::title()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::tests::{render, session};
    use crate::review::Review;
    use crate::session::{Session, Stage, Status};
    use std::fs;
    use tempfile::TempDir;

    fn review_session(temp_dir: &TempDir, segments: &[&str]) -> Session {
        let mut session = session();
        session.state.target_lang = 1;
        session.state.model_id = Some("llama3".to_string());
        session.state.stage = Stage::Review;
        session.review = Some(Review::open(
            "doc.txt".to_string(),
            segments.iter().map(ToString::to_string).collect(),
            temp_dir.path().join("doc_French.txt"),
        ));
        session
    }

    #[test]
    fn test_panes_show_source_and_translation() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("doc_French.txt"), "Bonjour\n\n").unwrap();
        let mut session = review_session(&temp_dir, &["Hello", "World"]);

        let screen = render(&mut session, 80, 20);
        let rows: Vec<&str> = screen.lines().collect();

        assert!(rows[0].contains("English"));
        assert!(rows[0].contains("French · llama3"));
        assert!(rows[1].contains("Hello"));
        assert!(rows[1].contains("Bonjour"));
        assert!(rows[3].contains("World"));
        assert!(rows[18].contains("Segment 1/2"));
        assert!(rows[18].contains("Words: 1"));
    }

    #[test]
    fn test_footer_reports_position_and_status() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = review_session(&temp_dir, &["one", "two three four five six seven"]);
        session.state.current_segment = 1;
        session.set_status(Status::error("Translation failed: timeout"));

        let screen = render(&mut session, 80, 20);
        let footer = screen.lines().nth(18).unwrap().to_string();

        assert!(footer.contains("Segment 2/2"));
        assert!(footer.contains("Words: 6"));
        assert!(footer.contains("Translation failed: timeout"));
    }

    #[test]
    fn test_render_records_scroll_offset() {
        let temp_dir = TempDir::new().unwrap();
        let segments: Vec<String> = (0..20).map(|i| format!("segment {i}")).collect();
        let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
        let mut session = review_session(&temp_dir, &refs);
        session.state.current_segment = 5;

        let screen = render(&mut session, 80, 20);

        assert_eq!(session.state.scroll_offset, 10);
        assert!(screen.lines().nth(1).unwrap().contains("segment 5"));
    }
}

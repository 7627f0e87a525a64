//! Selection screens shown before the review starts.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use super::{Theme, ViewOptions};
use crate::session::Session;

pub fn draw_languages(frame: &mut Frame, area: Rect, session: &Session) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_list(
        frame,
        columns[0],
        "Source language (↑/↓)",
        &session.languages,
        session.state.source_lang,
    );
    draw_list(
        frame,
        columns[1],
        "Target language (←/→)",
        &session.languages,
        session.state.target_lang,
    );
}

pub fn draw_documents(frame: &mut Frame, area: Rect, session: &Session, options: &ViewOptions) {
    let title = format!(
        "Document to translate ({} → {})",
        session.source_language(),
        session.target_language()
    );
    if session.documents.is_empty() {
        let message = format!("No documents found in {}", options.documents_dir);
        draw_empty(frame, area, &title, vec![Line::from(message)]);
        return;
    }
    draw_list(
        frame,
        area,
        &title,
        &session.documents,
        session.state.selected_document,
    );
}

pub fn draw_models(frame: &mut Frame, area: Rect, session: &Session) {
    let title = session.document.as_ref().map_or_else(
        || "Model".to_string(),
        |document| format!("Model for {}", document.name),
    );
    if session.models.is_empty() {
        let lines = vec![
            Line::from("No models available."),
            Line::from(Span::styled("Press 'r' to refresh", Theme::hint())),
        ];
        draw_empty(frame, area, &title, lines);
        return;
    }
    draw_list(
        frame,
        area,
        &title,
        &session.models,
        session.state.selected_model,
    );
}

fn draw_list(frame: &mut Frame, area: Rect, title: &str, entries: &[String], selected: usize) {
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| ListItem::new(entry.as_str()))
        .collect();
    let list = List::new(items)
        .block(titled(title))
        .highlight_style(Theme::selected())
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_empty(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    frame.render_widget(Paragraph::new(lines).block(titled(title)), area);
}

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Theme::title()))
}

//! Dual-pane layout: wraps segments and translations into row-aligned lines.

use std::ops::Range;
use unicode_width::UnicodeWidthStr;

/// Wrapped lines for both panes, plus where the viewport should start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayBuffer {
    /// Source pane lines.
    pub left: Vec<String>,
    /// Translation pane lines; always as long as `left`.
    pub right: Vec<String>,
    /// First line to show, already clamped to the scrollable range.
    pub scroll_offset: usize,
    /// Rows occupied by the active segment's block (separator excluded).
    pub active: Range<usize>,
}

impl DisplayBuffer {
    /// Rows visible in a viewport of `height` lines, as `(row, left, right)`.
    pub fn visible(&self, height: usize) -> impl Iterator<Item = (usize, &str, &str)> {
        let end = self.left.len().min(self.scroll_offset + height);
        (self.scroll_offset..end)
            .map(|row| (row, self.left[row].as_str(), self.right[row].as_str()))
    }
}

/// Greedy word wrap to `width` display columns.
///
/// Words are never split; a word wider than `width` gets a line to itself.
/// Whitespace runs collapse to single spaces and blank text yields no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if line.is_empty() {
            line.push_str(word);
            line_width = word_width;
        } else if line_width + 1 + word_width <= width {
            line.push(' ');
            line.push_str(word);
            line_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_width = word_width;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Lays out `segments` beside `translations` for panes of the given size.
///
/// Each pair forms a block as tall as the longer of its two wrapped texts,
/// followed by one blank separator row, so both panes stay row-aligned. The
/// scroll offset puts the block of `current` at the top of the viewport,
/// clamped so the last page is never scrolled past.
pub fn layout(
    segments: &[String],
    translations: &[String],
    current: usize,
    pane_width: usize,
    pane_height: usize,
) -> DisplayBuffer {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut offset = 0;
    let mut active = 0..0;

    for (index, segment) in segments.iter().enumerate() {
        let source = wrap(segment, pane_width);
        let target = translations
            .get(index)
            .map(|t| wrap(t, pane_width))
            .unwrap_or_default();

        let start = left.len();
        let height = source.len().max(target.len());

        left.extend(source);
        right.extend(target);
        left.resize(start + height, String::new());
        right.resize(start + height, String::new());

        if index < current {
            offset += height + 1;
        } else if index == current {
            active = start..start + height;
        }

        left.push(String::new());
        right.push(String::new());
    }

    let max_scroll = left.len().saturating_sub(pane_height.max(1));

    DisplayBuffer {
        left,
        right,
        scroll_offset: offset.min(max_scroll),
        active,
    }
}

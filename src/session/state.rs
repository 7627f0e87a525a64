/// Stages of a session, strictly in this order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Language,
    Document,
    Model,
    Review,
}

/// Selection and navigation indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub source_lang: usize,
    pub target_lang: usize,
    pub selected_document: usize,
    pub selected_model: usize,
    /// Model confirmed in the model stage.
    pub model_id: Option<String>,
    pub current_segment: usize,
    /// Last scroll offset computed by the layout engine.
    pub scroll_offset: usize,
    pub stage: Stage,
}

/// Moves `index` one step through a list of `len` items, wrapping at both
/// ends. An empty list leaves the index at 0.
pub const fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    let index = index % len;
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

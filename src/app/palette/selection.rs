use super::item::PaletteItem;

/// The flattened result list and the highlighted position in it.
/// `active_index < results.len()` whenever `results` is non-empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    pub active_index: usize,
    pub results: Vec<PaletteItem>,
    /// First drawn row of the result list. Owned by the renderer; kept
    /// across frames so pointing at a row does not scroll it away.
    pub scroll_offset: usize,
}

impl SelectionState {
    /// Commits a fresh result list and resets the highlight.
    pub fn replace(&mut self, results: Vec<PaletteItem>) {
        self.results = results;
        self.active_index = 0;
        self.scroll_offset = 0;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn move_down(&mut self) {
        if !self.results.is_empty() {
            self.active_index = (self.active_index + 1).min(self.results.len() - 1);
        }
    }

    pub fn move_up(&mut self) {
        self.active_index = self.active_index.saturating_sub(1);
    }

    pub fn hover(&mut self, index: usize) {
        if index < self.results.len() {
            self.active_index = index;
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&PaletteItem> {
        self.results.get(self.active_index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

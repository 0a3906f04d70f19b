/// Depth every column starts at after setup or resize.
pub const START_DEPTH: u32 = 1;

/// Depth a column respawns at once it has fallen past the bottom.
pub const TOP_DEPTH: u32 = 0;

/// Per-column fall depth, measured in glyph cells from the top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnState {
    depths: Vec<u32>,
}

impl ColumnState {
    pub fn new(count: usize) -> Self {
        Self {
            depths: vec![START_DEPTH; count],
        }
    }

    /// Discard all depths and start `count` fresh columns.
    pub fn reset(&mut self, count: usize) {
        self.depths.clear();
        self.depths.resize(count, START_DEPTH);
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn depths(&self) -> &[u32] {
        &self.depths
    }

    pub fn depth(&self, column: usize) -> Option<u32> {
        self.depths.get(column).copied()
    }

    pub(crate) fn advance(&mut self, column: usize) {
        if let Some(d) = self.depths.get_mut(column) {
            *d = d.saturating_add(1);
        }
    }

    pub(crate) fn respawn(&mut self, column: usize) {
        if let Some(d) = self.depths.get_mut(column) {
            *d = TOP_DEPTH;
        }
    }
}

/// Default host node handle type.
pub type NodeId = u64;

/// The contiguous window of rows to render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl RowRange {
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    /// Inclusive end of the range, or `None` when nothing renders.
    pub fn last_index(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.end_index - 1)
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// Placement of one rendered row inside the scroll track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowLayout {
    pub index: usize,
    /// Distance from the top of the scroll track.
    pub top: u64,
    /// Measured height, or `min_height` when the row was not measured yet.
    pub height: u32,
    /// The row must be rendered at least this tall.
    pub min_height: u32,
}

impl RowLayout {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

/// Geometry of the host scroll container, as read after a scroll event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub scroll_left: u64,
    pub scroll_top: u64,
    pub scroll_width: u64,
    pub scroll_height: u64,
    pub client_height: u32,
}

/// Why the list asks the host for more data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataRequest {
    /// Issued once when the list is attached.
    Initial,
    /// The tail of the list is on screen and near the bottom.
    More,
}

impl DataRequest {
    pub fn is_initial(self) -> bool {
        matches!(self, Self::Initial)
    }
}

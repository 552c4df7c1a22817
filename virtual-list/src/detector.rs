use crate::{RowRange, ScrollMetrics};

/// Whether the container is scrollable and within `threshold` pixels of its bottom.
pub fn is_bottom_reached(metrics: &ScrollMetrics, threshold: u32) -> bool {
    let client = metrics.client_height as i128;
    let scroll_height = metrics.scroll_height as i128;
    if client >= scroll_height {
        return false;
    }
    let remaining = scroll_height - metrics.scroll_top as i128 - client;
    remaining.abs() < threshold as i128
}

/// Inputs of the tail-request decision, read when the window is recomputed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TailCheck {
    pub has_more: bool,
    pub loading: bool,
    pub bottom_reached: bool,
    pub range: RowRange,
    pub count: usize,
}

impl TailCheck {
    /// True when more data should be requested: the last logical row is rendered, the bottom is
    /// reached, more data may exist, and nothing is in flight.
    pub fn wants_more(&self) -> bool {
        self.has_more && !self.loading && self.bottom_reached && self.range.end_index == self.count
    }
}

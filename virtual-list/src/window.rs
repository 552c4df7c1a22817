//! Windowing math.
//!
//! All functions walk rows from index 0 and substitute `min_row_height` for rows without a
//! measurement. The scans are linear in the index they reach.

use crate::{HeightMap, RowRange};

/// Number of extra rows rendered above and below the viewport.
pub fn effective_buffer_size(viewport_height: u32, min_row_height: u32, buffer_size: usize) -> usize {
    let fitting = viewport_height
        .checked_div(min_row_height)
        .unwrap_or(0) as usize;
    fitting.max(buffer_size)
}

/// Counts rows consumed while the remaining distance is still non-negative.
///
/// The row that crosses `threshold` is counted, and so is the first row at `threshold == 0`.
fn rows_consumed(heights: &HeightMap, count: usize, min_row_height: u32, threshold: u64) -> usize {
    let mut remaining = threshold as i128;
    let mut consumed = 0usize;
    while consumed < count && remaining >= 0 {
        remaining -= heights.height_or(consumed, min_row_height) as i128;
        consumed += 1;
    }
    consumed
}

/// First row to render for `scroll_offset`.
pub fn start_index(
    heights: &HeightMap,
    count: usize,
    min_row_height: u32,
    scroll_offset: u64,
    buffer: usize,
) -> usize {
    rows_consumed(heights, count, min_row_height, scroll_offset).saturating_sub(buffer)
}

/// One past the last row to render for `scroll_offset + viewport_height`.
pub fn end_index(
    heights: &HeightMap,
    count: usize,
    min_row_height: u32,
    scroll_offset: u64,
    viewport_height: u32,
    buffer: usize,
) -> usize {
    let threshold = scroll_offset.saturating_add(viewport_height as u64);
    rows_consumed(heights, count, min_row_height, threshold)
        .saturating_add(buffer)
        .min(count)
}

pub fn row_range(
    heights: &HeightMap,
    count: usize,
    min_row_height: u32,
    scroll_offset: u64,
    viewport_height: u32,
    buffer: usize,
) -> RowRange {
    RowRange {
        start_index: start_index(heights, count, min_row_height, scroll_offset, buffer),
        end_index: end_index(
            heights,
            count,
            min_row_height,
            scroll_offset,
            viewport_height,
            buffer,
        ),
    }
}

/// Top offset of `index`: the heights of rows `0..index`.
pub fn row_top(heights: &HeightMap, min_row_height: u32, index: usize) -> u64 {
    (0..index).fold(0u64, |top, i| {
        top.saturating_add(heights.height_or(i, min_row_height) as u64)
    })
}

/// Extent of the scroll track for `count` rows.
pub fn total_height(heights: &HeightMap, count: usize, min_row_height: u32) -> u64 {
    row_top(heights, min_row_height, count)
}

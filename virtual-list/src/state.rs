use crate::RowRange;

/// A lightweight snapshot of the list after the last recomputation.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListState {
    pub scroll_offset: u64,
    pub viewport_height: u32,
    pub buffer_size: usize,
    pub range: RowRange,
    pub total_height: u64,
}

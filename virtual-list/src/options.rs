use alloc::sync::Arc;

use crate::{DataRequest, OptionsError, RowRange};

pub const DEFAULT_MIN_ROW_HEIGHT: u32 = 20;
pub const DEFAULT_BUFFER_SIZE: usize = 5;
pub const DEFAULT_SCROLL_THROTTLE_MS: u64 = 50;
pub const DEFAULT_BOTTOM_THRESHOLD: u32 = 10;

/// Called when the list wants the host to load data.
pub type OnDataRequestCallback = Arc<dyn Fn(DataRequest) + Send + Sync>;

/// Called with `(scroll_x, scroll_y)` on every raw scroll event.
pub type OnScrollCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Called after a recomputation produced a different row range.
pub type OnRangeChangeCallback = Arc<dyn Fn(RowRange) + Send + Sync>;

/// Configuration for [`crate::VirtualList`].
///
/// Callbacks are stored in `Arc`s so the options stay cheap to clone; adapters can tweak a flag
/// and hand the options back through `VirtualList::set_options`.
#[derive(Clone)]
pub struct VirtualListOptions {
    /// Height assumed for rows that were not measured yet.
    ///
    /// Measurements below this value are treated as unreliable and ignored.
    pub min_row_height: u32,

    /// Minimum number of extra rows rendered above and below the viewport.
    ///
    /// The effective buffer is `max(viewport_height / min_row_height, buffer_size)`.
    pub buffer_size: usize,

    /// Whether the data source may have more rows.
    pub has_more: bool,

    /// Whether a data request is already in flight.
    pub loading: bool,

    pub on_data_request: Option<OnDataRequestCallback>,
    pub on_scroll: Option<OnScrollCallback>,
    pub on_range_change: Option<OnRangeChangeCallback>,

    /// Window of the vertical scroll throttle.
    pub scroll_throttle_ms: u64,

    /// Distance from the bottom (exclusive) under which the bottom counts as reached.
    pub bottom_threshold: u32,

    /// Keep height entries of rows that left the rendered range.
    ///
    /// By default evicted rows also lose their height entry, which bounds the map to the
    /// rendered window.
    pub retain_offscreen_heights: bool,
}

impl Default for VirtualListOptions {
    fn default() -> Self {
        Self {
            min_row_height: DEFAULT_MIN_ROW_HEIGHT,
            buffer_size: DEFAULT_BUFFER_SIZE,
            has_more: true,
            loading: false,
            on_data_request: None,
            on_scroll: None,
            on_range_change: None,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            bottom_threshold: DEFAULT_BOTTOM_THRESHOLD,
            retain_offscreen_heights: false,
        }
    }
}

impl VirtualListOptions {
    pub fn new(min_row_height: u32, buffer_size: usize) -> Self {
        Self {
            min_row_height,
            buffer_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.min_row_height == 0 {
            return Err(OptionsError::ZeroMinRowHeight);
        }
        if self.bottom_threshold == 0 {
            return Err(OptionsError::ZeroBottomThreshold);
        }
        Ok(())
    }

    pub fn with_min_row_height(mut self, min_row_height: u32) -> Self {
        self.min_row_height = min_row_height;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_has_more(mut self, has_more: bool) -> Self {
        self.has_more = has_more;
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn with_on_data_request(
        mut self,
        on_data_request: Option<impl Fn(DataRequest) + Send + Sync + 'static>,
    ) -> Self {
        self.on_data_request = on_data_request.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_scroll(
        mut self,
        on_scroll: Option<impl Fn(u64, u64) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll = on_scroll.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_range_change(
        mut self,
        on_range_change: Option<impl Fn(RowRange) + Send + Sync + 'static>,
    ) -> Self {
        self.on_range_change = on_range_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_scroll_throttle_ms(mut self, scroll_throttle_ms: u64) -> Self {
        self.scroll_throttle_ms = scroll_throttle_ms;
        self
    }

    pub fn with_bottom_threshold(mut self, bottom_threshold: u32) -> Self {
        self.bottom_threshold = bottom_threshold;
        self
    }

    pub fn with_retain_offscreen_heights(mut self, retain: bool) -> Self {
        self.retain_offscreen_heights = retain;
        self
    }
}

impl core::fmt::Debug for VirtualListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualListOptions")
            .field("min_row_height", &self.min_row_height)
            .field("buffer_size", &self.buffer_size)
            .field("has_more", &self.has_more)
            .field("loading", &self.loading)
            .field("scroll_throttle_ms", &self.scroll_throttle_ms)
            .field("bottom_threshold", &self.bottom_threshold)
            .field("retain_offscreen_heights", &self.retain_offscreen_heights)
            .finish_non_exhaustive()
    }
}

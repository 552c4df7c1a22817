use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::deferred::TaskQueue;
use crate::detector::{self, TailCheck};
use crate::key::NodeKey;
use crate::observer::{Detached, ObserveTarget, ObserverBackend, ResizeEntry, SizeObserver};
use crate::throttle::Throttle;
use crate::window;
use crate::{
    DataRequest, HeightMap, ListState, NodeId, OptionsError, RowLayout, RowRange, ScrollMetrics,
    SubscriptionHandle, VirtualListOptions,
};

/// Everything the row window depends on. A recomputation only happens when this changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct WindowInputs {
    count: usize,
    items_generation: u64,
    scroll_offset: u64,
    viewport_height: u32,
    buffer_size: usize,
    min_row_height: u32,
    heights_version: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Attached,
    Detached,
}

#[derive(Clone, Debug)]
struct MountedRow<N> {
    node: N,
    handle: SubscriptionHandle,
}

/// A headless virtualized list.
///
/// The list holds no UI objects. The host drives it:
/// - `attach` once the scroll container exists, `detach` when it goes away
/// - `set_items` whenever the item sequence is supplied
/// - `on_scroll_event` / `tick` for scrolling, `on_node_resize` for size observations
/// - `mount_row` for every row node it creates
/// - `run_deferred` at the end of each handled event, to deliver data requests
///
/// Rendering reads `for_each_row` and positions a spacer at `total_height`.
#[derive(Debug)]
pub struct VirtualList<N = NodeId> {
    options: VirtualListOptions,
    lifecycle: Lifecycle,

    count: usize,
    items_generation: u64,
    items_changed: bool,

    heights: HeightMap,
    mounted: BTreeMap<usize, MountedRow<N>>,
    observer: SizeObserver<N>,
    root: Option<MountedRow<N>>,

    scroll_offset: u64,
    viewport_height: u32,
    metrics: ScrollMetrics,
    throttle: Throttle<u64>,

    range: RowRange,
    total_height: u64,
    last_inputs: Option<WindowInputs>,

    tail_wanted: bool,
    initial_requested: bool,
    deferred: TaskQueue<DataRequest>,

    batch_depth: usize,
    refresh_pending: bool,
}

impl<N: NodeKey> VirtualList<N> {
    /// Creates a list whose host reports every size change itself.
    pub fn new(options: VirtualListOptions) -> Result<Self, OptionsError> {
        Self::with_backend(options, Box::new(Detached))
    }

    /// Creates a list that mirrors observation changes into `backend`.
    pub fn with_backend(
        options: VirtualListOptions,
        backend: Box<dyn ObserverBackend<N>>,
    ) -> Result<Self, OptionsError> {
        options.validate()?;
        vdebug!(
            min_row_height = options.min_row_height,
            buffer_size = options.buffer_size,
            "VirtualList::new"
        );
        Ok(Self {
            throttle: Throttle::new(options.scroll_throttle_ms),
            options,
            lifecycle: Lifecycle::Created,
            count: 0,
            items_generation: 0,
            items_changed: true,
            heights: HeightMap::new(),
            mounted: BTreeMap::new(),
            observer: SizeObserver::new(backend),
            root: None,
            scroll_offset: 0,
            viewport_height: 0,
            metrics: ScrollMetrics::default(),
            range: RowRange::default(),
            total_height: 0,
            last_inputs: None,
            tail_wanted: false,
            initial_requested: false,
            deferred: TaskQueue::new(),
            batch_depth: 0,
            refresh_pending: false,
        })
    }

    pub fn options(&self) -> &VirtualListOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: VirtualListOptions) -> Result<(), OptionsError> {
        options.validate()?;
        self.throttle.set_wait_ms(options.scroll_throttle_ms);
        self.options = options;
        vtrace!(
            min_row_height = self.options.min_row_height,
            buffer_size = self.options.buffer_size,
            "VirtualList::set_options"
        );
        self.refresh();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut VirtualListOptions),
    ) -> Result<(), OptionsError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_min_row_height(&mut self, min_row_height: u32) -> Result<(), OptionsError> {
        if min_row_height == 0 {
            return Err(OptionsError::ZeroMinRowHeight);
        }
        self.options.min_row_height = min_row_height;
        self.refresh();
        Ok(())
    }

    pub fn set_buffer_size(&mut self, buffer_size: usize) {
        self.options.buffer_size = buffer_size;
        self.refresh();
    }

    /// Read at the next recomputation; does not recompute by itself.
    pub fn set_has_more(&mut self, has_more: bool) {
        self.options.has_more = has_more;
    }

    /// Read at the next recomputation; does not recompute by itself.
    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    pub fn set_on_data_request(
        &mut self,
        on_data_request: Option<impl Fn(DataRequest) + Send + Sync + 'static>,
    ) {
        self.options.on_data_request = on_data_request.map(|f| Arc::new(f) as _);
    }

    pub fn set_on_scroll(&mut self, on_scroll: Option<impl Fn(u64, u64) + Send + Sync + 'static>) {
        self.options.on_scroll = on_scroll.map(|f| Arc::new(f) as _);
    }

    pub fn set_scroll_throttle_ms(&mut self, wait_ms: u64) {
        self.options.scroll_throttle_ms = wait_ms;
        self.throttle.set_wait_ms(wait_ms);
    }

    pub fn is_attached(&self) -> bool {
        self.lifecycle == Lifecycle::Attached
    }

    pub fn is_detached(&self) -> bool {
        self.lifecycle == Lifecycle::Detached
    }

    /// Mounts the list on its scroll container.
    ///
    /// Observes `root` for viewport changes, takes the initial geometry from `metrics`, and queues
    /// the one-time [`DataRequest::Initial`]. Returns `false` if the list was already attached
    /// or detached.
    pub fn attach(&mut self, root: N, metrics: ScrollMetrics) -> bool {
        if self.lifecycle != Lifecycle::Created {
            vwarn!("VirtualList::attach called twice");
            return false;
        }
        self.lifecycle = Lifecycle::Attached;
        let handle = self.observer.observe(&root, ObserveTarget::Root);
        self.root = Some(MountedRow { node: root, handle });
        self.metrics = metrics;
        self.viewport_height = metrics.client_height;
        self.scroll_offset = metrics.scroll_top;
        vdebug!(
            viewport_height = self.viewport_height,
            scroll_offset = self.scroll_offset,
            "VirtualList::attach"
        );
        self.refresh();

        if !self.initial_requested {
            self.initial_requested = true;
            self.deferred.defer(DataRequest::Initial);
        }
        true
    }

    /// Unmounts the list: disconnects the observer and forgets every mounted node.
    ///
    /// Later events are ignored. Requests queued before this call are still delivered by
    /// `run_deferred`.
    pub fn detach(&mut self) {
        if self.lifecycle == Lifecycle::Detached {
            return;
        }
        vdebug!(mounted = self.mounted.len(), "VirtualList::detach");
        self.lifecycle = Lifecycle::Detached;
        self.observer.disconnect();
        self.mounted.clear();
        self.root = None;
        self.throttle.cancel();
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Supplies the item sequence (by length).
    ///
    /// Every call counts as a new sequence: the next recomputation will not request more data.
    /// Height entries are keyed by index and survive unless they fall past the new end.
    pub fn set_items(&mut self, count: usize) {
        vtrace!(count, prev = self.count, "VirtualList::set_items");
        self.count = count;
        self.items_generation = self.items_generation.wrapping_add(1);
        self.items_changed = true;
        self.heights.truncate(count);
        self.refresh();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Container geometry from the last scroll event (or `attach`).
    pub fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    /// Handles a raw scroll event of the container.
    ///
    /// `on_scroll` sees every event; the vertical offset used for windowing is throttled.
    pub fn on_scroll_event(&mut self, metrics: ScrollMetrics, now_ms: u64) {
        if self.lifecycle == Lifecycle::Detached {
            return;
        }
        self.metrics = metrics;
        if let Some(cb) = &self.options.on_scroll {
            cb(metrics.scroll_left, metrics.scroll_top);
        }
        if let Some(offset) = self.throttle.call(metrics.scroll_top, now_ms) {
            vtrace!(offset, now_ms, "scroll offset applied");
            self.apply_scroll_offset(offset);
        }
    }

    /// Refreshes the container geometry read by bottom detection, without a scroll event.
    ///
    /// Hosts call this when the content height changed (a page was appended, rows were measured)
    /// so the next recomputation does not judge the tail against stale geometry. The scroll
    /// offset used for windowing and the throttle are left alone.
    pub fn set_metrics(&mut self, metrics: ScrollMetrics) {
        if self.lifecycle == Lifecycle::Detached {
            return;
        }
        self.metrics = metrics;
    }

    /// Releases a throttled trailing scroll offset. Returns `true` if one was applied.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.lifecycle == Lifecycle::Detached {
            return false;
        }
        match self.throttle.poll(now_ms) {
            Some(offset) => {
                vtrace!(offset, now_ms, "trailing scroll offset applied");
                self.apply_scroll_offset(offset);
                true
            }
            None => false,
        }
    }

    /// Whether a throttled scroll offset waits for `tick`.
    pub fn has_pending_scroll(&self) -> bool {
        self.throttle.has_pending()
    }

    /// Sets the windowing offset directly, bypassing the throttle.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.apply_scroll_offset(offset);
    }

    fn apply_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        self.scroll_offset = offset;
        self.refresh();
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        if self.viewport_height == height {
            return;
        }
        self.viewport_height = height;
        self.refresh();
    }

    /// Registers the node rendered for `index` and records its initial height.
    ///
    /// Only rows inside the current range can be mounted. Re-mounting the same node is a no-op; a
    /// different node replaces (and unobserves) the previous one. Returns `false` when the call
    /// was ignored.
    pub fn mount_row(&mut self, index: usize, node: N, measured_height: u32) -> bool {
        if self.lifecycle == Lifecycle::Detached {
            return false;
        }
        if index >= self.count || !self.range.contains(index) {
            vwarn!(
                index,
                count = self.count,
                start = self.range.start_index,
                end = self.range.end_index,
                "mount_row: index outside the rendered range"
            );
            return false;
        }
        if let Some(prev) = self.mounted.get(&index) {
            if prev.node == node {
                return false;
            }
            let handle = prev.handle;
            self.observer.unobserve(handle);
        }
        // A node reused for another index leaves its old slot.
        let stale: Option<usize> = self
            .mounted
            .iter()
            .find(|(i, m)| **i != index && m.node == node)
            .map(|(i, _)| *i);
        if let Some(stale) = stale {
            self.mounted.remove(&stale);
        }

        let handle = self.observer.observe(&node, ObserveTarget::Row(index));
        self.mounted.insert(index, MountedRow { node, handle });
        vtrace!(index, measured_height, "mount_row");

        if self
            .heights
            .record(index, measured_height, self.options.min_row_height)
        {
            self.refresh();
        }
        true
    }

    /// Forgets the node of `index` (the host destroyed it) without touching its height entry.
    pub fn unmount_row(&mut self, index: usize) -> bool {
        let Some(row) = self.mounted.remove(&index) else {
            return false;
        };
        self.observer.unobserve(row.handle);
        true
    }

    /// Delivers a size observation for `node`. Unobserved nodes are ignored.
    pub fn on_node_resize(&mut self, node: &N, height: u32) -> bool {
        if self.lifecycle == Lifecycle::Detached {
            return false;
        }
        match self.observer.resolve(node, height) {
            Some(entry) => {
                self.apply_resize_entry(entry);
                true
            }
            None => {
                vtrace!(height, "on_node_resize: node not observed");
                false
            }
        }
    }

    /// Delivers a batch of size observations with a single recomputation.
    pub fn on_resize<'a>(&mut self, entries: impl IntoIterator<Item = (&'a N, u32)>)
    where
        N: 'a,
    {
        self.batch_update(|list| {
            for (node, height) in entries {
                list.on_node_resize(node, height);
            }
        });
    }

    fn apply_resize_entry(&mut self, entry: ResizeEntry) {
        match entry.target {
            ObserveTarget::Root => self.set_viewport_height(entry.height),
            ObserveTarget::Row(index) => {
                if index >= self.count {
                    return;
                }
                if self
                    .heights
                    .record(index, entry.height, self.options.min_row_height)
                {
                    vtrace!(index, height = entry.height, "row resized");
                    self.refresh();
                }
            }
        }
    }

    /// Batches updates into a single recomputation.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);

        f(self);

        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);

        if self.batch_depth == 0 && core::mem::replace(&mut self.refresh_pending, false) {
            self.refresh();
        }
    }

    /// Recomputes the window if any of its inputs changed since the last pass.
    pub fn refresh(&mut self) {
        if self.batch_depth > 0 {
            self.refresh_pending = true;
            return;
        }
        if self.lifecycle == Lifecycle::Detached {
            return;
        }
        // Evicting height entries can move the window again; each extra pass removes entries, so
        // this settles.
        loop {
            let inputs = self.window_inputs();
            if self.last_inputs == Some(inputs) {
                break;
            }
            self.recompute(inputs);
        }
    }

    fn window_inputs(&self) -> WindowInputs {
        WindowInputs {
            count: self.count,
            items_generation: self.items_generation,
            scroll_offset: self.scroll_offset,
            viewport_height: self.viewport_height,
            buffer_size: self.buffer_size(),
            min_row_height: self.options.min_row_height,
            heights_version: self.heights.version(),
        }
    }

    fn recompute(&mut self, inputs: WindowInputs) {
        let min = inputs.min_row_height;
        let layout_changed = self.last_inputs.is_none_or(|prev| {
            prev.count != inputs.count
                || prev.items_generation != inputs.items_generation
                || prev.min_row_height != inputs.min_row_height
                || prev.heights_version != inputs.heights_version
        });
        if layout_changed {
            self.total_height = window::total_height(&self.heights, inputs.count, min);
        }
        self.last_inputs = Some(inputs);

        let range = window::row_range(
            &self.heights,
            inputs.count,
            min,
            inputs.scroll_offset,
            inputs.viewport_height,
            inputs.buffer_size,
        );
        self.evict_outside(range);
        self.check_tail(range);

        let prev = core::mem::replace(&mut self.range, range);
        vtrace!(
            start = range.start_index,
            end = range.end_index,
            total_height = self.total_height,
            "recompute"
        );
        if prev != range {
            if let Some(cb) = &self.options.on_range_change {
                cb(range);
            }
        }
    }

    fn evict_outside(&mut self, range: RowRange) {
        let outside: Vec<usize> = self
            .mounted
            .keys()
            .copied()
            .filter(|&i| !range.contains(i))
            .collect();
        for index in outside {
            if let Some(row) = self.mounted.remove(&index) {
                self.observer.unobserve(row.handle);
            }
        }
        if self.options.retain_offscreen_heights {
            return;
        }
        for index in self.heights.indexes() {
            if !range.contains(index) {
                self.heights.remove(index);
            }
        }
    }

    fn check_tail(&mut self, range: RowRange) {
        let check = TailCheck {
            has_more: self.options.has_more,
            loading: self.options.loading,
            bottom_reached: self.is_bottom_reached(),
            range,
            count: self.count,
        };
        let wants = check.wants_more();
        if self.items_changed {
            self.items_changed = false;
            self.tail_wanted = false;
            return;
        }
        if wants && !self.tail_wanted {
            vdebug!(count = self.count, "queueing data request");
            self.deferred.defer(DataRequest::More);
        }
        self.tail_wanted = wants;
    }

    /// Delivers queued data requests to `on_data_request`. Returns how many were queued.
    pub fn run_deferred(&mut self) -> usize {
        let cb = self.options.on_data_request.clone();
        self.deferred.drain(|request| {
            if let Some(cb) = &cb {
                cb(request);
            }
        })
    }

    pub fn pending_requests(&self) -> usize {
        self.deferred.len()
    }

    pub fn is_bottom_reached(&self) -> bool {
        detector::is_bottom_reached(&self.metrics, self.options.bottom_threshold)
    }

    /// Extra rows rendered on each side: `max(viewport / min_row_height, buffer_size)`.
    pub fn buffer_size(&self) -> usize {
        window::effective_buffer_size(
            self.viewport_height,
            self.options.min_row_height,
            self.options.buffer_size,
        )
    }

    /// The rows to render, as of the last recomputation.
    pub fn range(&self) -> RowRange {
        self.range
    }

    /// Height of the scroll track; the spacer goes at this offset.
    pub fn total_height(&self) -> u64 {
        self.total_height
    }

    pub fn heights(&self) -> &HeightMap {
        &self.heights
    }

    pub fn observer(&self) -> &SizeObserver<N> {
        &self.observer
    }

    pub fn row_height(&self, index: usize) -> Option<u32> {
        (index < self.count).then(|| self.heights.height_or(index, self.options.min_row_height))
    }

    pub fn row_top(&self, index: usize) -> Option<u64> {
        (index < self.count)
            .then(|| window::row_top(&self.heights, self.options.min_row_height, index))
    }

    /// Iterates over the rendered rows with their positions.
    pub fn for_each_row(&self, mut f: impl FnMut(RowLayout)) {
        let range = self.range;
        if range.is_empty() {
            return;
        }
        let min = self.options.min_row_height;
        let mut top = window::row_top(&self.heights, min, range.start_index);
        for index in range.start_index..range.end_index {
            let height = self.heights.height_or(index, min);
            f(RowLayout {
                index,
                top,
                height,
                min_height: min,
            });
            top = top.saturating_add(height as u64);
        }
    }

    /// Collects the rendered rows into `out` (clears `out` first).
    pub fn collect_rows(&self, out: &mut Vec<RowLayout>) {
        out.clear();
        self.for_each_row(|row| out.push(row));
    }

    pub fn mounted_len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_mounted(&self, index: usize) -> bool {
        self.mounted.contains_key(&index)
    }

    pub fn mounted_node(&self, index: usize) -> Option<&N> {
        self.mounted.get(&index).map(|m| &m.node)
    }

    /// Mounted indexes, ascending.
    pub fn mounted_indexes(&self) -> Vec<usize> {
        self.mounted.keys().copied().collect()
    }

    pub fn root(&self) -> Option<&N> {
        self.root.as_ref().map(|m| &m.node)
    }

    pub fn state(&self) -> ListState {
        ListState {
            scroll_offset: self.scroll_offset,
            viewport_height: self.viewport_height,
            buffer_size: self.buffer_size(),
            range: self.range,
            total_height: self.total_height,
        }
    }
}

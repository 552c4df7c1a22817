use alloc::boxed::Box;
use alloc::rc::Rc;

use virtual_list::{
    Detached, NodeId, NodeKey, ObserverBackend, OptionsError, Subject, Subscription,
    VirtualList, VirtualListOptions,
};

use crate::{ScrollContainer, follow_scroll_x};

/// A framework-neutral controller that mounts a [`VirtualList`] on a [`ScrollContainer`].
///
/// This type does not hold any UI objects besides the container handle. Adapters drive it by
/// calling:
/// - `on_scroll(now_ms)` when the container reports a scroll event
/// - `on_resize` / `on_node_resize` when the platform reports element sizes
/// - `mount_row` / `unmount_row` as rows are created and destroyed
/// - `tick(now_ms)` at the end of each task/frame (throttle flush and data requests)
///
/// `unmount()` (or dropping the controller) releases the observer and the scroll-x follower.
pub struct Controller<C: ScrollContainer + 'static, N: NodeKey = NodeId> {
    list: VirtualList<N>,
    container: Rc<C>,
    follower: Option<Subscription<u64>>,
}

impl<C: ScrollContainer + 'static, N: NodeKey> Controller<C, N> {
    /// Creates the list and attaches it to `container`, whose element is observed as `root`.
    ///
    /// When `scroll_x` is given, the container follows the horizontal offsets it publishes.
    pub fn mount(
        options: VirtualListOptions,
        container: Rc<C>,
        root: N,
        scroll_x: Option<&Subject<u64>>,
    ) -> Result<Self, OptionsError> {
        Self::mount_with_backend(options, Box::new(Detached), container, root, scroll_x)
    }

    /// Like [`Controller::mount`], mirroring observation changes into `backend`.
    pub fn mount_with_backend(
        options: VirtualListOptions,
        backend: Box<dyn ObserverBackend<N>>,
        container: Rc<C>,
        root: N,
        scroll_x: Option<&Subject<u64>>,
    ) -> Result<Self, OptionsError> {
        let mut list = VirtualList::with_backend(options, backend)?;
        list.attach(root, container.metrics());
        let follower = scroll_x.map(|subject| follow_scroll_x(subject, Rc::clone(&container)));
        vdebug!(following = follower.is_some(), "controller mounted");
        Ok(Self {
            list,
            container,
            follower,
        })
    }

    pub fn list(&self) -> &VirtualList<N> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut VirtualList<N> {
        &mut self.list
    }

    pub fn container(&self) -> &Rc<C> {
        &self.container
    }

    pub fn is_mounted(&self) -> bool {
        self.list.is_attached()
    }

    pub fn is_following(&self) -> bool {
        self.follower.as_ref().is_some_and(Subscription::is_active)
    }

    /// Call this when the container reports a scroll event.
    pub fn on_scroll(&mut self, now_ms: u64) {
        self.list.on_scroll_event(self.container.metrics(), now_ms);
    }

    /// Copies the container geometry into the list before anything that may recompute, so bottom
    /// detection never sees a stale scroll height.
    fn sync_metrics(&mut self) {
        self.list.set_metrics(self.container.metrics());
    }

    pub fn on_node_resize(&mut self, node: &N, height: u32) -> bool {
        self.sync_metrics();
        self.list.on_node_resize(node, height)
    }

    /// Applies a batch of size reports with a single recomputation.
    pub fn on_resize<'a>(&mut self, entries: impl IntoIterator<Item = (&'a N, u32)>)
    where
        N: 'a,
    {
        self.sync_metrics();
        self.list.on_resize(entries);
    }

    pub fn mount_row(&mut self, index: usize, node: N, measured_height: u32) -> bool {
        self.sync_metrics();
        self.list.mount_row(index, node, measured_height)
    }

    pub fn unmount_row(&mut self, index: usize) -> bool {
        self.list.unmount_row(index)
    }

    pub fn set_items(&mut self, count: usize) {
        self.sync_metrics();
        self.list.set_items(count);
    }

    pub fn set_has_more(&mut self, has_more: bool) {
        self.list.set_has_more(has_more);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.list.set_loading(loading);
    }

    /// Scrolls the container so that `index` sits at the top of the viewport.
    ///
    /// The list itself follows once the container reports the scroll event. Returns the target
    /// offset, or `None` for an out-of-bounds index.
    pub fn scroll_to_row(&self, index: usize) -> Option<u64> {
        let top = self.list.row_top(index)?;
        self.container.scroll_to(self.container.scroll_left(), top);
        Some(top)
    }

    /// Ends the current task: applies a throttled trailing scroll offset and delivers queued
    /// data requests.
    ///
    /// Returns the number of data requests delivered.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        self.sync_metrics();
        self.list.tick(now_ms);
        self.list.run_deferred()
    }

    /// Releases the follower subscription and detaches the list. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(follower) = self.follower.take() {
            follower.unsubscribe();
        }
        if !self.list.is_detached() {
            vdebug!("controller unmounted");
            self.list.detach();
        }
    }
}

impl<C: ScrollContainer + 'static, N: NodeKey> Drop for Controller<C, N> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<C, N> core::fmt::Debug for Controller<C, N>
where
    C: ScrollContainer + 'static,
    N: NodeKey + core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("list", &self.list)
            .field("following", &self.follower.is_some())
            .finish_non_exhaustive()
    }
}

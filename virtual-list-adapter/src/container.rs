use virtual_list::ScrollMetrics;

/// The host's scrollable element.
///
/// Methods take `&self`: hosts usually hold the element behind a shared handle and the
/// follower needs to scroll it from inside a subscription callback.
pub trait ScrollContainer {
    fn scroll_left(&self) -> u64;
    fn scroll_top(&self) -> u64;
    fn scroll_width(&self) -> u64;
    fn scroll_height(&self) -> u64;
    fn client_height(&self) -> u32;

    /// Programmatically scrolls the element.
    fn scroll_to(&self, x: u64, y: u64);

    /// Snapshot of the current geometry.
    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_left: self.scroll_left(),
            scroll_top: self.scroll_top(),
            scroll_width: self.scroll_width(),
            scroll_height: self.scroll_height(),
            client_height: self.client_height(),
        }
    }
}

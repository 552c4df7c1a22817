//! A headless virtualized list engine.
//!
//! For the scroll-container bridge and a mount/unmount controller, see the
//! `virtual-list-adapter` crate.
//!
//! The list renders only the rows that intersect the viewport plus a buffer, measures real row
//! heights as rows are mounted, and asks the host for more data when the tail of the list is
//! scrolled into view.
//!
//! It is UI-agnostic. A host layer (DOM binding, TUI, GUI) is expected to provide:
//! - the scroll container geometry and its scroll events
//! - a node handle for every mounted row and the sizes observed for those nodes
//! - the length of the item sequence
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod deferred;
mod detector;
mod error;
mod height_map;
mod key;
mod observer;
mod options;
mod state;
mod subject;
mod throttle;
mod types;
mod virtual_list;
mod window;

#[cfg(test)]
mod tests;

pub use deferred::TaskQueue;
pub use detector::{TailCheck, is_bottom_reached};
pub use error::OptionsError;
pub use height_map::HeightMap;
pub use key::NodeKey;
pub use observer::{
    Detached, ObserveTarget, ObserverBackend, ResizeEntry, SizeObserver, SubscriptionHandle,
};
pub use options::{
    DEFAULT_BOTTOM_THRESHOLD, DEFAULT_BUFFER_SIZE, DEFAULT_MIN_ROW_HEIGHT,
    DEFAULT_SCROLL_THROTTLE_MS, OnDataRequestCallback, OnRangeChangeCallback, OnScrollCallback,
    VirtualListOptions,
};
pub use state::ListState;
pub use subject::{Subject, Subscription};
pub use throttle::Throttle;
pub use types::{DataRequest, NodeId, RowLayout, RowRange, ScrollMetrics};
pub use virtual_list::VirtualList;
pub use window::{effective_buffer_size, row_range, row_top, total_height};

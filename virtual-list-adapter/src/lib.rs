//! Adapter utilities for the `virtual-list` crate.
//!
//! The `virtual-list` crate is UI-agnostic and owns the windowing math and state. This crate
//! provides the small, framework-neutral glue an adapter needs on top of it:
//!
//! - A [`ScrollContainer`] abstraction over the host's scrollable element
//! - A one-way horizontal scroll follower driven by a [`virtual_list::Subject`]
//! - A [`Controller`] that mounts a list on a container and releases everything on unmount
//!
//! This crate is intentionally framework-agnostic (no DOM or GUI bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod container;
mod controller;
mod follow;


pub use container::ScrollContainer;
pub use controller::Controller;
pub use follow::follow_scroll_x;

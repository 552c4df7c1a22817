use alloc::boxed::Box;
use alloc::collections::BTreeMap;

use crate::key::{NodeKey, NodeMap};

/// What an observed node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObserveTarget {
    /// The scroll container; its height is the viewport height.
    Root,
    /// A rendered row, tagged with its index.
    Row(usize),
}

/// A size observation resolved to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeEntry {
    pub target: ObserveTarget,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// The platform side of size observation (e.g. a DOM `ResizeObserver`).
///
/// [`SizeObserver`] mirrors every subscription change here so the platform only reports sizes
/// for nodes the list cares about. All methods default to no-ops.
pub trait ObserverBackend<N> {
    fn observe(&mut self, _node: &N) {}
    fn unobserve(&mut self, _node: &N) {}
    fn disconnect(&mut self) {}
}

/// Backend for hosts that report every size change themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct Detached;

impl<N> ObserverBackend<N> for Detached {}

#[derive(Clone, Copy, Debug)]
struct Observation {
    handle: SubscriptionHandle,
    target: ObserveTarget,
}

/// Registry of observed nodes.
///
/// `observe(node, target)` hands out a [`SubscriptionHandle`]; sizes reported for the node are
/// resolved to `target` until `unobserve(handle)` or `disconnect()`.
pub struct SizeObserver<N> {
    observations: NodeMap<N, Observation>,
    nodes: BTreeMap<SubscriptionHandle, N>,
    backend: Box<dyn ObserverBackend<N>>,
    next_handle: u64,
}

impl<N: NodeKey> Default for SizeObserver<N> {
    fn default() -> Self {
        Self::new(Box::new(Detached))
    }
}

impl<N> core::fmt::Debug for SizeObserver<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SizeObserver")
            .field("observed", &self.observations.len())
            .field("next_handle", &self.next_handle)
            .finish_non_exhaustive()
    }
}

impl<N: NodeKey> SizeObserver<N> {
    pub fn new(backend: Box<dyn ObserverBackend<N>>) -> Self {
        Self {
            observations: NodeMap::new(),
            nodes: BTreeMap::new(),
            backend,
            next_handle: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn is_observing(&self, node: &N) -> bool {
        self.observations.contains_key(node)
    }

    /// Starts (or retargets) observation of `node`.
    pub fn observe(&mut self, node: &N, target: ObserveTarget) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        let prev = self
            .observations
            .insert(node.clone(), Observation { handle, target });
        self.nodes.insert(handle, node.clone());
        match prev {
            Some(prev) => {
                self.nodes.remove(&prev.handle);
            }
            None => self.backend.observe(node),
        }
        handle
    }

    /// Stops delivery for `handle`. Stale handles are ignored.
    pub fn unobserve(&mut self, handle: SubscriptionHandle) -> bool {
        let Some(node) = self.nodes.remove(&handle) else {
            return false;
        };
        self.observations.remove(&node);
        self.backend.unobserve(&node);
        true
    }

    /// Resolves a size report for `node`; `None` when the node is not observed.
    pub fn resolve(&self, node: &N, height: u32) -> Option<ResizeEntry> {
        self.observations.get(node).map(|o| ResizeEntry {
            target: o.target,
            height,
        })
    }

    /// Drops every subscription at once.
    pub fn disconnect(&mut self) {
        self.observations.clear();
        self.nodes.clear();
        self.backend.disconnect();
    }
}

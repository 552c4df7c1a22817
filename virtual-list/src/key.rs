#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type IndexMap<V> = HashMap<usize, V>;
#[cfg(not(feature = "std"))]
pub(crate) type IndexMap<V> = BTreeMap<usize, V>;

#[cfg(feature = "std")]
pub(crate) type NodeMap<N, V> = HashMap<N, V>;
#[cfg(not(feature = "std"))]
pub(crate) type NodeMap<N, V> = BTreeMap<N, V>;

/// Bound for host node handles (DOM element ids, widget ids, ...).
///
/// With `feature = "std"` handles are hashed; without it they must be `Ord`.
#[cfg(feature = "std")]
pub trait NodeKey: Clone + core::hash::Hash + Eq + 'static {}
#[cfg(feature = "std")]
impl<N: Clone + core::hash::Hash + Eq + 'static> NodeKey for N {}

#[cfg(not(feature = "std"))]
pub trait NodeKey: Clone + Ord + 'static {}
#[cfg(not(feature = "std"))]
impl<N: Clone + Ord + 'static> NodeKey for N {}

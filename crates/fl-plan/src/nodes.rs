//! Sensor-node metadata and the id → info lookup table.

use fl_core::{NodeId, Point2};
use rustc_hash::FxHashMap;

// ── NodeInfo ──────────────────────────────────────────────────────────────────

/// Static description of one sensor node, loaded from the node-info file.
///
/// Immutable for the mission duration.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeInfo {
    pub id: NodeId,

    /// Network address of the node's radio (opaque to the mission core;
    /// passed through to the communication layer).
    pub address: String,

    /// Bytes of sensor data the node holds.
    pub data_size: u64,

    /// East/north offset from home, metres.
    pub position: Point2,
}

// ── NodeTable ─────────────────────────────────────────────────────────────────

/// Lookup table over all nodes in the field.
#[derive(Clone, Debug, Default)]
pub struct NodeTable {
    inner: FxHashMap<NodeId, NodeInfo>,
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node.  Returns the previous entry if `info.id` was already
    /// present (the loader treats that as an error).
    pub fn insert(&mut self, info: NodeInfo) -> Option<NodeInfo> {
        self.inner.insert(info.id, info)
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeInfo> {
        self.inner.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeInfo> {
        self.inner.values()
    }

    /// `(id, position)` pairs — the shape the simulated vehicle's radio
    /// model registers.
    pub fn positions(&self) -> impl Iterator<Item = (NodeId, Point2)> + '_ {
        self.inner.values().map(|n| (n.id, n.position))
    }
}

impl FromIterator<NodeInfo> for NodeTable {
    fn from_iter<I: IntoIterator<Item = NodeInfo>>(iter: I) -> Self {
        let mut table = Self::new();
        for info in iter {
            table.insert(info);
        }
        table
    }
}

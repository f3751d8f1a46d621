//! Strongly typed, zero-cost identifier wrappers.

use std::fmt;

/// Identifier of one sensor node in the field.
///
/// `Copy + Ord + Hash` so it can be used as a map key and a sorted collection
/// element without ceremony.  The inner integer is `pub` for direct use in
/// file formats and solver indices.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel meaning "no valid node" — equivalent to `u32::MAX`.
    ///
    /// Used for anchor points in recovery tours that are not sensor nodes
    /// (the original plan format used `-1` for the same purpose).
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for NodeId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<NodeId> for usize {
    #[inline(always)]
    fn from(id: NodeId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for NodeId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<NodeId, Self::Error> {
        u32::try_from(n).map(NodeId)
    }
}

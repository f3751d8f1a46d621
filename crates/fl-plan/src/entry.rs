//! Parsed mission plan entries.

use fl_core::NodeId;

// ── PlanEntry ─────────────────────────────────────────────────────────────────

/// One line of the mission plan, parsed.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanEntry {
    /// Fly to a waypoint, east/north/altitude relative to home.
    Waypoint { east: f64, north: f64, alt: f64 },

    /// Connect to `node` with the given nominal link power and collect its
    /// data.
    CollectData { node: NodeId, power: f64 },

    /// Change the mission altitude for all subsequent movement.
    SetAltitude { alt: f64 },
}

// ── MissionPlan ───────────────────────────────────────────────────────────────

/// An ordered, immutable mission plan.
///
/// Entry order is execution order; the mission builder translates each entry
/// into a queued command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MissionPlan {
    entries: Vec<PlanEntry>,
}

impl MissionPlan {
    pub fn new(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    /// A plan with no entries (the mission still climbs, times itself, and
    /// returns home).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Node ids of all collect-data entries, in plan order.
    pub fn collect_targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().filter_map(|e| match e {
            PlanEntry::CollectData { node, .. } => Some(*node),
            _ => None,
        })
    }
}

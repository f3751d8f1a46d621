//! Plan-file and node-info-file loaders.
//!
//! # Plan file format
//!
//! One command per line, whitespace separated:
//!
//! ```text
//! 0 10 0 20        # waypoint: east 10 m, north 0 m, altitude 20 m
//! 1 5 40           # collect from node 5 at nominal power 40
//! 2 30             # mission altitude now 30 m
//! ```
//!
//! Blank lines are ignored.  Parse failures are fatal to mission start and
//! carry the 1-based line number.
//!
//! # Node-info file format
//!
//! One node per line — `nodeId address dataSize x y` — read with the csv
//! reader configured for a space delimiter:
//!
//! ```text
//! 5 10.0.0.5 340 12.0 2.0
//! 9 10.0.0.9 2048 -30.0 40.0
//! ```

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use fl_core::{NodeId, Point2};

use crate::entry::{MissionPlan, PlanEntry};
use crate::nodes::{NodeInfo, NodeTable};
use crate::{PlanError, PlanResult};

// ── Plan file ─────────────────────────────────────────────────────────────────

/// Load a [`MissionPlan`] from a `.pln` file.
pub fn load_plan(path: &Path) -> PlanResult<MissionPlan> {
    let file = std::fs::File::open(path).map_err(PlanError::Io)?;
    load_plan_reader(file)
}

/// Like [`load_plan`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded plan text.
pub fn load_plan_reader<R: Read>(reader: R) -> PlanResult<MissionPlan> {
    let mut entries = Vec::new();

    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(PlanError::Io)?;
        let mut fields = line.split_whitespace();

        let Some(token) = fields.next() else {
            continue; // blank line
        };

        let entry = match token {
            "0" => PlanEntry::Waypoint {
                east:  field(&mut fields, line_no, "waypoint east offset")?,
                north: field(&mut fields, line_no, "waypoint north offset")?,
                alt:   field(&mut fields, line_no, "waypoint altitude")?,
            },
            "1" => PlanEntry::CollectData {
                node:  NodeId(field(&mut fields, line_no, "node id")?),
                power: field(&mut fields, line_no, "link power")?,
            },
            "2" => PlanEntry::SetAltitude {
                alt: field(&mut fields, line_no, "mission altitude")?,
            },
            other => {
                return Err(PlanError::MalformedLine {
                    line:  line_no,
                    token: other.to_string(),
                });
            }
        };
        entries.push(entry);
    }

    Ok(MissionPlan::new(entries))
}

/// Parse the next whitespace-separated field of a plan line.
fn field<T: FromStr>(
    fields: &mut std::str::SplitWhitespace<'_>,
    line:   usize,
    what:   &str,
) -> PlanResult<T> {
    let raw = fields.next().ok_or_else(|| PlanError::Parse {
        line,
        msg: format!("missing {what}"),
    })?;
    raw.parse().map_err(|_| PlanError::Parse {
        line,
        msg: format!("invalid {what} {raw:?}"),
    })
}

// ── Node-info file ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:        u32,
    address:   String,
    data_size: u64,
    east:      f64,
    north:     f64,
}

/// Load the [`NodeTable`] from a node-info file.
pub fn load_nodes(path: &Path) -> PlanResult<NodeTable> {
    let file = std::fs::File::open(path).map_err(PlanError::Io)?;
    load_nodes_reader(file)
}

/// Like [`load_nodes`] but accepts any `Read` source.
pub fn load_nodes_reader<R: Read>(reader: R) -> PlanResult<NodeTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = NodeTable::new();
    for result in csv_reader.deserialize::<NodeRecord>() {
        let row = result?;
        let info = NodeInfo {
            id:        NodeId(row.id),
            address:   row.address,
            data_size: row.data_size,
            position:  Point2::new(row.east, row.north),
        };
        if table.insert(info).is_some() {
            return Err(PlanError::DuplicateNode(NodeId(row.id)));
        }
    }
    Ok(table)
}

//! Anchor-direction correction for raw solver responses.

use crate::{SolverError, SolverResult};

/// Normalize a raw solver sequence so it starts at `start` and ends at `end`.
///
/// A symmetric solver may return the requested open path rotated (it solved
/// a cycle and cut it elsewhere) and/or traversed backwards.  Correction:
///
/// 1. Already anchored → returned unchanged (idempotent).
/// 2. Rotate until `start` is first.
/// 3. If the element immediately after `start` is `end`, the path was
///    traversed backwards from the cut point: reverse everything after
///    `start`.
/// 4. Anything still not ending at `end` means the requested anchors are
///    inconsistent with a valid open path — reported, never accepted.
pub fn correct_open_path(
    mut path: Vec<usize>,
    start:    usize,
    end:      usize,
) -> SolverResult<Vec<usize>> {
    let inconsistent = || SolverError::AnchorInconsistent { start, end };

    if path.len() < 2 {
        return Err(inconsistent());
    }
    if path[0] == start && path[path.len() - 1] == end {
        return Ok(path);
    }

    let pos = path.iter().position(|&p| p == start).ok_or_else(inconsistent)?;
    path.rotate_left(pos);

    if path[1] == end {
        path[1..].reverse();
    }

    if path[path.len() - 1] == end {
        Ok(path)
    } else {
        Err(inconsistent())
    }
}

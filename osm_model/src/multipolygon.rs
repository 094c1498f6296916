//! Reassembling closed polygon rings from a relation's unordered,
//! directionally inconsistent member ways.

use geom::{Point, Ring};

/// One relation member, already resolved to points, with the role it carried.
#[derive(Clone, Debug)]
pub struct MemberGeometry {
    pub role: String,
    pub ring: Ring,
}

/// Outer rings first, then inner. `outer_count` marks the boundary between
/// the two.
#[derive(Clone, Debug, PartialEq)]
pub struct AssembledRings {
    pub rings: Vec<Ring>,
    pub outer_count: usize,
}

/// Stitch a relation's members into rings. "outer" ways get reordered and
/// reoriented into one or more closed loops; everything else is collected
/// as standalone rings. This never fails: members that can't be matched
/// topologically still show up in the output (possibly as an unclosed ring),
/// so no input geometry is silently dropped.
pub fn assemble_multipolygon(members: Vec<MemberGeometry>) -> AssembledRings {
    let mut outer: Vec<Ring> = Vec::new();
    let mut inner: Vec<Ring> = Vec::new();
    for m in members {
        // Members whose nodes all went unresolved contribute nothing.
        if m.ring.is_empty() {
            continue;
        }
        if m.role == "outer" {
            outer.push(m.ring);
        } else {
            inner.push(m.ring);
        }
    }

    let chain = stitch_outer_chain(outer);
    let mut rings = split_closed_loops(chain);
    let outer_count = rings.len();
    rings.extend(inner);

    AssembledRings { rings, outer_count }
}

/// Grow a chain from the first outer member by repeatedly scanning the pool
/// for a member that continues the chain's tail, flipping segments stored
/// against the direction of travel. Members that never match are appended at
/// the end unchanged.
fn stitch_outer_chain(mut pool: Vec<Ring>) -> Vec<Point> {
    if pool.is_empty() {
        return Vec::new();
    }
    let mut chain: Vec<Point> = pool.remove(0).into_points();

    loop {
        let tail = match chain.last() {
            Some(pt) => *pt,
            None => break,
        };
        let matched = pool
            .iter()
            .position(|cand| cand.first_pt() == Some(tail) || cand.last_pt() == Some(tail));
        let idx = match matched {
            Some(idx) => idx,
            None => break,
        };

        let cand = pool.remove(idx);
        // A segment whose head continues the tail already runs the right
        // way. One whose tail touches ours is stored backwards; flip it so
        // the chain keeps a consistent direction. (When both endpoints
        // coincide with the tail, the segment is itself a loop and either
        // orientation closes it, so the head match wins and nothing flips.)
        let head_match = cand.first_pt() == Some(tail);
        let mut pts = cand.into_points();
        if !head_match {
            pts.reverse();
        }
        chain.extend(pts);
    }

    if !pool.is_empty() {
        debug!(
            "{} outer members had no topological match; passing them through unstitched",
            pool.len()
        );
    }
    for leftover in pool {
        chain.extend(leftover.into_points());
    }
    chain
}

/// Split an accumulated chain whenever it loops back to the start of the
/// current sub-ring. A trailing stretch that never loops back is kept as an
/// open ring rather than thrown away.
fn split_closed_loops(chain: Vec<Point>) -> Vec<Ring> {
    let mut rings = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for pt in chain {
        current.push(pt);
        if current.len() > 2 && current.first() == current.last() {
            rings.push(Ring::new(std::mem::take(&mut current)));
        }
    }
    if !current.is_empty() {
        rings.push(Ring::new(current));
    }
    rings
}

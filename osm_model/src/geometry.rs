use geom::Ring;
use serde::{Deserialize, Serialize};

use crate::osm::{OsmID, Tags};

/// A way or relation resolved into concrete rings, ready for clipping and
/// drawing. Rings `0..outer_count` are outer boundaries; the rest are holes.
/// Built once per way or qualifying relation and never modified after.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RichGeometry {
    pub id: OsmID,
    pub tags: Tags,
    pub rings: Vec<Ring>,
    pub outer_count: usize,
}

impl RichGeometry {
    pub fn outer_rings(&self) -> &[Ring] {
        &self.rings[..self.outer_count]
    }

    pub fn inner_rings(&self) -> &[Ring] {
        &self.rings[self.outer_count..]
    }

    /// No resolvable points at all.
    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(|r| r.is_empty())
    }
}

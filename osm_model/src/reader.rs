//! In-memory document of decoded OSM records. References to missing objects
//! are filtered out when geometry is materialized, not while loading: node
//! references may show up before all the nodes have, so ways and relations
//! stay raw until the whole stream has been scanned.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::{BBox, GPSBounds, LonLat, Point, Ring};

use crate::multipolygon::{assemble_multipolygon, MemberGeometry};
use crate::osm::{NodeID, OsmID, RelationID, Tags, WayID};
use crate::RichGeometry;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub pt: LonLat,
    pub tags: Tags,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Way {
    pub nodes: Vec<NodeID>,
    pub tags: Tags,
    pub visible: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Relation {
    pub tags: Tags,
    /// Role, member
    pub members: Vec<(String, OsmID)>,
    pub visible: bool,
}

impl Relation {
    /// Only multipolygon-ish relations describe areas whose members stitch
    /// into rings.
    pub fn is_polygon(&self) -> bool {
        self.tags.is(crate::osm::TYPE, "multipolygon")
            || self.tags.is(crate::osm::TYPE, "boundary")
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Document {
    pub gps_bounds: GPSBounds,
    pub nodes: BTreeMap<NodeID, Node>,
    pub ways: BTreeMap<WayID, Way>,
    pub relations: BTreeMap<RelationID, Relation>,
}

impl Document {
    pub fn new() -> Document {
        Document {
            gps_bounds: GPSBounds::new(),
            nodes: BTreeMap::new(),
            ways: BTreeMap::new(),
            relations: BTreeMap::new(),
        }
    }

    /// Inserting also grows the running extent, so the dataset's bounding
    /// box needs no second traversal.
    pub fn insert_node(&mut self, id: NodeID, pt: LonLat, tags: Tags) {
        if self.nodes.contains_key(&id) {
            warn!("duplicate {}, keeping the first copy", id);
            return;
        }
        self.gps_bounds.update(pt);
        self.nodes.insert(id, Node { pt, tags });
    }

    pub fn node(&self, id: NodeID) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn insert_way(&mut self, id: WayID, way: Way) {
        self.ways.insert(id, way);
    }

    pub fn insert_relation(&mut self, id: RelationID, relation: Relation) {
        self.relations.insert(id, relation);
    }

    /// The extent of every node inserted so far.
    pub fn bbox(&self) -> Result<BBox> {
        self.gps_bounds.to_bbox()
    }

    /// A way becomes a single ring in member order. Unresolvable node
    /// references are just skipped, degrading to a shorter ring.
    pub fn materialize_way(&self, id: WayID, way: &Way) -> RichGeometry {
        RichGeometry {
            id: OsmID::Way(id),
            tags: way.tags.clone(),
            rings: vec![self.resolve_ring(&way.nodes)],
            outer_count: 1,
        }
    }

    pub fn materialize_ways(&self) -> Vec<RichGeometry> {
        self.ways
            .iter()
            .map(|(id, way)| self.materialize_way(*id, way))
            .collect()
    }

    /// Stitch a relation's member ways into rings. Relations that aren't
    /// polygon-typed or aren't visible don't produce geometry.
    pub fn assemble_relation(&self, id: RelationID, relation: &Relation) -> Option<RichGeometry> {
        if !relation.is_polygon() || !relation.visible {
            return None;
        }

        let mut members = Vec::new();
        for (role, member) in &relation.members {
            if let OsmID::Way(w) = member {
                if let Some(way) = self.ways.get(w) {
                    members.push(MemberGeometry {
                        role: role.clone(),
                        ring: self.resolve_ring(&way.nodes),
                    });
                }
            }
        }

        let assembled = assemble_multipolygon(members);
        Some(RichGeometry {
            id: OsmID::Relation(id),
            tags: relation.tags.clone(),
            rings: assembled.rings,
            outer_count: assembled.outer_count,
        })
    }

    pub fn assemble_relations(&self) -> Vec<RichGeometry> {
        self.relations
            .iter()
            .filter_map(|(id, relation)| self.assemble_relation(*id, relation))
            .collect()
    }

    fn resolve_ring(&self, nodes: &[NodeID]) -> Ring {
        let mut pts = Vec::new();
        for n in nodes {
            // Just skip missing nodes
            if let Some(node) = self.nodes.get(n) {
                pts.push(Point::projected(node.pt));
            }
        }
        Ring::new(pts)
    }
}

//! Decoding front-end: an OSM protobuf extract becomes a `Document`.

use anyhow::{Context, Result};
use osmpbf::{Element, ElementReader, RelMemberType};

use geom::LonLat;

use crate::osm::{NodeID, OsmID, RelationID, Tags, WayID};
use crate::reader::{Document, Relation, Way};

/// Single pass over the protobuf stream. Nodes land in the index as they're
/// seen; ways and relations are only stored raw here and get resolved to
/// geometry later, once every referenced node is known.
pub fn load_pbf(path: &str) -> Result<Document> {
    let reader = ElementReader::from_path(path).with_context(|| format!("opening {}", path))?;
    let mut doc = Document::new();

    reader.for_each(|element| match element {
        Element::Node(node) => {
            doc.insert_node(
                NodeID(node.id()),
                LonLat::new(node.lon(), node.lat()),
                collect_tags(node.tags()),
            );
        }
        Element::DenseNode(node) => {
            doc.insert_node(
                NodeID(node.id()),
                LonLat::new(node.lon(), node.lat()),
                collect_tags(node.tags()),
            );
        }
        Element::Way(way) => {
            doc.insert_way(
                WayID(way.id()),
                Way {
                    nodes: way.refs().map(NodeID).collect(),
                    tags: collect_tags(way.tags()),
                    visible: true,
                },
            );
        }
        Element::Relation(relation) => {
            let mut members = Vec::new();
            for member in relation.members() {
                let id = match member.member_type {
                    RelMemberType::Node => OsmID::Node(NodeID(member.member_id)),
                    RelMemberType::Way => OsmID::Way(WayID(member.member_id)),
                    RelMemberType::Relation => OsmID::Relation(RelationID(member.member_id)),
                };
                let role = member.role().unwrap_or("").to_string();
                members.push((role, id));
            }
            doc.insert_relation(
                RelationID(relation.id()),
                Relation {
                    tags: collect_tags(relation.tags()),
                    members,
                    visible: true,
                },
            );
        }
    })?;

    info!(
        "loaded {} nodes, {} ways, {} relations from {}",
        doc.nodes.len(),
        doc.ways.len(),
        doc.relations.len(),
        path
    );
    Ok(doc)
}

fn collect_tags<'a, I: Iterator<Item = (&'a str, &'a str)>>(iter: I) -> Tags {
    let mut tags = Tags::new();
    for (key, value) in iter {
        // Filter out really useless data
        if key.starts_with("tiger:") || key.starts_with("old_name:") {
            continue;
        }
        tags.insert(key, value);
    }
    tags
}

//! The OSM side of the pipeline: decoded node/way/relation records, the node
//! graph index, and assembly of renderable geometry from ways and
//! multipolygon relations.

#[macro_use]
extern crate log;

mod geometry;
mod multipolygon;
pub mod osm;
mod pbf;
mod reader;

pub use crate::geometry::RichGeometry;
pub use crate::multipolygon::{assemble_multipolygon, AssembledRings, MemberGeometry};
pub use crate::pbf::load_pbf;
pub use crate::reader::{Document, Node, Relation, Way};

//! Geometry primitives for map data: WGS84 positions, projected points,
//! bounding regions, and rings of points.

#[macro_use]
extern crate anyhow;

mod bounds;
mod clip;
mod gps;
mod pt;
mod ring;

pub use crate::bounds::{BBox, GPSBounds};
pub use crate::clip::clip_ring;
pub use crate::gps::LonLat;
pub use crate::pt::{HashablePt2D, Point, Pt2D};
pub use crate::ring::Ring;

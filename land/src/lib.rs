//! Land polygons from shapefiles: a closed set of record kinds, and clipping
//! of the polygon records against a bounding region.

#[macro_use]
extern crate log;

mod loader;

pub use crate::loader::load_shapefile;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use geom::{clip_ring, BBox, LonLat, Point, Ring};

/// The shapefile record kinds this pipeline understands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Polygon(ShapePolygon),
    Polyline(Vec<Point>),
    Point(LonLat),
    Null,
}

impl ShapeKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ShapeKind::Polygon(_) => "polygon",
            ShapeKind::Polyline(_) => "polyline",
            ShapeKind::Point(_) => "point",
            ShapeKind::Null => "null",
        }
    }
}

/// One polygon record's outline, parts flattened in file order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapePolygon {
    pub ring: Ring,
}

#[derive(Error, Debug, PartialEq)]
pub enum ClipError {
    #[error("unsupported shape kind: {0}")]
    Unsupported(&'static str),
}

/// Clamp every polygon record against the region, keeping the ones with at
/// least one vertex inside. Handing this anything but polygons is a caller
/// error.
pub fn clip_shapes(shapes: &[ShapeKind], bbox: &BBox) -> Result<Vec<ShapePolygon>, ClipError> {
    let mut kept = Vec::new();
    for shape in shapes {
        let polygon = match shape {
            ShapeKind::Polygon(polygon) => polygon,
            other => return Err(ClipError::Unsupported(other.kind_name())),
        };
        let (ring, intersects) = clip_ring(&polygon.ring, bbox);
        if intersects {
            kept.push(ShapePolygon { ring });
        }
    }
    debug!("{} of {} shapes intersect the region", kept.len(), shapes.len());
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon(pts: &[(f64, f64)]) -> ShapeKind {
        ShapeKind::Polygon(ShapePolygon {
            ring: Ring::new(
                pts.iter()
                    .map(|(lon, lat)| Point::new(LonLat::new(*lon, *lat)))
                    .collect(),
            ),
        })
    }

    #[test]
    fn keeps_intersecting_drops_disjoint() {
        let bbox = BBox::parse("10,50,5,45").unwrap();
        let shapes = vec![
            polygon(&[(7.0, 48.0), (8.0, 48.0), (8.0, 49.0), (7.0, 48.0)]),
            polygon(&[(20.0, 60.0), (21.0, 60.0), (21.0, 61.0), (20.0, 60.0)]),
        ];
        let kept = clip_shapes(&shapes, &bbox).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].ring.points()[0].gps(), LonLat::new(7.0, 48.0));
    }

    #[test]
    fn non_polygon_records_are_a_typed_error() {
        let bbox = BBox::parse("10,50,5,45").unwrap();
        let shapes = vec![ShapeKind::Point(LonLat::new(7.0, 48.0))];
        assert_eq!(
            clip_shapes(&shapes, &bbox),
            Err(ClipError::Unsupported("point"))
        );
    }
}

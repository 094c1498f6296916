//! Shapefile decoding into `ShapeKind` records.

use anyhow::Result;

use geom::{LonLat, Point, Ring};

use crate::{ShapeKind, ShapePolygon};

pub fn load_shapefile(path: &str) -> Result<Vec<ShapeKind>> {
    let shapes = shapefile::read_shapes(path)?;
    let mut result = Vec::new();
    for shape in shapes {
        result.push(match shape {
            shapefile::Shape::Polygon(polygon) => {
                let mut pts = Vec::new();
                for ring in polygon.rings() {
                    for p in ring.points() {
                        pts.push(Point::new(LonLat::new(p.x, p.y)));
                    }
                }
                ShapeKind::Polygon(ShapePolygon {
                    ring: Ring::new(pts),
                })
            }
            shapefile::Shape::Polyline(line) => {
                let mut pts = Vec::new();
                for part in line.parts() {
                    for p in part {
                        pts.push(Point::new(LonLat::new(p.x, p.y)));
                    }
                }
                ShapeKind::Polyline(pts)
            }
            shapefile::Shape::Point(p) => ShapeKind::Point(LonLat::new(p.x, p.y)),
            shapefile::Shape::NullShape => ShapeKind::Null,
            other => {
                warn!("skipping unsupported shapefile record {}", other.shapetype());
                ShapeKind::Null
            }
        });
    }
    info!("loaded {} shapes from {}", result.len(), path);
    Ok(result)
}

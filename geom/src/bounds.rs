use std::f64;
use std::f64::consts::PI;

use anyhow::Result;
use geojson::{Feature, Geometry, Value};
use serde::{Deserialize, Serialize};

use crate::LonLat;

/// Tracks the extent of a stream of positions. Gets updated as a side effect
/// of inserting nodes, so deriving the dataset's bounding box doesn't need a
/// second pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GPSBounds {
    pub(crate) min_lon: f64,
    pub(crate) min_lat: f64,
    pub(crate) max_lon: f64,
    pub(crate) max_lat: f64,
}

impl GPSBounds {
    pub fn new() -> GPSBounds {
        GPSBounds {
            min_lon: f64::MAX,
            min_lat: f64::MAX,
            max_lon: f64::MIN,
            max_lat: f64::MIN,
        }
    }

    pub fn from(pts: &[LonLat]) -> GPSBounds {
        let mut b = GPSBounds::new();
        for pt in pts {
            b.update(*pt);
        }
        b
    }

    pub fn update(&mut self, pt: LonLat) {
        self.min_lon = self.min_lon.min(pt.longitude);
        self.max_lon = self.max_lon.max(pt.longitude);
        self.min_lat = self.min_lat.min(pt.latitude);
        self.max_lat = self.max_lat.max(pt.latitude);
    }

    pub fn contains(&self, pt: LonLat) -> bool {
        pt.longitude >= self.min_lon
            && pt.longitude <= self.max_lon
            && pt.latitude >= self.min_lat
            && pt.latitude <= self.max_lat
    }

    /// True until the first `update`.
    pub fn is_empty(&self) -> bool {
        self.min_lon > self.max_lon
    }

    pub fn to_bbox(&self) -> Result<BBox> {
        if self.is_empty() {
            bail!("can't derive a bounding box from zero points");
        }
        BBox::new(
            LonLat::new(self.min_lon, self.min_lat),
            LonLat::new(self.max_lon, self.max_lat),
        )
    }
}

impl Default for GPSBounds {
    fn default() -> GPSBounds {
        GPSBounds::new()
    }
}

/// An axis-aligned region, as southwest/northeast corners. The corners are
/// only handed out by fallible constructors, so a `BBox` always satisfies
/// `ne.longitude >= sw.longitude && ne.latitude >= sw.latitude`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BBox {
    sw: LonLat,
    ne: LonLat,
}

impl BBox {
    pub fn new(sw: LonLat, ne: LonLat) -> Result<BBox> {
        if ne.longitude < sw.longitude || ne.latitude < sw.latitude {
            bail!(
                "the ordering of the bounding box coordinates is invalid: SW {}, NE {}",
                sw,
                ne
            );
        }
        Ok(BBox { sw, ne })
    }

    /// Parses "NE lon, NE lat, SW lon, SW lat".
    pub fn parse(raw: &str) -> Result<BBox> {
        let parts: Vec<&str> = raw.split(',').collect();
        if parts.len() < 4 {
            bail!("invalid bounding box {:?}: need 4 comma-separated coordinates", raw);
        }

        let mut coords = Vec::new();
        for part in parts {
            coords.push(part.trim().parse::<f64>()?);
        }

        let ne = LonLat::new(coords[0], coords[1]);
        let sw = LonLat::new(coords[2], coords[3]);
        BBox::new(sw, ne)
    }

    /// The region covered by a slippy map tile.
    /// Adapted from: https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames
    pub fn from_tile(x: u32, y: u32, zoom: u32) -> BBox {
        // Tile y grows southwards, so y+1 is the southern edge.
        BBox {
            sw: LonLat::new(tile_to_lon(x, zoom), tile_to_lat(y + 1, zoom)),
            ne: LonLat::new(tile_to_lon(x + 1, zoom), tile_to_lat(y, zoom)),
        }
    }

    pub fn sw(&self) -> LonLat {
        self.sw
    }

    pub fn ne(&self) -> LonLat {
        self.ne
    }

    pub fn contains(&self, pt: LonLat) -> bool {
        pt.longitude >= self.sw.longitude
            && pt.longitude <= self.ne.longitude
            && pt.latitude >= self.sw.latitude
            && pt.latitude <= self.ne.latitude
    }

    /// Component-wise clamp into the region.
    pub fn clamp(&self, pt: LonLat) -> LonLat {
        LonLat::new(
            pt.longitude
                .max(self.sw.longitude)
                .min(self.ne.longitude),
            pt.latitude.max(self.sw.latitude).min(self.ne.latitude),
        )
    }

    pub fn get_corners(&self) -> Vec<LonLat> {
        vec![
            self.sw,
            LonLat::new(self.sw.longitude, self.ne.latitude),
            self.ne,
            LonLat::new(self.ne.longitude, self.sw.latitude),
        ]
    }

    /// The region as a GeoJSON polygon feature, traced SW -> NW -> NE -> SE
    /// -> SW.
    pub fn to_geojson(&self) -> Feature {
        let mut ring: Vec<Vec<f64>> = self
            .get_corners()
            .into_iter()
            .map(|pt| vec![pt.longitude, pt.latitude])
            .collect();
        ring.push(vec![self.sw.longitude, self.sw.latitude]);

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            id: None,
            properties: None,
            foreign_members: None,
        }
    }

    pub fn to_geojson_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_geojson())?)
    }
}

fn tile_to_lon(x: u32, zoom: u32) -> f64 {
    (x as f64) / 2f64.powi(zoom as i32) * 360.0 - 180.0
}

fn tile_to_lat(y: u32, zoom: u32) -> f64 {
    let n = PI - (2.0 * PI * (y as f64)) / 2f64.powi(zoom as i32);
    (180.0 / PI) * (0.5 * (n.exp() - (-n).exp())).atan()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_rejects_inverted_corners() {
        assert!(BBox::new(LonLat::new(5.0, 45.0), LonLat::new(10.0, 50.0)).is_ok());
        assert!(BBox::new(LonLat::new(10.0, 45.0), LonLat::new(5.0, 50.0)).is_err());
        assert!(BBox::new(LonLat::new(5.0, 50.0), LonLat::new(10.0, 45.0)).is_err());
    }

    #[test]
    fn bbox_parsing() {
        let bbox = BBox::parse("10,50,5,45").unwrap();
        assert_eq!(bbox.ne(), LonLat::new(10.0, 50.0));
        assert_eq!(bbox.sw(), LonLat::new(5.0, 45.0));

        // Whitespace is tolerated
        assert!(BBox::parse(" 10, 50 ,5,45 ").is_ok());

        for bad in ["", "10,50,5", "10,50,5,oops", "5,50,10,45"] {
            assert!(BBox::parse(bad).is_err(), "{:?} should fail", bad);
        }
    }

    #[test]
    fn clamp_stays_inside() {
        let bbox = BBox::parse("10,50,5,45").unwrap();
        assert_eq!(bbox.clamp(LonLat::new(20.0, 60.0)), LonLat::new(10.0, 50.0));
        assert_eq!(bbox.clamp(LonLat::new(0.0, 0.0)), LonLat::new(5.0, 45.0));
        assert_eq!(bbox.clamp(LonLat::new(7.0, 48.0)), LonLat::new(7.0, 48.0));
    }

    #[test]
    fn extent_tracking() {
        let mut bounds = GPSBounds::new();
        assert!(bounds.is_empty());
        assert!(bounds.to_bbox().is_err());

        bounds.update(LonLat::new(8.0, 47.0));
        bounds.update(LonLat::new(6.0, 49.0));
        let bbox = bounds.to_bbox().unwrap();
        assert_eq!(bbox.sw(), LonLat::new(6.0, 47.0));
        assert_eq!(bbox.ne(), LonLat::new(8.0, 49.0));
    }

    #[test]
    fn tile_bbox_is_well_formed() {
        let bbox = BBox::from_tile(74774, 50967, 17);
        assert!(bbox.ne().longitude > bbox.sw().longitude);
        assert!(bbox.ne().latitude > bbox.sw().latitude);
        // Zoom 0 covers the whole world
        let world = BBox::from_tile(0, 0, 0);
        assert_eq!(world.sw().longitude, -180.0);
        assert_eq!(world.ne().longitude, 180.0);
    }
}

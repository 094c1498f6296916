use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{HashablePt2D, Pt2D};

/// Radius of the WGS84 reference sphere used by the Web Mercator projection,
/// in meters.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

// longitude is x, latitude is y
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    /// Project to Web Mercator meters. WGS84 drawn directly looks squashed,
    /// so everything renderable goes through this.
    pub fn to_web_mercator(self) -> Pt2D {
        let x = EARTH_RADIUS_M * self.longitude.to_radians();
        let y = EARTH_RADIUS_M * (PI / 4.0 + self.latitude.to_radians() / 2.0).tan().ln();
        Pt2D::new(x, y)
    }

    pub fn to_hashable(self) -> HashablePt2D {
        HashablePt2D::new(self.longitude, self.latitude)
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}

use std::fmt;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::LonLat;

// This represents projected space in Web Mercator meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        Pt2D { x, y }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", self.x(), self.y())
    }
}

/// A position from the input data, along with its projection. The projected
/// coordinates are a cache filled in when geometry is materialized; equality
/// (what ring closure tests use) only ever compares longitude/latitude.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Point {
    gps: LonLat,
    projected: Option<Pt2D>,
}

impl Point {
    pub fn new(gps: LonLat) -> Point {
        Point {
            gps,
            projected: None,
        }
    }

    /// Like `new`, but eagerly fills the projection cache.
    pub fn projected(gps: LonLat) -> Point {
        Point {
            gps,
            projected: Some(gps.to_web_mercator()),
        }
    }

    pub fn gps(self) -> LonLat {
        self.gps
    }

    pub fn lon(self) -> f64 {
        self.gps.longitude
    }

    pub fn lat(self) -> f64 {
        self.gps.latitude
    }

    /// The cached projection, or the projection computed on the spot.
    pub fn to_pt2d(self) -> Pt2D {
        self.projected
            .unwrap_or_else(|| self.gps.to_web_mercator())
    }

    pub fn to_hashable(self) -> HashablePt2D {
        self.gps.to_hashable()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Point) -> bool {
        self.gps == other.gps
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Point({0}, {1})", self.lon(), self.lat())
    }
}

// This isn't opinionated about what the (x, y) represents -- could be lon/lat
// or projected space.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct HashablePt2D {
    x_nan: NotNan<f64>,
    y_nan: NotNan<f64>,
}

impl HashablePt2D {
    pub fn new(x: f64, y: f64) -> HashablePt2D {
        HashablePt2D {
            x_nan: NotNan::new(x).unwrap(),
            y_nan: NotNan::new(y).unwrap(),
        }
    }

    pub fn x(self) -> f64 {
        self.x_nan.into_inner()
    }

    pub fn y(self) -> f64 {
        self.y_nan.into_inner()
    }
}

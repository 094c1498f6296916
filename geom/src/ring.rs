use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Point;

/// An ordered sequence of points: one loop of a polygon boundary, or an
/// unclosed path when the input couldn't be stitched shut. Callers decide
/// whether an open ring is renderable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pts: Vec<Point>,
}

impl Ring {
    pub fn new(pts: Vec<Point>) -> Ring {
        Ring { pts }
    }

    pub fn points(&self) -> &[Point] {
        &self.pts
    }

    pub fn into_points(self) -> Vec<Point> {
        self.pts
    }

    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    pub fn first_pt(&self) -> Option<Point> {
        self.pts.first().copied()
    }

    pub fn last_pt(&self) -> Option<Point> {
        self.pts.last().copied()
    }

    /// A ring that loops back to where it started. Needs at least one point
    /// besides the shared endpoints.
    pub fn is_closed(&self) -> bool {
        self.pts.len() > 2 && self.pts.first() == self.pts.last()
    }

    pub fn reverse(&mut self) {
        self.pts.reverse();
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Ring::new(vec![")?;
        for pt in &self.pts {
            writeln!(f, "  Point({}, {}),", pt.lon(), pt.lat())?;
        }
        write!(f, "])")
    }
}

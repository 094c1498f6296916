use crate::{BBox, Point, Ring};

/// Clamp-and-classify against a region. Every point is clamped
/// component-wise into the box; the ring counts as intersecting when any of
/// its points was already inside. No vertices are inserted at the box edge,
/// so geometry crossing the boundary gets relocated onto it rather than cut
/// -- callers wanting exact shapes at the border need a real clipper.
pub fn clip_ring(ring: &Ring, bbox: &BBox) -> (Ring, bool) {
    let mut intersects = false;
    let mut pts = Vec::with_capacity(ring.len());
    for pt in ring.points() {
        let gps = pt.gps();
        if bbox.contains(gps) {
            intersects = true;
            pts.push(*pt);
        } else {
            pts.push(Point::projected(bbox.clamp(gps)));
        }
    }
    (Ring::new(pts), intersects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LonLat;

    fn ring(pts: &[(f64, f64)]) -> Ring {
        Ring::new(
            pts.iter()
                .map(|(lon, lat)| Point::new(LonLat::new(*lon, *lat)))
                .collect(),
        )
    }

    #[test]
    fn one_inside_point_intersects() {
        let bbox = BBox::parse("10,50,5,45").unwrap();
        let (clipped, intersects) = clip_ring(&ring(&[(7.0, 48.0), (20.0, 60.0)]), &bbox);
        assert!(intersects);
        assert_eq!(clipped.points()[0].gps(), LonLat::new(7.0, 48.0));
        assert_eq!(clipped.points()[1].gps(), LonLat::new(10.0, 50.0));
    }

    #[test]
    fn fully_outside_is_disjoint_and_clamped() {
        let bbox = BBox::parse("10,50,5,45").unwrap();
        let (clipped, intersects) =
            clip_ring(&ring(&[(20.0, 60.0), (21.0, 61.0), (20.0, 60.0)]), &bbox);
        assert!(!intersects);
        for pt in clipped.points() {
            assert_eq!(pt.gps(), LonLat::new(10.0, 50.0));
        }
    }

    #[test]
    fn clamping_is_idempotent() {
        let bbox = BBox::parse("10,50,5,45").unwrap();
        let input = ring(&[(7.0, 48.0), (20.0, 60.0), (0.0, 44.0), (6.0, 52.0)]);
        let (once, _) = clip_ring(&input, &bbox);
        let (twice, intersects) = clip_ring(&once, &bbox);
        assert_eq!(once, twice);
        // Everything is on or inside the box edge now
        assert!(intersects);
    }
}

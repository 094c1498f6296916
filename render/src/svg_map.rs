use anyhow::Result;

use geom::{BBox, Pt2D};
use land::ShapePolygon;
use osm_model::osm::{OsmID, WayID};
use osm_model::RichGeometry;
use style::{Color, FeatureStyle, StyleCatalog};
use svg::node::element::path::Data;
use svg::node::element::{Path, Rectangle};
use svg::Document;

/// What unstyled features get painted with when the rules say to show
/// everything.
const FALLBACK_COLOR: Color = Color::rgb(120, 120, 120);

/// A Web Mercator drawing surface. The caller picks the width; height
/// follows from the region's aspect ratio.
pub struct SvgMap {
    width: f64,
    height: f64,
    x_min: f64,
    y_min: f64,
    x_scale: f64,
    y_scale: f64,
    document: Document,
}

impl SvgMap {
    pub fn new(bbox: BBox, width: f64) -> SvgMap {
        let min = bbox.sw().to_web_mercator();
        let max = bbox.ne().to_web_mercator();
        let height = width * (max.y() - min.y()) / (max.x() - min.x());

        let document = Document::new()
            .set("viewBox", (0.0, 0.0, width, height))
            .set("width", width)
            .set("height", height);

        SvgMap {
            width,
            height,
            x_min: min.x(),
            y_min: min.y(),
            x_scale: width / (max.x() - min.x()),
            y_scale: height / (max.y() - min.y()),
            document,
        }
    }

    // Screen origin is the top-left corner, so y flips.
    fn to_screen(&self, pt: Pt2D) -> (f64, f64) {
        (
            (pt.x() - self.x_min) * self.x_scale,
            self.height - (pt.y() - self.y_min) * self.y_scale,
        )
    }

    fn push<T: svg::Node>(&mut self, node: T) {
        let document = std::mem::replace(&mut self.document, Document::new());
        self.document = document.add(node);
    }

    pub fn draw_background(&mut self, color: Color) {
        let rect = Rectangle::new()
            .set("x", 0.0)
            .set("y", 0.0)
            .set("width", self.width)
            .set("height", self.height)
            .set("fill", color.to_hex())
            .set("fill-opacity", color.opacity());
        self.push(rect);
    }

    pub fn draw_land(
        &mut self,
        polygons: &[ShapePolygon],
        fill: Color,
        stroke: Color,
        stroke_width: f64,
    ) {
        for polygon in polygons {
            let mut data = Data::new();
            for (i, pt) in polygon.ring.points().iter().enumerate() {
                let (x, y) = self.to_screen(pt.to_pt2d());
                if i == 0 {
                    data = data.move_to((x, y));
                } else {
                    data = data.line_to((x, y));
                }
            }
            data = data.close();

            let path = Path::new()
                .set("d", data)
                .set("fill", fill.to_hex())
                .set("fill-opacity", fill.opacity())
                .set("stroke", stroke.to_hex())
                .set("stroke-opacity", stroke.opacity())
                .set("stroke-width", stroke_width);
            self.push(path);
        }
    }

    /// Resolve a style for each feature and paint the styled ones, bottom
    /// z-order first. Unstyled features only appear when the rules opt into
    /// showing everything.
    pub fn draw_features(
        &mut self,
        features: &[RichGeometry],
        styles: &StyleCatalog,
    ) -> Result<()> {
        let mut styled: Vec<(&RichGeometry, Option<&FeatureStyle>)> = Vec::new();
        for feature in features {
            if feature.is_empty() {
                continue;
            }
            let id = match feature.id {
                OsmID::Way(w) => Some(w),
                // Assembled relations answer to their relation ID
                OsmID::Relation(r) => Some(WayID(r.0)),
                OsmID::Node(_) => None,
            };
            match styles.resolve(&feature.tags, id)? {
                Some(style) => styled.push((feature, Some(style))),
                None => {
                    if styles.show_all() {
                        styled.push((feature, None));
                    }
                }
            }
        }
        styled.sort_by_key(|(_, style)| style.map(|s| s.z_index).unwrap_or(0));

        for (feature, style) in styled {
            self.draw_feature(feature, style)?;
        }
        Ok(())
    }

    fn draw_feature(&mut self, feature: &RichGeometry, style: Option<&FeatureStyle>) -> Result<()> {
        // All rings go in one path; the even-odd rule punches out the holes.
        let mut data = Data::new();
        for ring in &feature.rings {
            for (i, pt) in ring.points().iter().enumerate() {
                let (x, y) = self.to_screen(pt.to_pt2d());
                if i == 0 {
                    data = data.move_to((x, y));
                } else {
                    data = data.line_to((x, y));
                }
            }
        }

        let mut path = Path::new().set("d", data).set("fill-rule", "evenodd");
        match style {
            Some(style) => {
                if style.stroke_width > 0.0 && !style.stroke_color.is_empty() {
                    let stroke = Color::parse(&style.stroke_color)?;
                    path = path
                        .set("stroke", stroke.to_hex())
                        .set("stroke-opacity", stroke.opacity())
                        .set("stroke-width", style.stroke_width);
                    if style.dashed {
                        path = path.set(
                            "stroke-dasharray",
                            format!("{},{}", style.stroke_width, style.stroke_width),
                        );
                    }
                }
                if style.fill_color.is_empty() {
                    path = path.set("fill", "none");
                } else {
                    let fill = Color::parse(&style.fill_color)?;
                    path = path
                        .set("fill", fill.to_hex())
                        .set("fill-opacity", fill.opacity());
                }
            }
            None => {
                path = path
                    .set("fill", "none")
                    .set("stroke", FALLBACK_COLOR.to_hex())
                    .set("stroke-width", 1.0);
            }
        }
        self.push(path);
        Ok(())
    }

    pub fn svg_string(&self) -> String {
        self.document.to_string()
    }

    pub fn write(&self, path: &str) -> Result<()> {
        fs_err::write(path, self.svg_string())?;
        info!("wrote {}", path);
        Ok(())
    }
}

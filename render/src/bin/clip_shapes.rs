//! Clip a shapefile against a bounding region and emit the region and the
//! surviving features as GeoJSON.

use anyhow::Result;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use log::info;
use structopt::StructOpt;

use geom::BBox;
use land::ShapePolygon;

#[derive(StructOpt, Debug)]
#[structopt(name = "clip_shapes")]
struct Flags {
    /// The path to the shapefile to clip
    #[structopt(long = "shapefile")]
    shapefile: String,

    /// The region to keep, as "NE lon,NE lat,SW lon,SW lat"
    #[structopt(long = "bbox")]
    bbox: String,

    /// The output GeoJSON path
    #[structopt(long = "output", default_value = "clipped.geojson")]
    output: String,
}

fn main() -> Result<()> {
    render::logger::setup();
    let flags = Flags::from_args();

    let bbox = BBox::parse(&flags.bbox)?;
    println!("{}", bbox.to_geojson_string()?);

    let shapes = land::load_shapefile(&flags.shapefile)?;
    let polygons = land::clip_shapes(&shapes, &bbox)?;
    info!("{} features found within the bounding box", polygons.len());

    let collection = FeatureCollection {
        bbox: None,
        features: polygons.iter().map(polygon_to_feature).collect(),
        foreign_members: None,
    };
    fs_err::write(&flags.output, serde_json::to_string(&collection)?)?;
    info!("the clipped features were saved as {}", flags.output);

    Ok(())
}

fn polygon_to_feature(polygon: &ShapePolygon) -> Feature {
    let ring: Vec<Vec<f64>> = polygon
        .ring
        .points()
        .iter()
        .map(|pt| vec![pt.lon(), pt.lat()])
        .collect();
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: None,
        properties: None,
        foreign_members: None,
    }
}

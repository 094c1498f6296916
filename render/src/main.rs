use anyhow::Result;
use log::info;
use structopt::StructOpt;

use geom::BBox;
use render::SvgMap;
use style::StyleCatalog;

#[derive(StructOpt, Debug)]
#[structopt(name = "render")]
struct Flags {
    /// The path to the OSM protobuf extract to draw
    #[structopt(long = "pbf")]
    pbf: String,

    /// The path to the land shapefile
    #[structopt(long = "shapefile")]
    shapefile: String,

    /// The path to the style configuration file
    #[structopt(long = "styles")]
    styles: String,

    /// The region to draw, as "NE lon,NE lat,SW lon,SW lat". Defaults to the
    /// extent of the loaded nodes.
    #[structopt(long = "bbox")]
    bbox: Option<String>,

    /// The output SVG path
    #[structopt(long = "output", default_value = "out.svg")]
    output: String,

    /// Canvas width; height follows the region's aspect ratio
    #[structopt(long = "width", default_value = "320")]
    width: f64,
}

fn main() -> Result<()> {
    render::logger::setup();
    let flags = Flags::from_args();

    let mut styles = StyleCatalog::new();
    styles.load_str(&fs_err::read_to_string(&flags.styles)?)?;

    let doc = osm_model::load_pbf(&flags.pbf)?;
    let bbox = match &flags.bbox {
        Some(raw) => BBox::parse(raw)?,
        None => doc.bbox()?,
    };

    let shapes = land::load_shapefile(&flags.shapefile)?;
    let polygons = land::clip_shapes(&shapes, &bbox)?;
    info!("{} land polygons intersect the region", polygons.len());

    let mut features = doc.materialize_ways();
    features.extend(doc.assemble_relations());

    let mut map = SvgMap::new(bbox, flags.width);
    map.draw_background(styles.background_color()?);
    map.draw_land(
        &polygons,
        styles.land_fill_color()?,
        styles.land_stroke_color()?,
        styles.land_stroke_width()?,
    );
    map.draw_features(&features, &styles)?;
    map.write(&flags.output)?;

    Ok(())
}

//! A thin drawing shell over the geometry core: a Web Mercator SVG surface,
//! plus the binaries wiring real files through the pipeline.

#[macro_use]
extern crate log;

pub mod logger;
mod svg_map;

pub use crate::svg_map::SvgMap;

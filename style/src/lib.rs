//! Visual style rules and per-feature resolution.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod catalog;
mod colors;
mod sheet;

pub use crate::catalog::StyleCatalog;
pub use crate::colors::Color;
pub use crate::sheet::{FeatureQuery, FeatureStyle, LandStyle, StyleSheet};

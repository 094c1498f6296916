//! Style rule documents, as decoded from configuration.

use serde::{Deserialize, Serialize};

use osm_model::osm::{Tags, WayID};

/// One attribute/value match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureQuery {
    pub attribute: String,
    pub value: String,
}

/// One rule: what it matches, what it excludes, and how matching features
/// get drawn. Rules are loaded once and never mutated.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FeatureStyle {
    #[serde(default)]
    pub queries: Vec<FeatureQuery>,
    #[serde(default)]
    pub way_id_queries: Vec<i64>,
    #[serde(default)]
    pub way_id_excludes: Vec<i64>,
    #[serde(default)]
    pub exclude: Vec<FeatureQuery>,
    #[serde(default)]
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_color: String,
    #[serde(default)]
    pub fill_color: String,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default)]
    pub dashed: bool,
}

impl FeatureStyle {
    /// Whether this rule opts out of the given feature: an exclusion
    /// attribute/value present in the feature's own tags, or its ID listed
    /// explicitly.
    pub fn should_exclude(&self, tags: &Tags, id: Option<WayID>) -> bool {
        for exclusion in &self.exclude {
            if tags.get(&exclusion.attribute) == Some(&exclusion.value) {
                return true;
            }
        }
        if let Some(id) = id {
            return self.way_id_excludes.contains(&id.0);
        }
        false
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LandStyle {
    #[serde(default)]
    pub fill_color: String,
    #[serde(default)]
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_color: String,
}

/// The whole configuration document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StyleSheet {
    #[serde(default)]
    pub fill_color: String,
    #[serde(default)]
    pub land: LandStyle,
    #[serde(default)]
    pub show_all: bool,
    #[serde(default)]
    pub styles: Vec<FeatureStyle>,
}

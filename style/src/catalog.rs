//! Rule loading and per-feature style resolution.

use std::collections::HashMap;

use anyhow::Result;

use osm_model::osm::{Tags, WayID, NAME, WEBSITE};

use crate::{Color, FeatureStyle, StyleSheet};

const DEFAULT_BACKGROUND: Color = Color::rgba(26, 100, 153, 255);
const DEFAULT_LAND: Color = Color::rgba(255, 255, 255, 255);

/// Loaded style rules plus the lookup indexes derived from them. The indexes
/// are rebuilt from scratch on every load and never patched in place, so a
/// reader can't observe them half-built.
#[derive(Default)]
pub struct StyleCatalog {
    sheet: Option<StyleSheet>,
    // attribute -> value -> index into sheet.styles
    by_query: HashMap<String, HashMap<String, usize>>,
    by_way_id: HashMap<i64, usize>,
}

impl StyleCatalog {
    pub fn new() -> StyleCatalog {
        StyleCatalog::default()
    }

    pub fn load_str(&mut self, raw: &str) -> Result<()> {
        let sheet: StyleSheet = serde_json::from_str(raw)?;
        self.load(sheet);
        Ok(())
    }

    /// Replaces the rules and rebuilds the derived indexes in one step.
    pub fn load(&mut self, sheet: StyleSheet) {
        let mut by_query: HashMap<String, HashMap<String, usize>> = HashMap::new();
        let mut by_way_id = HashMap::new();
        for (idx, style) in sheet.styles.iter().enumerate() {
            for query in &style.queries {
                by_query
                    .entry(query.attribute.clone())
                    .or_default()
                    .insert(query.value.clone(), idx);
            }
            for id in &style.way_id_queries {
                by_way_id.insert(*id, idx);
            }
        }
        debug!(
            "indexed {} styles under {} attributes and {} explicit IDs",
            sheet.styles.len(),
            by_query.len(),
            by_way_id.len()
        );
        self.by_query = by_query;
        self.by_way_id = by_way_id;
        self.sheet = Some(sheet);
    }

    fn sheet(&self) -> Result<&StyleSheet> {
        self.sheet.as_ref().ok_or_else(|| anyhow!("no styles loaded"))
    }

    /// O(1) attribute/value lookup. `Ok(None)` means nothing matched;
    /// querying before anything was loaded is an error.
    pub fn query(&self, attribute: &str, value: &str) -> Result<Option<&FeatureStyle>> {
        let sheet = self.sheet()?;
        Ok(self
            .by_query
            .get(attribute)
            .and_then(|values| values.get(value))
            .map(|idx| &sheet.styles[*idx]))
    }

    pub fn query_id(&self, id: WayID) -> Result<Option<&FeatureStyle>> {
        let sheet = self.sheet()?;
        Ok(self.by_way_id.get(&id.0).map(|idx| &sheet.styles[*idx]))
    }

    /// At most one style per feature: explicit ID rules first (an ID match
    /// whose exclusion fires falls through), then the feature's attributes
    /// in order, skipping keys that never drive styling. For a fixed rule
    /// set this always lands on the same rule.
    pub fn resolve(&self, tags: &Tags, id: Option<WayID>) -> Result<Option<&FeatureStyle>> {
        // Even a feature with no tags should distinguish "nothing loaded"
        // from "no match"
        self.sheet()?;

        if let Some(id) = id {
            if let Some(style) = self.query_id(id)? {
                if !style.should_exclude(tags, Some(id)) {
                    return Ok(Some(style));
                }
            }
        }

        for (key, value) in tags.iter() {
            if key == NAME || key == WEBSITE {
                continue;
            }
            if let Some(style) = self.query(key, value)? {
                if style.should_exclude(tags, id) {
                    continue;
                }
                return Ok(Some(style));
            }
        }
        Ok(None)
    }

    pub fn show_all(&self) -> bool {
        self.sheet.as_ref().map(|s| s.show_all).unwrap_or(false)
    }

    pub fn background_color(&self) -> Result<Color> {
        let sheet = self.sheet()?;
        if sheet.fill_color.is_empty() {
            return Ok(DEFAULT_BACKGROUND);
        }
        Color::parse(&sheet.fill_color)
    }

    pub fn land_fill_color(&self) -> Result<Color> {
        let sheet = self.sheet()?;
        if sheet.land.fill_color.is_empty() {
            return Ok(DEFAULT_LAND);
        }
        Color::parse(&sheet.land.fill_color)
    }

    pub fn land_stroke_color(&self) -> Result<Color> {
        let sheet = self.sheet()?;
        if sheet.land.stroke_color.is_empty() {
            return Ok(DEFAULT_LAND);
        }
        Color::parse(&sheet.land.stroke_color)
    }

    pub fn land_stroke_width(&self) -> Result<f64> {
        Ok(self.sheet()?.land.stroke_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeatureQuery;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        let mut t = Tags::new();
        for (k, v) in pairs {
            t.insert(*k, *v);
        }
        t
    }

    fn catalog() -> StyleCatalog {
        let mut c = StyleCatalog::new();
        c.load(StyleSheet {
            styles: vec![
                FeatureStyle {
                    way_id_queries: vec![42],
                    way_id_excludes: vec![7],
                    stroke_width: 2.0,
                    ..Default::default()
                },
                FeatureStyle {
                    queries: vec![FeatureQuery {
                        attribute: "highway".to_string(),
                        value: "primary".to_string(),
                    }],
                    stroke_width: 3.0,
                    ..Default::default()
                },
                FeatureStyle {
                    queries: vec![FeatureQuery {
                        attribute: "landuse".to_string(),
                        value: "forest".to_string(),
                    }],
                    exclude: vec![FeatureQuery {
                        attribute: "access".to_string(),
                        value: "private".to_string(),
                    }],
                    ..Default::default()
                },
                FeatureStyle {
                    queries: vec![FeatureQuery {
                        attribute: "surface".to_string(),
                        value: "gravel".to_string(),
                    }],
                    stroke_width: 0.5,
                    ..Default::default()
                },
            ],
            ..Default::default()
        });
        c
    }

    #[test]
    fn unloaded_catalog_is_an_error_not_a_miss() {
        let c = StyleCatalog::new();
        assert!(c.query("highway", "primary").is_err());
        assert!(c.resolve(&Tags::new(), None).is_err());
        assert!(c.background_color().is_err());

        // Once loaded, a miss is a defined absence
        let c = catalog();
        assert!(c.query("highway", "motorway").unwrap().is_none());
        assert!(c.resolve(&tags(&[("surface", "dirt")]), None).unwrap().is_none());
    }

    #[test]
    fn id_rules_win_over_attributes() {
        let c = catalog();
        let style = c
            .resolve(&tags(&[("highway", "primary")]), Some(WayID(42)))
            .unwrap()
            .unwrap();
        assert_eq!(style.stroke_width, 2.0);
    }

    #[test]
    fn excluded_id_match_falls_through_to_attributes() {
        let mut c = StyleCatalog::new();
        c.load(StyleSheet {
            styles: vec![
                FeatureStyle {
                    way_id_queries: vec![7],
                    way_id_excludes: vec![7],
                    stroke_width: 2.0,
                    ..Default::default()
                },
                FeatureStyle {
                    queries: vec![FeatureQuery {
                        attribute: "highway".to_string(),
                        value: "primary".to_string(),
                    }],
                    stroke_width: 3.0,
                    ..Default::default()
                },
            ],
            ..Default::default()
        });
        // The ID rule matches way 7 but also excludes it; the attribute rule
        // should still apply
        let style = c
            .resolve(&tags(&[("highway", "primary")]), Some(WayID(7)))
            .unwrap()
            .unwrap();
        assert_eq!(style.stroke_width, 3.0);
    }

    #[test]
    fn attribute_exclusion_moves_on_to_the_next_tag() {
        let c = catalog();
        // The forest rule excludes access=private; with nothing else to
        // match, that's a miss
        assert!(c
            .resolve(&tags(&[("access", "private"), ("landuse", "forest")]), None)
            .unwrap()
            .is_none());
        // With a later tag that does match, the search keeps going past the
        // excluded rule
        let style = c
            .resolve(
                &tags(&[("access", "private"), ("landuse", "forest"), ("surface", "gravel")]),
                None,
            )
            .unwrap()
            .unwrap();
        assert_eq!(style.stroke_width, 0.5);
    }

    #[test]
    fn noise_keys_never_style() {
        let mut c = StyleCatalog::new();
        c.load(StyleSheet {
            styles: vec![FeatureStyle {
                queries: vec![FeatureQuery {
                    attribute: "name".to_string(),
                    value: "Main Street".to_string(),
                }],
                ..Default::default()
            }],
            ..Default::default()
        });
        assert!(c
            .resolve(&tags(&[("name", "Main Street")]), None)
            .unwrap()
            .is_none());
    }

    #[test]
    fn resolution_is_deterministic() {
        let c = catalog();
        let t = tags(&[("highway", "primary"), ("landuse", "forest")]);
        let first = c.resolve(&t, None).unwrap().unwrap();
        for _ in 0..10 {
            let again = c.resolve(&t, None).unwrap().unwrap();
            assert!(std::ptr::eq(first, again));
        }
    }

    #[test]
    fn default_colors() {
        let mut c = StyleCatalog::new();
        c.load(StyleSheet::default());
        assert_eq!(c.background_color().unwrap(), Color::rgba(26, 100, 153, 255));
        assert_eq!(c.land_fill_color().unwrap(), Color::rgba(255, 255, 255, 255));
        assert_eq!(c.land_stroke_width().unwrap(), 0.0);
        assert!(!c.show_all());
    }

    #[test]
    fn reload_replaces_the_index() {
        let mut c = catalog();
        assert!(c.query("highway", "primary").unwrap().is_some());
        c.load(StyleSheet {
            styles: vec![FeatureStyle {
                queries: vec![FeatureQuery {
                    attribute: "waterway".to_string(),
                    value: "river".to_string(),
                }],
                ..Default::default()
            }],
            ..Default::default()
        });
        assert!(c.query("highway", "primary").unwrap().is_none());
        assert!(c.query("waterway", "river").unwrap().is_some());
    }

    #[test]
    fn json_documents_decode() {
        let mut c = StyleCatalog::new();
        c.load_str(
            r##"{
                "fill_color": "#1a6499",
                "land": {"fill_color": "#fff", "stroke_width": 2.0},
                "show_all": true,
                "styles": [
                    {
                        "queries": [{"attribute": "highway", "value": "primary"}],
                        "stroke_width": 1.5,
                        "stroke_color": "rgba(200, 30, 30, 255)",
                        "z_index": 3,
                        "dashed": true
                    }
                ]
            }"##,
        )
        .unwrap();
        assert!(c.show_all());
        let style = c.query("highway", "primary").unwrap().unwrap();
        assert!(style.dashed);
        assert_eq!(style.z_index, 3);
        assert_eq!(c.land_fill_color().unwrap(), Color::rgb(255, 255, 255));
    }
}

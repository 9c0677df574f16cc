//! Run configuration, read from an optional JSON file. Every field has a default so a partial
//! file (or none at all) is fine.

use crate::error::{ConfigError, GroupingError};
use crate::grouping::{MagnitudeGrouper, RangeFilter, RankBuckets};
use crate::parse_stars::BadRecordPolicy;
use crate::sky::grid::MIN_GROUND_SIDES;
use serde_derive::Deserialize;
use std::path::Path;

/// starting camera and projection parameters, angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub field_of_view: f64,
    pub head_latitude: f64,
    pub head_longitude: f64,
    /// fixed width / height of the projection, not taken from the viewport
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
    /// degrees of head rotation per pixel of mouse drag
    pub drag_sensitivity: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            latitude: 57.0,
            longitude: 61.0,
            field_of_view: 45.0,
            head_latitude: 0.0,
            head_longitude: 0.0,
            aspect_ratio: 1.8,
            near: 0.1,
            far: 100.0,
            drag_sensitivity: 0.057,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub radius: f64,
    pub latitude_bands: usize,
    pub longitude_divisions: usize,
    /// sides of the ground polygon
    pub ground_sides: usize,
    /// how far below the horizon the center of the ground fan sits
    pub ground_depth: f64,
    pub show_cardinal_points: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            radius: 1.0,
            latitude_bands: 15,
            longitude_divisions: 25,
            ground_sides: 25,
            ground_depth: 0.5,
            show_cardinal_points: true,
        }
    }
}

/// which magnitude grouper the renderer uses
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "policy")]
pub enum GroupingPolicy {
    RankBuckets {
        buckets: usize,
        min_size: f64,
        max_size: f64,
        exponent: f64,
    },
    RangeFilter {
        min_magnitude: f64,
        max_magnitude: f64,
        min_radius: f64,
        #[serde(default = "default_k")]
        k: f64,
    },
}

fn default_k() -> f64 {
    RangeFilter::DEFAULT_K
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        let r = RankBuckets::default();
        GroupingPolicy::RankBuckets {
            buckets: r.buckets,
            min_size: r.min_size,
            max_size: r.max_size,
            exponent: r.exponent,
        }
    }
}

impl GroupingPolicy {
    pub fn grouper(&self) -> Result<Box<dyn MagnitudeGrouper>, GroupingError> {
        Ok(match *self {
            GroupingPolicy::RankBuckets {
                buckets,
                min_size,
                max_size,
                exponent,
            } => Box::new(RankBuckets::new(buckets, min_size, max_size, exponent)?),
            GroupingPolicy::RangeFilter {
                min_magnitude,
                max_magnitude,
                min_radius,
                k,
            } => Box::new(RangeFilter::new(min_magnitude, max_magnitude, min_radius, k)?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub view: ViewConfig,
    pub grid: GridConfig,
    pub grouping: GroupingPolicy,
    pub bad_records: BadRecordPolicy,
}

impl SkyConfig {
    pub fn from_json(text: &str, origin: &str) -> Result<SkyConfig, ConfigError> {
        let config: SkyConfig = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        // catch bad grouping parameters here rather than on the first frame
        config.grouping.grouper()?;
        if config.grid.ground_sides < MIN_GROUND_SIDES {
            return Err(ConfigError::GroundSides(config.grid.ground_sides));
        }
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<SkyConfig, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let config = SkyConfig::from_json(&text, &display)?;
        log::info!("loaded configuration from {}", display);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = SkyConfig::from_json("{}", "inline").unwrap();
        assert_eq!(config, SkyConfig::default());
        assert_eq!(config.view.latitude, 57.0);
        assert_eq!(config.grid.latitude_bands, 15);
        assert_eq!(config.bad_records, BadRecordPolicy::Abort);
    }

    #[test]
    fn test_partial_json() {
        let text = r#"{
            "view": { "field_of_view": 30.0, "aspect_ratio": 1.333 },
            "grouping": { "policy": "RangeFilter", "min_magnitude": -2.0, "max_magnitude": 4.5, "min_radius": 0.8 },
            "bad_records": "Skip"
        }"#;
        let config = SkyConfig::from_json(text, "inline").unwrap();
        assert_eq!(config.view.field_of_view, 30.0);
        assert_eq!(config.view.longitude, 61.0);
        assert_eq!(config.view.aspect_ratio, 1.333);
        assert_eq!(config.bad_records, BadRecordPolicy::Skip);
        assert_eq!(
            config.grouping,
            GroupingPolicy::RangeFilter {
                min_magnitude: -2.0,
                max_magnitude: 4.5,
                min_radius: 0.8,
                k: 0.4
            }
        );
    }

    #[test]
    fn test_inverted_range_rejected() {
        let text = r#"{ "grouping": { "policy": "RangeFilter", "min_magnitude": 5.0, "max_magnitude": 1.0, "min_radius": 0.8 } }"#;
        let err = SkyConfig::from_json(text, "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Grouping(GroupingError::Range(_))));
    }

    #[test]
    fn test_non_positive_grouping_parameters_rejected() {
        let text = r#"{ "grouping": { "policy": "RangeFilter", "min_magnitude": -1.0, "max_magnitude": 5.0, "min_radius": 0.8, "k": 0.0 } }"#;
        let err = SkyConfig::from_json(text, "inline").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Grouping(GroupingError::NotPositive { name: "k", .. })
        ));

        let text = r#"{ "grouping": { "policy": "RankBuckets", "buckets": 10, "min_size": 4.0, "max_size": 2.0, "exponent": 8.5 } }"#;
        let err = SkyConfig::from_json(text, "inline").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Grouping(GroupingError::InvertedSizes { .. })
        ));
    }

    #[test]
    fn test_degenerate_ground_rejected() {
        for sides in [0, 2] {
            let text = format!(r#"{{ "grid": {{ "ground_sides": {} }} }}"#, sides);
            let err = SkyConfig::from_json(&text, "inline").unwrap_err();
            assert!(matches!(err, ConfigError::GroundSides(s) if s == sides));
        }
        let config = SkyConfig::from_json(r#"{ "grid": { "ground_sides": 3 } }"#, "inline").unwrap();
        assert_eq!(config.grid.ground_sides, 3);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SkyConfig::from_json("{ view: ", "inline"),
            Err(ConfigError::Parse { .. })
        ));
    }
}

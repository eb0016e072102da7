use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Generation parameters for a [`World`](crate::World).
///
/// Missing JSON fields fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub road_width: f64,
    pub road_roundness: u32,
    /// Roundness of the wide envelopes used as building and lane guides.
    /// Kept high so no guide edge is longer than a building.
    pub guide_roundness: u32,
    /// Depth of a building, perpendicular to the road.
    pub building_width: f64,
    /// Minimum building length, parallel to the road.
    pub building_min_length: f64,
    pub building_spacing: f64,
    pub building_height: f64,
    pub building_roof_height: f64,
    pub tree_radius: f64,
    pub tree_height: f64,
    /// Scales how many consecutive rejections end tree placement.
    pub tree_density_scale: f64,
    pub trees_enabled: bool,
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            road_width: 100.0,
            road_roundness: 30,
            guide_roundness: 20,
            building_width: 150.0,
            building_min_length: 150.0,
            building_spacing: 100.0,
            building_height: 0.1,
            building_roof_height: 0.05,
            tree_radius: 100.0,
            tree_height: 0.15,
            tree_density_scale: 0.3,
            trees_enabled: true,
            seed: 0,
        }
    }
}

impl WorldConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: WorldConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("road_width", self.road_width)?;
        positive("building_width", self.building_width)?;
        positive("building_min_length", self.building_min_length)?;
        positive("tree_radius", self.tree_radius)?;
        positive("tree_density_scale", self.tree_density_scale)?;
        non_negative("building_spacing", self.building_spacing)?;
        non_negative("building_height", self.building_height)?;
        non_negative("building_roof_height", self.building_roof_height)?;
        non_negative("tree_height", self.tree_height)?;
        if self.road_roundness == 0 {
            return Err(ConfigError::Zero { param: "road_roundness" });
        }
        if self.guide_roundness == 0 {
            return Err(ConfigError::Zero { param: "guide_roundness" });
        }
        Ok(())
    }

    /// Consecutive rejected samples after which tree placement stops.
    pub fn tree_attempt_limit(&self) -> u32 {
        ((100.0 * self.tree_density_scale).round() as u32).max(1)
    }
}

fn positive(param: &'static str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 { Ok(()) } else { Err(ConfigError::NotPositive { param, got: v }) }
}

fn non_negative(param: &'static str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() && v >= 0.0 { Ok(()) } else { Err(ConfigError::NotPositive { param, got: v }) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = WorldConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.tree_attempt_limit(), 30);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg = WorldConfig::from_json_str(r#"{"road_width": 60, "seed": 7}"#).unwrap();
        assert_eq!(cfg.road_width, 60.0);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.road_roundness, 30);
    }

    #[test]
    fn degenerate_values_are_rejected() {
        let cfg = WorldConfig { road_width: 0.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::NotPositive { param: "road_width", .. })));
        let cfg = WorldConfig { road_roundness: 0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Zero { param: "road_roundness" })));
        assert!(matches!(WorldConfig::from_json_str("{"), Err(ConfigError::Json(_))));
    }
}

use serde::{Deserialize, Serialize};

use crate::systems::forces::DEFAULT_GRAVITY_MIN_DISTANCE;

use super::Scene;

/// Scene configuration, loadable from JSON.
///
/// Missing fields fall back to their defaults:
/// ```json
/// { "gravity_min_distance": 5.0, "max_tick_dt": 0.05, "stats_enabled": false }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Gravity bindings created by the scene skip pairs closer than this.
    pub gravity_min_distance: f64,
    /// Upper bound on a single tick's `dt`; `None` trusts the host loop.
    pub max_tick_dt: Option<f64>,
    pub stats_enabled: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            gravity_min_distance: DEFAULT_GRAVITY_MIN_DISTANCE,
            max_tick_dt: None,
            stats_enabled: false,
        }
    }
}

impl SceneSettings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: SceneSettings = serde_json::from_str(json).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.gravity_min_distance >= 0.0 && self.gravity_min_distance.is_finite()) {
            return Err(format!(
                "gravity_min_distance must be a finite value >= 0, got {}",
                self.gravity_min_distance
            ));
        }
        if let Some(max_dt) = self.max_tick_dt {
            if !(max_dt > 0.0 && max_dt.is_finite()) {
                return Err(format!("max_tick_dt must be a finite value > 0, got {max_dt}"));
            }
        }
        Ok(())
    }
}

pub(super) fn set_settings<T>(scene: &mut Scene<T>, settings: SceneSettings) {
    log::debug!("scene settings: {:?}", settings);
    if !settings.stats_enabled {
        scene.stats.reset();
    }
    scene.settings = settings;
}

pub(super) fn enable_stats<T>(scene: &mut Scene<T>, enabled: bool) {
    scene.settings.stats_enabled = enabled;
    if !enabled {
        scene.stats.reset();
    }
}

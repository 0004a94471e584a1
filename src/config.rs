use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{Coordinate, MapBounds};

// Gameplay defaults; every one can be overridden from the page's config blob.

pub const DEFAULT_TOTAL_ROUNDS: usize = 5;
pub const DEFAULT_ROUND_DURATION_MS: u32 = 12_000;
pub const DEFAULT_REVEAL_DELAY_MS: u32 = 1_000;
pub const MAX_REVEAL_DELAY_MS: u32 = 60_000;
pub const MAX_POINTS: u32 = 1_000;
/// Degrees → approximate metres inside the playable area.
pub const DISTANCE_SCALE: f64 = 100_000.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub max_points: u32,
    pub distance_scale: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { max_points: MAX_POINTS, distance_scale: DISTANCE_SCALE }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: Coordinate,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_snap: f64,
    pub bounds: MapBounds,
    pub tile_url: String,
    pub attribution: String,
    /// Icon for the true location; `None` uses Leaflet's default marker.
    pub truth_icon_url: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: Coordinate::new(42.3744, -71.1167),
            zoom: 16.0,
            min_zoom: 14.5,
            max_zoom: 21.0,
            zoom_snap: 0.25,
            bounds: MapBounds {
                south_west: Coordinate::new(42.3606, -71.1404),
                north_east: Coordinate::new(42.3873, -71.0975),
            },
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>"
                .to_string(),
            truth_icon_url: Some("static/marker.svg".to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub total_rounds: usize,
    pub round_duration_ms: u32,
    pub reveal_delay_ms: u32,
    pub scoring: ScoringConfig,
    pub map: MapConfig,
    pub photo_url_template: String,
    /// `None` hides the upload button (e.g. anonymous players).
    pub upload_url: Option<String>,
    pub leaderboard_url: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            round_duration_ms: DEFAULT_ROUND_DURATION_MS,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            scoring: ScoringConfig::default(),
            map: MapConfig::default(),
            photo_url_template: "static/photos/{id}.jpg".to_string(),
            upload_url: Some("/upload".to_string()),
            leaderboard_url: None,
        }
    }
}

impl GameConfig {
    /// Parses a (possibly partial) JSON override; missing fields keep defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_rounds == 0 {
            return Err(ConfigError::Invalid("total_rounds must be at least 1"));
        }
        // The tick interval is duration / 1000 ms, so shorter rounds would tick every 0 ms.
        if self.round_duration_ms < 1000 {
            return Err(ConfigError::Invalid("round_duration_ms must be at least 1000"));
        }
        if self.scoring.max_points == 0 || !(self.scoring.distance_scale > 0.0) {
            return Err(ConfigError::Invalid("scoring values must be positive"));
        }
        if self.reveal_delay_ms > MAX_REVEAL_DELAY_MS {
            return Err(ConfigError::Invalid("reveal_delay_ms must be at most 60000"));
        }
        if !self.map.bounds.is_well_formed() {
            return Err(ConfigError::Invalid("map bounds must be south-west below north-east"));
        }
        Ok(())
    }

    /// Reveal delay as a `setTimeout` argument.
    pub fn reveal_delay_millis(&self) -> i32 {
        i32::try_from(self.reveal_delay_ms.min(MAX_REVEAL_DELAY_MS)).unwrap_or(i32::MAX)
    }

    /// Reads the `game-config` script element; falls back to defaults on any problem.
    pub fn load_from_page() -> Self {
        let Some(raw) = crate::feed::read_script_json("game-config") else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                crate::util::cwarn(&format!("ignoring game config: {}", e));
                Self::default()
            }
        }
    }
}

//! Distance-based scoring.
//!
//! Distances are measured as a planar Euclidean distance in latitude/longitude
//! degree space, multiplied by a fixed scale to approximate metres. This is a
//! flat-earth approximation: it only holds because the playable area is a
//! couple of kilometres across. It is not a geodesic formula and should not
//! be reused for larger regions.

use crate::config::ScoringConfig;
use crate::model::Coordinate;

/// Approximate distance in "metres" between two coordinates, or `None` if
/// either one is not a finite coordinate.
pub fn planar_distance(a: Coordinate, b: Coordinate, scale: f64) -> Option<f64> {
    if !a.is_valid() || !b.is_valid() {
        return None;
    }
    let d_lat = (a.lat - b.lat).abs();
    let d_lng = (a.lng - b.lng).abs();
    let d = scale * (d_lat * d_lat + d_lng * d_lng).sqrt();
    d.is_finite().then_some(d)
}

/// Points for a guess: `max(0, round(max_points - distance))`, and 0 for a
/// missing or unusable guess.
pub fn score(guess: Option<Coordinate>, truth: Coordinate, cfg: &ScoringConfig) -> u32 {
    let Some(guess) = guess else { return 0 };
    let Some(distance) = planar_distance(guess, truth, cfg.distance_scale) else {
        return 0;
    };
    let points = (cfg.max_points as f64 - distance).round();
    if points.is_nan() || points <= 0.0 {
        0
    } else {
        (points as u32).min(cfg.max_points)
    }
}

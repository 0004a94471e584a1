//! Commands the round machine issues to whatever draws the game.
//!
//! The browser build renders a [`ViewModel`] with Yew components and mirrors
//! its markers onto the Leaflet map; tests record the calls instead.

use crate::model::Coordinate;

pub trait Presenter {
    fn place_guess_marker(&mut self, at: Coordinate);
    fn place_truth_marker(&mut self, at: Coordinate);
    fn clear_markers(&mut self);
    /// `delta` is `None` while a round is in progress (no points yet).
    fn set_scoreboard_text(&mut self, round: usize, delta: Option<u32>, cumulative: u32, maximum: u32);
    fn set_photo(&mut self, photo_id: &str);
    fn set_timer_width(&mut self, percent: f64);
    fn set_button_label(&mut self, text: &str);
    fn set_button_enabled(&mut self, enabled: bool);
    fn show_end_screen(&mut self, cumulative: u32, maximum: u32);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerKind {
    Guess,
    Truth,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub at: Coordinate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scoreboard {
    pub round: usize,
    pub delta: Option<u32>,
    pub cumulative: u32,
    pub maximum: u32,
}

/// Everything the page shows, rebuilt by presenter calls and rendered declaratively.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub markers: Vec<Marker>,
    /// Bumped whenever the marker set changes so the map can resync cheaply.
    pub markers_rev: u64,
    pub scoreboard: Scoreboard,
    pub photo_id: Option<String>,
    pub timer_width: f64,
    pub button_label: String,
    pub button_enabled: bool,
    pub end_screen: Option<(u32, u32)>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            markers_rev: 0,
            scoreboard: Scoreboard { round: 1, delta: None, cumulative: 0, maximum: 0 },
            photo_id: None,
            timer_width: 100.0,
            button_label: "Make a Guess!".to_string(),
            button_enabled: false,
            end_screen: None,
        }
    }
}

impl ViewModel {
    fn push_marker(&mut self, kind: MarkerKind, at: Coordinate) {
        self.markers.push(Marker { kind, at });
        self.markers_rev += 1;
    }
}

impl Presenter for ViewModel {
    fn place_guess_marker(&mut self, at: Coordinate) {
        self.push_marker(MarkerKind::Guess, at);
    }

    fn place_truth_marker(&mut self, at: Coordinate) {
        self.push_marker(MarkerKind::Truth, at);
    }

    fn clear_markers(&mut self) {
        if !self.markers.is_empty() {
            self.markers.clear();
            self.markers_rev += 1;
        }
    }

    fn set_scoreboard_text(&mut self, round: usize, delta: Option<u32>, cumulative: u32, maximum: u32) {
        self.scoreboard = Scoreboard { round, delta, cumulative, maximum };
    }

    fn set_photo(&mut self, photo_id: &str) {
        self.photo_id = Some(photo_id.to_string());
    }

    fn set_timer_width(&mut self, percent: f64) {
        self.timer_width = percent.clamp(0.0, 100.0);
    }

    fn set_button_label(&mut self, text: &str) {
        self.button_label = text.to_string();
    }

    fn set_button_enabled(&mut self, enabled: bool) {
        self.button_enabled = enabled;
    }

    fn show_end_screen(&mut self, cumulative: u32, maximum: u32) {
        self.end_screen = Some((cumulative, maximum));
    }
}

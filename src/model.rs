//! Core data models for Campus Guessr: coordinates, rounds, the photo
//! catalog records, and the reducer that drives the whole game from Yew.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use crate::config::GameConfig;
use crate::presenter::ViewModel;
use crate::state::{EndTrigger, RoundMachine};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl MapBounds {
    pub fn is_well_formed(&self) -> bool {
        self.south_west.is_valid()
            && self.north_east.is_valid()
            && self.south_west.lat < self.north_east.lat
            && self.south_west.lng < self.north_east.lng
    }
}

/// One entry of the photo catalog embedded in the page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    #[serde(rename = "selectedPhoto", deserialize_with = "photo_id_from_any")]
    pub photo_id: String,
    #[serde(rename = "realLat")]
    pub lat: f64,
    #[serde(rename = "realLng")]
    pub lng: f64,
}

impl PhotoRecord {
    pub fn truth(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

// Catalogs exported from the photo table use integer ids; hand-written ones use strings.
fn photo_id_from_any<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("unsupported photo id {}", other))),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    /// 1-based.
    pub index: usize,
    pub truth: Coordinate,
    pub photo_id: String,
    /// Latest click while the round accepted guesses.
    pub guess: Option<Coordinate>,
    /// Written exactly once, when the round ends.
    pub score: Option<u32>,
}

impl Round {
    pub fn new(index: usize, record: &PhotoRecord) -> Self {
        Self {
            index,
            truth: record.truth(),
            photo_id: record.photo_id.clone(),
            guess: None,
            score: None,
        }
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum GameAction {
    MapClick(Coordinate),
    Submit,
    NextRound,
    /// Photo for the pending round is loaded and the reveal delay has passed.
    RoundReady,
    /// Interval tick scheduled for the given countdown generation.
    TimerTick { generation: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub machine: RoundMachine,
    pub view: ViewModel,
}

impl GameState {
    pub fn new(config: GameConfig, rounds: Vec<Round>) -> Self {
        let mut view = ViewModel::default();
        let machine = RoundMachine::new(&config, rounds, &mut view);
        Self { machine, view }
    }
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GameAction::*;
        let mut new = (*self).clone();
        let changed = match action {
            MapClick(c) => new.machine.on_map_click(c, &mut new.view),
            Submit => new.machine.end_round(EndTrigger::Submit, &mut new.view),
            NextRound => new.machine.begin_round(&mut new.view),
            RoundReady => new.machine.open_round(&mut new.view),
            TimerTick { generation } => new.machine.tick(generation, &mut new.view),
        };
        if changed { Rc::new(new) } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, lat: f64, lng: f64) -> PhotoRecord {
        PhotoRecord { photo_id: id.to_string(), lat, lng }
    }

    #[test]
    fn coordinate_validity() {
        assert!(Coordinate::new(42.3744, -71.1167).is_valid());
        assert!(!Coordinate::new(f64::NAN, -71.1167).is_valid());
        assert!(!Coordinate::new(42.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn bounds_must_be_ordered() {
        let b = GameConfig::default().map.bounds;
        assert!(b.is_well_formed());
        let flipped = MapBounds { south_west: b.north_east, north_east: b.south_west };
        assert!(!flipped.is_well_formed());
    }

    #[test]
    fn photo_record_accepts_numeric_and_string_ids() {
        let recs: Vec<PhotoRecord> = serde_json::from_str(
            r#"[{"selectedPhoto": 12, "realLat": 42.37, "realLng": -71.11},
                {"selectedPhoto": "yard", "realLat": 42.38, "realLng": -71.12}]"#,
        )
        .unwrap();
        assert_eq!(recs[0].photo_id, "12");
        assert_eq!(recs[1].photo_id, "yard");
        assert_eq!(recs[1].truth(), Coordinate::new(42.38, -71.12));
    }

    #[test]
    fn reducer_runs_a_round_and_ignores_stale_actions() {
        let rounds = vec![Round::new(1, &record("1", 42.3744, -71.1167))];
        let state = Rc::new(GameState::new(GameConfig::default(), rounds));

        // Submit before the round opened is ignored and returns the same Rc.
        let same = state.clone().reduce(GameAction::Submit);
        assert!(Rc::ptr_eq(&same, &state));

        let state = state.reduce(GameAction::RoundReady);
        let state = state.reduce(GameAction::MapClick(Coordinate::new(42.3744, -71.1167)));
        let state = state.reduce(GameAction::Submit);
        assert_eq!(state.machine.session().cumulative(), 1000);

        let again = state.clone().reduce(GameAction::Submit);
        assert!(Rc::ptr_eq(&again, &state));

        let done = state.reduce(GameAction::NextRound);
        assert!(done.machine.is_game_over());
        assert_eq!(done.view.end_screen, Some((1000, 1000)));
    }
}

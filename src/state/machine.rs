use crate::config::{GameConfig, ScoringConfig};
use crate::model::{Coordinate, Round};
use crate::presenter::Presenter;
use crate::scoring;
use crate::state::countdown::{Countdown, TickOutcome};
use crate::state::session::GameSession;
use crate::util::{clog, cerror};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Next photo is loading; no guesses, no timer.
    Transitioning,
    AwaitingGuess,
    /// Score computed and truth revealed; waiting for "Next Round" / "Results".
    Scored,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndTrigger {
    Submit,
    TimerExpired,
}

/// Round lifecycle. Every handler checks the phase first and reports whether it changed anything.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundMachine {
    phase: Phase,
    session: GameSession,
    countdown: Countdown,
    scoring: ScoringConfig,
}

impl RoundMachine {
    pub fn new(config: &GameConfig, rounds: Vec<Round>, p: &mut impl Presenter) -> Self {
        let mut machine = Self {
            phase: Phase::Transitioning,
            session: GameSession::new(rounds, config.scoring.max_points),
            countdown: Countdown::new(config.round_duration_ms),
            scoring: config.scoring.clone(),
        };
        match machine.session.current_round() {
            Some(first) => {
                let photo = first.photo_id.clone();
                p.clear_markers();
                p.set_scoreboard_text(1, None, 0, 0);
                p.set_photo(&photo);
                p.set_timer_width(100.0);
                p.set_button_label("Make a Guess!");
                p.set_button_enabled(false);
            }
            None => {
                machine.phase = Phase::GameOver;
                p.show_end_screen(0, 0);
            }
        }
        machine
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn accepting_guesses(&self) -> bool {
        self.phase == Phase::AwaitingGuess
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Opens the pending round once its photo is on screen.
    pub fn open_round(&mut self, p: &mut impl Presenter) -> bool {
        if self.phase != Phase::Transitioning {
            return false;
        }
        let generation = self.countdown.start();
        p.set_timer_width(100.0);
        self.phase = Phase::AwaitingGuess;
        clog(&format!(
            "round {} open (timer generation {})",
            self.session.current_index(),
            generation
        ));
        true
    }

    pub fn on_map_click(&mut self, at: Coordinate, p: &mut impl Presenter) -> bool {
        if self.phase != Phase::AwaitingGuess {
            return false;
        }
        if let Err(e) = self.session.set_guess(at) {
            cerror(&format!("guess dropped: {}", e));
            return false;
        }
        p.clear_markers();
        if at.is_valid() {
            p.place_guess_marker(at);
        }
        p.set_button_label("Submit!");
        p.set_button_enabled(true);
        true
    }

    pub fn end_round(&mut self, trigger: EndTrigger, p: &mut impl Presenter) -> bool {
        if self.phase != Phase::AwaitingGuess {
            clog(&format!("end of round ignored ({:?} while {:?})", trigger, self.phase));
            return false;
        }
        self.countdown.stop();
        let Some(round) = self.session.current_round() else {
            return false;
        };
        let (index, guess, truth) = (round.index, round.guess, round.truth);
        let points = scoring::score(guess, truth, &self.scoring);
        if let Err(e) = self.session.record_round_score(points) {
            cerror(&format!("round {} not recorded: {}", index, e));
        }
        if truth.is_valid() {
            p.place_truth_marker(truth);
        }
        if trigger == EndTrigger::TimerExpired {
            p.set_timer_width(0.0);
        }
        p.set_scoreboard_text(
            index,
            Some(points),
            self.session.cumulative(),
            self.session.maximum(),
        );
        p.set_button_label(if self.session.is_last_round() { "Results" } else { "Next Round" });
        p.set_button_enabled(true);
        self.phase = Phase::Scored;
        clog(&format!(
            "round {} ended by {:?}: +{} ({})",
            index,
            trigger,
            points,
            self.session.final_display()
        ));
        true
    }

    pub fn begin_round(&mut self, p: &mut impl Presenter) -> bool {
        if self.phase != Phase::Scored {
            return false;
        }
        let last = self.session.is_last_round();
        if let Err(e) = self.session.advance() {
            cerror(&format!("cannot advance: {}", e));
            return false;
        }
        if last {
            self.phase = Phase::GameOver;
            p.set_button_enabled(false);
            p.show_end_screen(self.session.cumulative(), self.session.maximum());
            clog(&format!("game over: {}", self.session.final_display()));
            return true;
        }
        let Some(next) = self.session.current_round() else {
            return false;
        };
        let (index, photo) = (next.index, next.photo_id.clone());
        p.clear_markers();
        p.set_scoreboard_text(index, None, self.session.cumulative(), self.session.maximum());
        p.set_photo(&photo);
        p.set_button_label("Make a Guess!");
        p.set_button_enabled(false);
        self.phase = Phase::Transitioning;
        clog(&format!("round {} loading photo {}", index, photo));
        true
    }

    /// Interval tick for `generation`; ticks of superseded timers are dropped.
    pub fn tick(&mut self, generation: u64, p: &mut impl Presenter) -> bool {
        if generation != self.countdown.generation {
            return false;
        }
        match self.countdown.tick() {
            TickOutcome::Idle => false,
            TickOutcome::Running(remaining) => {
                p.set_timer_width(remaining);
                true
            }
            TickOutcome::Cancelled => {
                p.set_timer_width(0.0);
                true
            }
            TickOutcome::Expired => {
                self.end_round(EndTrigger::TimerExpired, p);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PhotoRecord;

    #[derive(Debug, Clone, PartialEq)]
    enum Cmd {
        Guess(Coordinate),
        Truth(Coordinate),
        Clear,
        Board(usize, Option<u32>, u32, u32),
        Photo(String),
        Width(f64),
        Label(String),
        Enabled(bool),
        End(u32, u32),
    }

    #[derive(Default)]
    struct Recorder(Vec<Cmd>);

    impl Recorder {
        fn take(&mut self) -> Vec<Cmd> {
            std::mem::take(&mut self.0)
        }

        fn widths(&self) -> usize {
            self.0.iter().filter(|c| matches!(c, Cmd::Width(_))).count()
        }
    }

    impl Presenter for Recorder {
        fn place_guess_marker(&mut self, at: Coordinate) {
            self.0.push(Cmd::Guess(at));
        }
        fn place_truth_marker(&mut self, at: Coordinate) {
            self.0.push(Cmd::Truth(at));
        }
        fn clear_markers(&mut self) {
            self.0.push(Cmd::Clear);
        }
        fn set_scoreboard_text(&mut self, round: usize, delta: Option<u32>, cumulative: u32, maximum: u32) {
            self.0.push(Cmd::Board(round, delta, cumulative, maximum));
        }
        fn set_photo(&mut self, photo_id: &str) {
            self.0.push(Cmd::Photo(photo_id.to_string()));
        }
        fn set_timer_width(&mut self, percent: f64) {
            self.0.push(Cmd::Width(percent));
        }
        fn set_button_label(&mut self, text: &str) {
            self.0.push(Cmd::Label(text.to_string()));
        }
        fn set_button_enabled(&mut self, enabled: bool) {
            self.0.push(Cmd::Enabled(enabled));
        }
        fn show_end_screen(&mut self, cumulative: u32, maximum: u32) {
            self.0.push(Cmd::End(cumulative, maximum));
        }
    }

    const YARD: Coordinate = Coordinate::new(42.3744, -71.1167);

    fn rounds(truths: &[Coordinate]) -> Vec<Round> {
        truths
            .iter()
            .enumerate()
            .map(|(i, t)| {
                Round::new(
                    i + 1,
                    &PhotoRecord { photo_id: format!("{}", i + 10), lat: t.lat, lng: t.lng },
                )
            })
            .collect()
    }

    fn machine(truths: &[Coordinate]) -> (RoundMachine, Recorder) {
        let mut rec = Recorder::default();
        let m = RoundMachine::new(&GameConfig::default(), rounds(truths), &mut rec);
        (m, rec)
    }

    fn run_timer_out(m: &mut RoundMachine, p: &mut Recorder) {
        let g = m.countdown().generation;
        for _ in 0..2000 {
            if !m.tick(g, p) {
                break;
            }
        }
    }

    #[test]
    fn first_round_is_presented_then_opened() {
        let (mut m, mut rec) = machine(&[YARD]);
        assert_eq!(m.phase(), Phase::Transitioning);
        assert_eq!(
            rec.take(),
            vec![
                Cmd::Clear,
                Cmd::Board(1, None, 0, 0),
                Cmd::Photo("10".into()),
                Cmd::Width(100.0),
                Cmd::Label("Make a Guess!".into()),
                Cmd::Enabled(false),
            ]
        );
        // No clicks or submits before the photo is up.
        assert!(!m.on_map_click(YARD, &mut rec));
        assert!(!m.end_round(EndTrigger::Submit, &mut rec));
        assert!(rec.take().is_empty());

        assert!(m.open_round(&mut rec));
        assert_eq!(m.phase(), Phase::AwaitingGuess);
        assert!(m.countdown().active);
        assert!(!m.open_round(&mut rec));
    }

    #[test]
    fn exact_guess_scores_full_marks() {
        let (mut m, mut rec) = machine(&[YARD, YARD]);
        m.open_round(&mut rec);
        rec.take();
        assert!(m.on_map_click(YARD, &mut rec));
        assert_eq!(
            rec.take(),
            vec![Cmd::Clear, Cmd::Guess(YARD), Cmd::Label("Submit!".into()), Cmd::Enabled(true)]
        );
        assert!(m.end_round(EndTrigger::Submit, &mut rec));
        assert_eq!(
            rec.take(),
            vec![
                Cmd::Truth(YARD),
                Cmd::Board(1, Some(1000), 1000, 1000),
                Cmd::Label("Next Round".into()),
                Cmd::Enabled(true),
            ]
        );
        assert_eq!(m.phase(), Phase::Scored);
        assert_eq!(m.session().final_display(), "1000 / 1000");
    }

    #[test]
    fn later_clicks_overwrite_the_guess() {
        let (mut m, mut rec) = machine(&[YARD]);
        m.open_round(&mut rec);
        m.on_map_click(Coordinate::new(42.38, -71.10), &mut rec);
        m.on_map_click(YARD, &mut rec);
        m.end_round(EndTrigger::Submit, &mut rec);
        assert_eq!(m.session().rounds()[0].guess, Some(YARD));
        assert_eq!(m.session().cumulative(), 1000);
    }

    #[test]
    fn double_submit_scores_once() {
        let (mut m, mut rec) = machine(&[YARD, YARD]);
        m.open_round(&mut rec);
        m.on_map_click(YARD, &mut rec);
        assert!(m.end_round(EndTrigger::Submit, &mut rec));
        assert!(!m.end_round(EndTrigger::Submit, &mut rec));
        assert_eq!(m.session().cumulative(), 1000);
        assert_eq!(m.session().maximum(), 1000);
    }

    #[test]
    fn submit_then_timer_does_not_double_fire() {
        let (mut m, mut rec) = machine(&[YARD, YARD]);
        m.open_round(&mut rec);
        let g = m.countdown().generation;
        for _ in 0..10 {
            m.tick(g, &mut rec);
        }
        m.end_round(EndTrigger::Submit, &mut rec);
        assert!(!m.countdown().active);
        rec.take();
        // The interval's next tick winds the bar down without ending the round again.
        assert!(m.tick(g, &mut rec));
        assert_eq!(rec.take(), vec![Cmd::Width(0.0)]);
        assert!(!m.tick(g, &mut rec));
        assert_eq!(m.session().maximum(), 1000);
        assert_eq!(m.phase(), Phase::Scored);
    }

    #[test]
    fn timer_expiry_without_click_scores_zero() {
        let (mut m, mut rec) = machine(&[YARD, YARD]);
        m.open_round(&mut rec);
        rec.take();
        run_timer_out(&mut m, &mut rec);
        assert_eq!(rec.widths(), 1000);
        assert_eq!(m.phase(), Phase::Scored);
        assert_eq!(m.session().cumulative(), 0);
        assert_eq!(m.session().maximum(), 1000);
        let cmds = rec.take();
        assert!(cmds.contains(&Cmd::Truth(YARD)));
        assert!(cmds.contains(&Cmd::Board(1, Some(0), 0, 1000)));
        assert_eq!(cmds.last(), Some(&Cmd::Enabled(true)));
        // A late manual submit changes nothing.
        assert!(!m.end_round(EndTrigger::Submit, &mut rec));
        assert_eq!(m.session().maximum(), 1000);
    }

    #[test]
    fn timer_expiry_keeps_a_placed_guess() {
        let (mut m, mut rec) = machine(&[YARD]);
        m.open_round(&mut rec);
        m.on_map_click(Coordinate::new(YARD.lat + 0.005, YARD.lng), &mut rec);
        run_timer_out(&mut m, &mut rec);
        assert_eq!(m.session().cumulative(), 500);
    }

    #[test]
    fn submit_without_guess_scores_zero() {
        let (mut m, mut rec) = machine(&[YARD]);
        m.open_round(&mut rec);
        assert!(m.end_round(EndTrigger::Submit, &mut rec));
        assert_eq!(m.session().rounds()[0].score, Some(0));
        assert_eq!(m.session().final_display(), "0 / 1000");
    }

    #[test]
    fn invalid_click_is_recorded_but_scores_zero() {
        let (mut m, mut rec) = machine(&[YARD]);
        m.open_round(&mut rec);
        rec.take();
        let bad = Coordinate::new(f64::NAN, f64::NAN);
        assert!(m.on_map_click(bad, &mut rec));
        assert!(!rec.take().iter().any(|c| matches!(c, Cmd::Guess(_))));
        m.end_round(EndTrigger::Submit, &mut rec);
        assert_eq!(m.session().cumulative(), 0);
    }

    #[test]
    fn clicks_after_scoring_are_ignored() {
        let (mut m, mut rec) = machine(&[YARD, YARD]);
        m.open_round(&mut rec);
        m.end_round(EndTrigger::Submit, &mut rec);
        rec.take();
        assert!(!m.on_map_click(YARD, &mut rec));
        assert!(rec.take().is_empty());
        assert_eq!(m.session().rounds()[0].guess, None);
    }

    #[test]
    fn next_round_presents_the_next_photo() {
        let (mut m, mut rec) = machine(&[YARD, YARD]);
        assert!(!m.begin_round(&mut rec));
        m.open_round(&mut rec);
        m.on_map_click(YARD, &mut rec);
        m.end_round(EndTrigger::Submit, &mut rec);
        rec.take();
        assert!(m.begin_round(&mut rec));
        assert_eq!(
            rec.take(),
            vec![
                Cmd::Clear,
                Cmd::Board(2, None, 1000, 1000),
                Cmd::Photo("11".into()),
                Cmd::Label("Make a Guess!".into()),
                Cmd::Enabled(false),
            ]
        );
        assert_eq!(m.phase(), Phase::Transitioning);
        assert_eq!(m.session().current_index(), 2);
        assert!(!m.begin_round(&mut rec));
        assert_eq!(m.session().current_index(), 2);
    }

    #[test]
    fn stale_timer_ticks_are_dropped_after_restart() {
        let (mut m, mut rec) = machine(&[YARD, YARD]);
        m.open_round(&mut rec);
        let old = m.countdown().generation;
        m.end_round(EndTrigger::Submit, &mut rec);
        m.begin_round(&mut rec);
        m.open_round(&mut rec);
        let fresh = m.countdown().generation;
        assert_ne!(old, fresh);
        for _ in 0..2000 {
            assert!(!m.tick(old, &mut rec));
        }
        assert_eq!(m.phase(), Phase::AwaitingGuess);
        assert!((m.countdown().remaining - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn three_round_game_reports_final_tally() {
        let truths = [YARD, YARD, YARD];
        let (mut m, mut rec) = machine(&truths);
        let guesses = [
            Some(YARD),
            Some(Coordinate::new(YARD.lat + 0.005, YARD.lng)),
            None,
        ];
        for (i, guess) in guesses.into_iter().enumerate() {
            assert!(m.open_round(&mut rec));
            if let Some(g) = guess {
                m.on_map_click(g, &mut rec);
                m.end_round(EndTrigger::Submit, &mut rec);
            } else {
                run_timer_out(&mut m, &mut rec);
            }
            assert_eq!(m.session().maximum(), 1000 * (i as u32 + 1));
            let expected = if i == 2 { "Results" } else { "Next Round" };
            assert!(rec.take().contains(&Cmd::Label(expected.into())));
            assert!(m.begin_round(&mut rec));
        }
        assert!(m.is_game_over());
        assert!(m.session().is_complete());
        assert_eq!(rec.take(), vec![Cmd::Enabled(false), Cmd::End(1500, 3000)]);
        assert_eq!(m.session().final_display(), "1500 / 3000");
        let scores: Vec<_> = m.session().rounds().iter().map(|r| r.score.unwrap()).collect();
        assert_eq!(scores, vec![1000, 500, 0]);

        // Terminal: nothing moves any more.
        assert!(!m.open_round(&mut rec));
        assert!(!m.on_map_click(YARD, &mut rec));
        assert!(!m.end_round(EndTrigger::TimerExpired, &mut rec));
        assert!(!m.begin_round(&mut rec));
        assert!(rec.take().is_empty());
    }

    #[test]
    fn timer_activity_matches_phase() {
        let (mut m, mut rec) = machine(&[YARD, YARD]);
        let check = |m: &RoundMachine| {
            if m.phase() != Phase::Transitioning {
                assert_eq!(m.countdown().active, m.accepting_guesses());
            }
        };
        check(&m);
        m.open_round(&mut rec);
        check(&m);
        m.on_map_click(YARD, &mut rec);
        check(&m);
        m.end_round(EndTrigger::Submit, &mut rec);
        check(&m);
        m.begin_round(&mut rec);
        m.open_round(&mut rec);
        check(&m);
        run_timer_out(&mut m, &mut rec);
        check(&m);
    }

    #[test]
    fn empty_session_ends_immediately() {
        let mut rec = Recorder::default();
        let m = RoundMachine::new(&GameConfig::default(), Vec::new(), &mut rec);
        assert!(m.is_game_over());
        assert_eq!(rec.take(), vec![Cmd::End(0, 0)]);
    }
}

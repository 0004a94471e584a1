use crate::error::SessionError;
use crate::model::{Coordinate, Round};
use crate::util::format_tally;

/// Rounds of one game plus the running tally.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    rounds: Vec<Round>,
    cumulative: u32,
    maximum: u32,
    max_points: u32,
    /// 1-based; `rounds.len() + 1` once the game is over.
    current: usize,
}

impl GameSession {
    pub fn new(rounds: Vec<Round>, max_points: u32) -> Self {
        Self { rounds, cumulative: 0, maximum: 0, max_points, current: 1 }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn cumulative(&self) -> u32 {
        self.cumulative
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn is_complete(&self) -> bool {
        self.current > self.rounds.len()
    }

    pub fn is_last_round(&self) -> bool {
        self.current == self.rounds.len()
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.get(self.current.checked_sub(1)?)
    }

    fn current_round_mut(&mut self) -> Result<&mut Round, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Complete);
        }
        let (index, total) = (self.current, self.rounds.len());
        match index.checked_sub(1) {
            Some(i) if i < total => Ok(&mut self.rounds[i]),
            _ => Err(SessionError::RoundOutOfRange { index, total }),
        }
    }

    pub fn set_guess(&mut self, guess: Coordinate) -> Result<(), SessionError> {
        self.current_round_mut()?.guess = Some(guess);
        Ok(())
    }

    pub fn record_round_score(&mut self, points: u32) -> Result<(), SessionError> {
        let round = self.current_round_mut()?;
        if round.score.is_some() {
            return Err(SessionError::AlreadyScored(round.index));
        }
        round.score = Some(points);
        self.cumulative = self.cumulative.saturating_add(points);
        self.maximum = self.maximum.saturating_add(self.max_points);
        Ok(())
    }

    /// Moves to the next round. Past the last round the session becomes complete.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Complete);
        }
        self.current += 1;
        Ok(())
    }

    pub fn final_display(&self) -> String {
        format_tally(self.cumulative, self.maximum)
    }
}

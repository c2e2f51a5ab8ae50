use crate::model::player::Team;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TRICKS_PER_HAND: u8 = 5;
pub const WINNING_SCORE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// Makers took three or four tricks.
    Made,
    /// One team took all five.
    March,
    /// Defenders took at least three.
    Euchre,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandOutcome {
    pub winner: Team,
    pub points: u32,
    pub kind: OutcomeKind,
    pub tricks: [u8; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    InvalidTrickTotal([u8; 2]),
    NoMaker,
    HandInProgress(u8),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::InvalidTrickTotal(tricks) => write!(
                f,
                "tricks won {tricks:?} do not add up to {TRICKS_PER_HAND}"
            ),
            ScoreError::NoMaker => write!(f, "hand finished without a trump maker"),
            ScoreError::HandInProgress(played) => {
                write!(f, "hand still in progress after {played} tricks")
            }
        }
    }
}

impl std::error::Error for ScoreError {}

impl HandOutcome {
    /// Maps a finished hand to the points it awards.
    pub fn resolve(tricks: [u8; 2], makers: Team) -> Result<Self, ScoreError> {
        if tricks[0].checked_add(tricks[1]) != Some(TRICKS_PER_HAND) {
            return Err(ScoreError::InvalidTrickTotal(tricks));
        }
        let winner = if tricks[Team::NorthSouth.index()] >= 3 {
            Team::NorthSouth
        } else {
            Team::EastWest
        };
        let (kind, points) = if tricks[winner.index()] == TRICKS_PER_HAND {
            (OutcomeKind::March, 2)
        } else if winner != makers {
            (OutcomeKind::Euchre, 2)
        } else {
            (OutcomeKind::Made, 1)
        };
        Ok(Self {
            winner,
            points,
            kind,
            tricks,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    totals: [u32; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 2] }
    }

    pub fn add_points(&mut self, team: Team, points: u32) {
        self.totals[team.index()] += points;
    }

    pub fn set_totals(&mut self, totals: [u32; 2]) {
        self.totals = totals;
    }

    pub fn score(&self, team: Team) -> u32 {
        self.totals[team.index()]
    }

    pub fn standings(&self) -> &[u32; 2] {
        &self.totals
    }

    pub fn apply_hand(&mut self, outcome: &HandOutcome) {
        self.add_points(outcome.winner, outcome.points);
    }

    pub fn winner(&self) -> Option<Team> {
        Team::BOTH
            .iter()
            .copied()
            .find(|team| self.score(*team) >= WINNING_SCORE)
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }
}

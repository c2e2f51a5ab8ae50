use crate::model::deck::{Deck, DeckError};
use crate::model::player::{Seat, Team};
use crate::model::round::{RoundPhase, RoundState};
use crate::model::score::{HandOutcome, ScoreBoard, ScoreError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

#[derive(Debug, Clone)]
pub struct MatchState {
    scores: ScoreBoard,
    current_round: RoundState,
    hand_number: u32,
    redeals: u32,
    last_outcome: Option<HandOutcome>,
    rng: StdRng,
    seed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    Deck(DeckError),
    Score(ScoreError),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Deck(err) => write!(f, "deal failed: {err}"),
            MatchError::Score(err) => write!(f, "scoring failed: {err}"),
        }
    }
}

impl std::error::Error for MatchError {}

impl From<DeckError> for MatchError {
    fn from(err: DeckError) -> Self {
        MatchError::Deck(err)
    }
}

impl From<ScoreError> for MatchError {
    fn from(err: ScoreError) -> Self {
        MatchError::Score(err)
    }
}

impl MatchState {
    pub fn new() -> Result<Self, MatchError> {
        let seed: u64 = rand::random();
        Self::with_seed(seed)
    }

    /// Picks the first dealer at random, then deals the first hand.
    pub fn with_seed(seed: u64) -> Result<Self, MatchError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let dealer = Seat::LOOP[rng.gen_range(0..Seat::LOOP.len())];
        Self::with_seed_and_dealer(seed, rng, dealer)
    }

    pub fn with_dealer(seed: u64, dealer: Seat) -> Result<Self, MatchError> {
        Self::with_seed_and_dealer(seed, StdRng::seed_from_u64(seed), dealer)
    }

    fn with_seed_and_dealer(seed: u64, mut rng: StdRng, dealer: Seat) -> Result<Self, MatchError> {
        let deck = Deck::shuffled(&mut rng);
        let current_round = RoundState::deal(deck, dealer)?;
        Ok(Self {
            scores: ScoreBoard::new(),
            current_round,
            hand_number: 1,
            redeals: 0,
            last_outcome: None,
            rng,
            seed,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    pub fn round(&self) -> &RoundState {
        &self.current_round
    }

    pub fn round_mut(&mut self) -> &mut RoundState {
        &mut self.current_round
    }

    /// Replaces the live round, e.g. with a hand-built one.
    pub fn set_round(&mut self, round: RoundState) {
        self.current_round = round;
    }

    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    pub fn redeals(&self) -> u32 {
        self.redeals
    }

    pub fn last_outcome(&self) -> Option<HandOutcome> {
        self.last_outcome
    }

    pub fn dealer(&self) -> Seat {
        self.current_round.dealer()
    }

    pub fn winner(&self) -> Option<Team> {
        self.scores.winner()
    }

    pub fn is_game_over(&self) -> bool {
        self.scores.is_game_over()
    }

    /// Rotates the dealer and deals from a freshly shuffled deck.
    pub fn deal_new_hand(&mut self) -> Result<(), DeckError> {
        let dealer = self.current_round.dealer().next();
        let deck = Deck::shuffled(&mut self.rng);
        self.current_round = RoundState::deal(deck, dealer)?;
        self.hand_number += 1;
        Ok(())
    }

    /// Throws in a hand nobody bid on.
    pub fn redeal(&mut self) -> Result<(), DeckError> {
        self.redeals += 1;
        self.deal_new_hand()
    }

    pub fn is_hand_ready_for_scoring(&self) -> bool {
        matches!(self.current_round.phase(), RoundPhase::Complete)
    }

    /// Scores the completed hand and deals the next one unless the game ended.
    pub fn finish_hand(&mut self) -> Result<HandOutcome, MatchError> {
        let outcome = self.current_round.outcome()?;
        self.scores.apply_hand(&outcome);
        self.last_outcome = Some(outcome);
        if !self.scores.is_game_over() {
            self.deal_new_hand()?;
        }
        Ok(outcome)
    }
}

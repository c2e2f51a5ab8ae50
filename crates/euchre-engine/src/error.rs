use euchre_core::bidding::BidError;
use euchre_core::game::match_state::MatchError;
use euchre_core::model::deck::DeckError;
use euchre_core::model::player::Seat;
use euchre_core::model::round::{DiscardError, PlayError};
use euchre_core::model::score::ScoreError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Bid(#[from] BidError),
    #[error(transparent)]
    Discard(#[from] DiscardError),
    #[error(transparent)]
    Play(#[from] PlayError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error("{seat} is the human seat and a decision must be supplied")]
    HumanDecisionRequired { seat: Seat },
    #[error("{seat} is a computer seat; a human decision cannot be supplied")]
    UnexpectedHumanDecision { seat: Seat },
    #[error("waiting on {expected}, not the human seat")]
    NotHumanTurn { expected: Seat },
    #[error("waiting on the human seat ({seat})")]
    NotComputerTurn { seat: Seat },
    #[error("heuristic produced no {action} for {seat}")]
    NoHeuristicChoice { seat: Seat, action: &'static str },
    #[error("the game is over")]
    GameOver,
}

pub type EngineResult<T> = Result<T, EngineError>;

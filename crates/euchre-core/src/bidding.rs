//! Two-round trump bidding.
//!
//! Round one offers the kitty suit: non-dealers may order it up, the dealer
//! may pick it up. Round two lets any seat name one of the other three
//! suits. If the dealer passes in round two the hand is thrown in.

use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiddingPhase {
    FirstRound,
    SecondRound,
    TrumpDecided,
    Redeal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BidChoice {
    Pass,
    OrderUp,
    PickUp,
    NameTrump(Suit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidError {
    OutOfTurn { expected: Seat, actual: Seat },
    BiddingClosed,
    IllegalChoice { phase: BiddingPhase, choice: BidChoice },
    KittySuitNotAllowed(Suit),
}

impl fmt::Display for BidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to bid but got {actual}")
            }
            BidError::BiddingClosed => write!(f, "bidding is already closed"),
            BidError::IllegalChoice { phase, choice } => {
                write!(f, "{choice:?} is not allowed in {phase:?}")
            }
            BidError::KittySuitNotAllowed(suit) => {
                write!(f, "{} was turned down and cannot be named", suit.name())
            }
        }
    }
}

impl std::error::Error for BidError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BidOutcome {
    pub seat: Seat,
    pub choice: BidChoice,
    pub phase: BiddingPhase,
    pub trump: Option<Suit>,
    pub maker: Option<Seat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bidding {
    kitty: Card,
    dealer: Seat,
    turn: Seat,
    phase: BiddingPhase,
    trump: Option<Suit>,
    maker: Option<Seat>,
    ordered_up: bool,
    picked_up: bool,
    decisions: u8,
}

impl Bidding {
    pub fn new(kitty: Card, dealer: Seat) -> Self {
        Self {
            kitty,
            dealer,
            turn: dealer.next(),
            phase: BiddingPhase::FirstRound,
            trump: None,
            maker: None,
            ordered_up: false,
            picked_up: false,
            decisions: 0,
        }
    }

    pub fn kitty(&self) -> Card {
        self.kitty
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn phase(&self) -> BiddingPhase {
        self.phase
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn maker(&self) -> Option<Seat> {
        self.maker
    }

    pub fn ordered_up(&self) -> bool {
        self.ordered_up
    }

    pub fn picked_up(&self) -> bool {
        self.picked_up
    }

    /// True once every seat has passed on the kitty suit.
    pub fn gone_once(&self) -> bool {
        !matches!(self.phase, BiddingPhase::FirstRound) && !self.accepted_kitty()
    }

    pub fn accepted_kitty(&self) -> bool {
        self.ordered_up || self.picked_up
    }

    pub fn decisions(&self) -> u8 {
        self.decisions
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self.phase,
            BiddingPhase::FirstRound | BiddingPhase::SecondRound
        )
    }

    /// Suit on offer in the current round, if there is a single one.
    pub fn candidate_trump(&self) -> Option<Suit> {
        match self.phase {
            BiddingPhase::FirstRound => Some(self.kitty.suit),
            _ => None,
        }
    }

    pub fn legal_choices(&self, seat: Seat) -> Vec<BidChoice> {
        match self.phase {
            BiddingPhase::FirstRound if seat == self.dealer => {
                vec![BidChoice::Pass, BidChoice::PickUp]
            }
            BiddingPhase::FirstRound => vec![BidChoice::Pass, BidChoice::OrderUp],
            BiddingPhase::SecondRound => std::iter::once(BidChoice::Pass)
                .chain(
                    Suit::ALL
                        .iter()
                        .copied()
                        .filter(|&suit| suit != self.kitty.suit)
                        .map(BidChoice::NameTrump),
                )
                .collect(),
            BiddingPhase::TrumpDecided | BiddingPhase::Redeal => Vec::new(),
        }
    }

    pub fn validate(&self, seat: Seat, choice: BidChoice) -> Result<(), BidError> {
        if !self.is_open() {
            return Err(BidError::BiddingClosed);
        }
        if seat != self.turn {
            return Err(BidError::OutOfTurn {
                expected: self.turn,
                actual: seat,
            });
        }
        let is_dealer = seat == self.dealer;
        let legal = match (self.phase, choice) {
            (_, BidChoice::Pass) => true,
            (BiddingPhase::FirstRound, BidChoice::OrderUp) => !is_dealer,
            (BiddingPhase::FirstRound, BidChoice::PickUp) => is_dealer,
            (BiddingPhase::SecondRound, BidChoice::NameTrump(suit)) => {
                if suit == self.kitty.suit {
                    return Err(BidError::KittySuitNotAllowed(suit));
                }
                true
            }
            _ => false,
        };
        if legal {
            Ok(())
        } else {
            Err(BidError::IllegalChoice {
                phase: self.phase,
                choice,
            })
        }
    }

    /// Applies one seat's decision. State is untouched on error.
    pub fn apply(&mut self, seat: Seat, choice: BidChoice) -> Result<BidOutcome, BidError> {
        self.validate(seat, choice)?;
        self.decisions += 1;

        match choice {
            BidChoice::Pass => {
                if seat == self.dealer {
                    self.phase = match self.phase {
                        BiddingPhase::FirstRound => BiddingPhase::SecondRound,
                        _ => BiddingPhase::Redeal,
                    };
                }
                self.turn = seat.next();
            }
            BidChoice::OrderUp => {
                self.ordered_up = true;
                self.decide(seat, self.kitty.suit);
            }
            BidChoice::PickUp => {
                self.picked_up = true;
                self.decide(seat, self.kitty.suit);
            }
            BidChoice::NameTrump(suit) => self.decide(seat, suit),
        }

        Ok(BidOutcome {
            seat,
            choice,
            phase: self.phase,
            trump: self.trump,
            maker: self.maker,
        })
    }

    fn decide(&mut self, seat: Seat, trump: Suit) {
        self.trump = Some(trump);
        self.maker = Some(seat);
        self.phase = BiddingPhase::TrumpDecided;
        self.turn = self.dealer.next();
    }
}

use crate::bidding::{BidChoice, BidError, BidOutcome, Bidding, BiddingPhase};
use crate::model::card::Card;
use crate::model::deck::{Deck, DeckError};
use crate::model::hand::Hand;
use crate::model::player::{Seat, Team};
use crate::model::score::{HandOutcome, ScoreError, TRICKS_PER_HAND};
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError};
use serde::{Deserialize, Serialize};
use std::{array, fmt};

pub const HAND_SIZE: usize = 5;

/// One hand of euchre: deal, bidding, the dealer's discard and five tricks.
#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; 4],
    stock: Vec<Card>,
    kitty: Card,
    dealer: Seat,
    bidding: Bidding,
    phase: RoundPhase,
    trump: Option<Suit>,
    turn: Seat,
    current_trick: Trick,
    trick_history: Vec<CompletedTrick>,
    tricks_won: [u8; 2],
    discarded: Option<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Bidding,
    Discarding,
    Playing,
    Complete,
    Redeal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTrick {
    pub trick: Trick,
    pub winner: Seat,
}

impl RoundState {
    /// Deals five cards to each seat in seat order, then turns the kitty.
    pub fn deal(mut deck: Deck, dealer: Seat) -> Result<Self, DeckError> {
        let mut hands: [Hand; 4] = array::from_fn(|_| Hand::new());
        for hand in hands.iter_mut() {
            for _ in 0..HAND_SIZE {
                hand.add(deck.deal()?);
            }
        }
        let kitty = deck.deal()?;
        let mut round = Self::from_parts(hands, kitty, dealer);
        round.stock = deck.cards().to_vec();
        Ok(round)
    }

    /// Builds a round at the start of bidding from explicit hands.
    pub fn from_parts(hands: [Hand; 4], kitty: Card, dealer: Seat) -> Self {
        Self {
            hands,
            stock: Vec::new(),
            kitty,
            dealer,
            bidding: Bidding::new(kitty, dealer),
            phase: RoundPhase::Bidding,
            trump: None,
            turn: dealer.next(),
            current_trick: Trick::new(),
            trick_history: Vec::new(),
            tricks_won: [0; 2],
            discarded: None,
        }
    }

    /// Builds a round already in play with `trump` named by `maker`.
    ///
    /// Bidding is replayed through the normal protocol, so the bidding record always
    /// agrees with the trump. The dealer keeps five cards; no kitty exchange happens.
    pub fn in_play(
        hands: [Hand; 4],
        kitty: Card,
        dealer: Seat,
        trump: Suit,
        maker: Seat,
    ) -> Result<Self, BidError> {
        let mut round = Self::from_parts(hands, kitty, dealer);
        let mut seat = round.bidding.turn();
        let choice = if trump == kitty.suit {
            if maker == dealer {
                BidChoice::PickUp
            } else {
                BidChoice::OrderUp
            }
        } else {
            // Walk into the second round so the suit can be named.
            while round.bidding.phase() == BiddingPhase::FirstRound {
                round.bidding.apply(seat, BidChoice::Pass)?;
                seat = seat.next();
            }
            BidChoice::NameTrump(trump)
        };
        while seat != maker {
            round.bidding.apply(seat, BidChoice::Pass)?;
            seat = seat.next();
        }
        round.bidding.apply(maker, choice)?;
        round.trump = Some(trump);
        round.phase = RoundPhase::Playing;
        round.turn = dealer.next();
        Ok(round)
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn stock(&self) -> &[Card] {
        &self.stock
    }

    pub fn kitty(&self) -> Card {
        self.kitty
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn bidding(&self) -> &Bidding {
        &self.bidding
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn maker(&self) -> Option<Seat> {
        self.bidding.maker()
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[CompletedTrick] {
        &self.trick_history
    }

    pub fn tricks_won(&self) -> [u8; 2] {
        self.tricks_won
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    pub fn discarded(&self) -> Option<Card> {
        self.discarded
    }

    pub fn bid(&mut self, seat: Seat, choice: BidChoice) -> Result<BidOutcome, BidError> {
        if self.phase != RoundPhase::Bidding {
            return Err(BidError::BiddingClosed);
        }
        let outcome = self.bidding.apply(seat, choice)?;
        match outcome.phase {
            BiddingPhase::TrumpDecided => {
                self.trump = outcome.trump;
                if self.bidding.accepted_kitty() {
                    self.hands[self.dealer.index()].add(self.kitty);
                    self.phase = RoundPhase::Discarding;
                    self.turn = self.dealer;
                } else {
                    self.phase = RoundPhase::Playing;
                    self.turn = self.dealer.next();
                }
            }
            BiddingPhase::Redeal => {
                self.phase = RoundPhase::Redeal;
                self.turn = self.bidding.turn();
            }
            BiddingPhase::FirstRound | BiddingPhase::SecondRound => {
                self.turn = self.bidding.turn();
            }
        }
        Ok(outcome)
    }

    /// The dealer drops one card after the kitty joined their hand.
    pub fn discard(&mut self, seat: Seat, card: Card) -> Result<(), DiscardError> {
        if self.phase != RoundPhase::Discarding {
            return Err(DiscardError::NotDiscarding);
        }
        if seat != self.dealer {
            return Err(DiscardError::NotDealer {
                dealer: self.dealer,
                actual: seat,
            });
        }
        if !self.hands[seat.index()].remove(card) {
            return Err(DiscardError::CardNotInHand(card));
        }
        self.discarded = Some(card);
        self.phase = RoundPhase::Playing;
        self.turn = self.dealer.next();
        Ok(())
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, PlayError> {
        if self.phase != RoundPhase::Playing {
            return Err(PlayError::NotInPlayPhase);
        }
        if seat != self.turn {
            return Err(PlayError::OutOfTurn {
                expected: self.turn,
                actual: seat,
            });
        }
        if !self.hands[seat.index()].contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }

        self.current_trick.add(seat, card).map_err(PlayError::Trick)?;
        let _ = self.hands[seat.index()].remove(card);
        self.turn = seat.next();

        if !self.current_trick.is_complete() {
            return Ok(PlayOutcome::Played);
        }
        let winner = self.resolve_trick().map_err(PlayError::Trick)?;
        if self.phase == RoundPhase::Complete {
            Ok(PlayOutcome::HandCompleted { winner })
        } else {
            Ok(PlayOutcome::TrickCompleted { winner })
        }
    }

    /// Awards the full current trick and hands the lead to its winner.
    pub fn resolve_trick(&mut self) -> Result<Seat, TrickError> {
        let winner = self.current_trick.winner(self.trump)?;
        self.tricks_won[winner.team().index()] += 1;
        let finished = std::mem::take(&mut self.current_trick);
        self.trick_history.push(CompletedTrick {
            trick: finished,
            winner,
        });
        self.turn = winner;
        if self.trick_history.len() == TRICKS_PER_HAND as usize {
            self.phase = RoundPhase::Complete;
        }
        Ok(winner)
    }

    pub fn outcome(&self) -> Result<HandOutcome, ScoreError> {
        if self.phase != RoundPhase::Complete {
            return Err(ScoreError::HandInProgress(self.trick_history.len() as u8));
        }
        let maker = self.maker().ok_or(ScoreError::NoMaker)?;
        HandOutcome::resolve(self.tricks_won, maker.team())
    }

    pub fn tricks_for(&self, team: Team) -> u8 {
        self.tricks_won[team.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted { winner: Seat },
    HandCompleted { winner: Seat },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    NotInPlayPhase,
    CardNotInHand(Card),
    OutOfTurn { expected: Seat, actual: Seat },
    Trick(TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotInPlayPhase => write!(f, "cards can only be played once trump is set"),
            PlayError::CardNotInHand(card) => write!(f, "{card} is not in hand"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            PlayError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PlayError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardError {
    NotDiscarding,
    NotDealer { dealer: Seat, actual: Seat },
    CardNotInHand(Card),
}

impl fmt::Display for DiscardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardError::NotDiscarding => write!(f, "no discard is pending"),
            DiscardError::NotDealer { dealer, actual } => {
                write!(f, "only the dealer ({dealer}) discards, not {actual}")
            }
            DiscardError::CardNotInHand(card) => write!(f, "{card} is not in the dealer's hand"),
        }
    }
}

impl std::error::Error for DiscardError {}

use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::valuation::Valuation;
use serde::Serialize;
use std::fmt;

/// One card slot per seat plus the seat that led.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trick {
    slots: [Option<Card>; 4],
    leader: Option<Seat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    AlreadyPlayed(Seat),
    MissingPlay(Seat),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::AlreadyPlayed(seat) => write!(f, "{seat} has already played this trick"),
            TrickError::MissingPlay(seat) => {
                write!(f, "cannot resolve trick: {seat} has not played")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leader(&self) -> Option<Seat> {
        self.leader
    }

    pub fn lead_card(&self) -> Option<Card> {
        self.leader.and_then(|seat| self.slots[seat.index()])
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.lead_card().map(|card| card.suit)
    }

    pub fn card_at(&self, seat: Seat) -> Option<Card> {
        self.slots[seat.index()]
    }

    pub fn slots(&self) -> &[Option<Card>; 4] {
        &self.slots
    }

    /// Played cards in seat order, not play order.
    pub fn plays(&self) -> impl Iterator<Item = Play> + '_ {
        Seat::LOOP
            .iter()
            .filter_map(|&seat| self.card_at(seat).map(|card| Play { seat, card }))
    }

    pub fn play_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.leader.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Records `card` for `seat`. The first card added becomes the lead.
    pub fn add(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }
        if self.slots[seat.index()].is_some() {
            return Err(TrickError::AlreadyPlayed(seat));
        }
        self.slots[seat.index()] = Some(card);
        if self.leader.is_none() {
            self.leader = Some(seat);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.slots = [None; 4];
        self.leader = None;
    }

    /// Highest value among played cards, 0 when nothing has been played.
    pub fn highest_value(&self, trump: Option<Suit>) -> u8 {
        let valuation = Valuation::for_trick(trump, self);
        self.plays()
            .map(|play| valuation.value(play.card))
            .max()
            .unwrap_or(0)
    }

    /// Seat holding the strictly highest card; the earlier seat wins ties.
    pub fn winner(&self, trump: Option<Suit>) -> Result<Seat, TrickError> {
        let valuation = Valuation::for_trick(trump, self);
        let mut best: Option<(Seat, u8)> = None;
        for seat in Seat::LOOP {
            let card = self.card_at(seat).ok_or(TrickError::MissingPlay(seat))?;
            let value = valuation.value(card);
            if best.is_none_or(|(_, high)| value > high) {
                best = Some((seat, value));
            }
        }
        best.map(|(seat, _)| seat)
            .ok_or(TrickError::MissingPlay(Seat::South))
    }
}

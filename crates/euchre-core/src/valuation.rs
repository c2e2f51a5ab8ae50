//! Card strength under a trump and lead context.
//!
//! Values are never stored on cards; every comparison site builds a
//! [`Valuation`] for the context it is in and asks it.

use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use crate::model::trick::Trick;

pub const RIGHT_BOWER: u8 = 20;
pub const LEFT_BOWER: u8 = 19;

// Indexed by rank: 9, 10, J, Q, K, A.
const TRUMP_LADDER: [u8; 6] = [14, 15, RIGHT_BOWER, 16, 17, 18];
const LEAD_LADDER: [u8; 6] = [8, 9, 10, 11, 12, 13];
const OFF_LADDER: [u8; 6] = [2, 3, 4, 5, 6, 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Valuation {
    trump: Option<Suit>,
    lead: Option<Suit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValuedCard {
    pub card: Card,
    pub value: u8,
}

impl Valuation {
    pub const fn new(trump: Option<Suit>, lead: Option<Suit>) -> Self {
        Self { trump, lead }
    }

    /// Context with no card led yet.
    pub const fn leading(trump: Option<Suit>) -> Self {
        Self { trump, lead: None }
    }

    /// Context of `trick`: the lead suit is the printed suit of its lead card.
    pub fn for_trick(trump: Option<Suit>, trick: &Trick) -> Self {
        Self {
            trump,
            lead: trick.lead_suit(),
        }
    }

    pub const fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub const fn lead(&self) -> Option<Suit> {
        self.lead
    }

    pub fn left_bower_suit(&self) -> Option<Suit> {
        self.trump.map(Suit::same_color_partner)
    }

    pub fn is_trump(&self, card: Card) -> bool {
        match self.trump {
            Some(trump) => card.suit == trump || card.is_left_bower(trump),
            None => false,
        }
    }

    pub fn value(&self, card: Card) -> u8 {
        let slot = rank_slot(card.rank);
        if Some(card.suit) == self.trump {
            return TRUMP_LADDER[slot];
        }
        if card.is_jack() && Some(card.suit) == self.left_bower_suit() {
            return LEFT_BOWER;
        }
        if Some(card.suit) == self.lead {
            return LEAD_LADDER[slot];
        }
        OFF_LADDER[slot]
    }

    pub fn valued<'a, I>(&self, cards: I) -> Vec<ValuedCard>
    where
        I: IntoIterator<Item = &'a Card>,
    {
        cards
            .into_iter()
            .map(|&card| ValuedCard {
                card,
                value: self.value(card),
            })
            .collect()
    }

    /// Lowest-valued card, first encountered on ties.
    pub fn lowest<'a, I>(&self, cards: I) -> Option<Card>
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let mut best: Option<ValuedCard> = None;
        for &card in cards {
            let value = self.value(card);
            if best.is_none_or(|current| value < current.value) {
                best = Some(ValuedCard { card, value });
            }
        }
        best.map(|valued| valued.card)
    }
}

const fn rank_slot(rank: Rank) -> usize {
    match rank {
        Rank::Nine => 0,
        Rank::Ten => 1,
        Rank::Jack => 2,
        Rank::Queen => 3,
        Rank::King => 4,
        Rank::Ace => 5,
    }
}

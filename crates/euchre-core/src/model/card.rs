use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A card is identified by rank and suit only. Its strength depends on the
/// trump and lead context, see [`crate::valuation::Valuation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_jack(self) -> bool {
        matches!(self.rank, Rank::Jack)
    }

    /// Jack of `trump`.
    pub fn is_right_bower(self, trump: Suit) -> bool {
        self.is_jack() && self.suit == trump
    }

    /// Jack of the suit sharing `trump`'s colour.
    pub fn is_left_bower(self, trump: Suit) -> bool {
        self.is_jack() && self.suit == trump.same_color_partner()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

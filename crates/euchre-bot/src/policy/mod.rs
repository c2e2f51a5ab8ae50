mod heuristic;

pub use heuristic::HeuristicPolicy;

use crate::bot::BotFeatures;
use euchre_core::bidding::BidChoice;
use euchre_core::model::card::Card;
use euchre_core::model::hand::Hand;
use euchre_core::model::player::Seat;
use euchre_core::model::round::RoundState;

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub round: &'a RoundState,
    pub features: BotFeatures,
}

impl<'a> PolicyContext<'a> {
    pub fn new(seat: Seat, round: &'a RoundState, features: BotFeatures) -> Self {
        Self {
            seat,
            hand: round.hand(seat),
            round,
            features,
        }
    }
}

/// Decision interface for computer seats
pub trait Policy: Send {
    /// Bid for the seat on turn (called during Bidding phase)
    fn choose_bid(&mut self, ctx: &PolicyContext) -> Option<BidChoice>;

    /// Card the dealer drops after taking the kitty
    fn choose_discard(&mut self, ctx: &PolicyContext) -> Option<Card>;

    /// Card to play (called during Playing phase)
    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card>;
}

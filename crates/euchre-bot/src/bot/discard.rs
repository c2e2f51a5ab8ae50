use super::BotContext;
use euchre_core::model::card::Card;
use euchre_core::model::suit::Suit;
use euchre_core::valuation::Valuation;

pub struct DiscardPlanner;

impl DiscardPlanner {
    pub fn choose(ctx: &BotContext<'_>) -> Option<Card> {
        Self::select(ctx.hand().cards(), ctx.round.kitty(), ctx.round.trump())
    }

    /// Weakest card under the new trump, never the kitty card just taken.
    pub fn select(hand: &[Card], kitty: Card, trump: Option<Suit>) -> Option<Card> {
        Valuation::leading(trump).lowest(hand.iter().filter(|&&card| card != kitty))
    }
}

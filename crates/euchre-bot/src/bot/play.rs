use super::BotContext;
use euchre_core::model::card::Card;
use euchre_core::model::suit::Suit;
use euchre_core::model::trick::Trick;
use euchre_core::valuation::Valuation;

pub struct PlayPlanner;

/// Which rule picked the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayRule {
    /// Cheapest lead-suit card that beats the trick.
    BeatWithLead,
    /// Cheapest trump that beats the trick.
    TrumpIn,
    /// Cannot win: shed the cheapest lead-suit card.
    ShedLead,
    /// Leading, or nothing above applied.
    Lowest,
}

impl PlayRule {
    pub const fn as_str(self) -> &'static str {
        match self {
            PlayRule::BeatWithLead => "beat_with_lead",
            PlayRule::TrumpIn => "trump_in",
            PlayRule::ShedLead => "shed_lead",
            PlayRule::Lowest => "lowest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayChoice {
    pub card: Card,
    pub rule: PlayRule,
}

impl PlayPlanner {
    pub fn choose(ctx: &BotContext<'_>) -> Option<PlayChoice> {
        Self::select(
            ctx.hand().cards(),
            ctx.round.current_trick(),
            ctx.round.trump(),
        )
    }

    pub fn select(hand: &[Card], trick: &Trick, trump: Option<Suit>) -> Option<PlayChoice> {
        let valuation = Valuation::for_trick(trump, trick);
        let high = trick.highest_value(trump);

        if high > 0 {
            let lead = valuation.lead();
            let is_lead = |card: &&Card| Some(card.suit) == lead;
            let beats = |card: &&Card| valuation.value(**card) > high;

            let picks = [
                (
                    PlayRule::BeatWithLead,
                    valuation.lowest(hand.iter().filter(is_lead).filter(beats)),
                ),
                (
                    PlayRule::TrumpIn,
                    valuation.lowest(
                        hand.iter()
                            .filter(|card| valuation.is_trump(**card))
                            .filter(beats),
                    ),
                ),
                (
                    PlayRule::ShedLead,
                    valuation.lowest(hand.iter().filter(is_lead)),
                ),
            ];
            if let Some((rule, Some(card))) = picks.into_iter().find(|(_, card)| card.is_some()) {
                return Some(PlayChoice { card, rule });
            }
        }

        valuation.lowest(hand.iter()).map(|card| PlayChoice {
            card,
            rule: PlayRule::Lowest,
        })
    }
}

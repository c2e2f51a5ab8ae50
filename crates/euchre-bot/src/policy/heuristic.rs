use super::{Policy, PolicyContext};
use crate::bot::{BidPlanner, BotContext, DiscardPlanner, PlayChoice, PlayPlanner};
use euchre_core::bidding::BidChoice;
use euchre_core::model::card::Card;
use tracing::{Level, event};

/// Adapter that wraps the planners to implement the Policy trait
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for HeuristicPolicy {
    fn choose_bid(&mut self, ctx: &PolicyContext) -> Option<BidChoice> {
        let bot_ctx = bot_context(ctx);
        let choice = BidPlanner::choose(&bot_ctx)?;
        log_bid_decision(ctx, choice);
        Some(choice)
    }

    fn choose_discard(&mut self, ctx: &PolicyContext) -> Option<Card> {
        let bot_ctx = bot_context(ctx);
        let card = DiscardPlanner::choose(&bot_ctx)?;
        log_discard_decision(ctx, card);
        Some(card)
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        let bot_ctx = bot_context(ctx);
        let choice = PlayPlanner::choose(&bot_ctx)?;
        log_play_decision(ctx, choice);
        Some(choice.card)
    }
}

fn bot_context<'a>(ctx: &PolicyContext<'a>) -> BotContext<'a> {
    BotContext::new(ctx.seat, ctx.round, ctx.features)
}

fn decision_logging_enabled(ctx: &PolicyContext) -> bool {
    tracing::enabled!(Level::INFO) && ctx.features.decision_logs_enabled()
}

fn hand_preview(ctx: &PolicyContext) -> String {
    ctx.hand
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn log_bid_decision(ctx: &PolicyContext, choice: BidChoice) {
    if !decision_logging_enabled(ctx) {
        return;
    }

    let bidding = ctx.round.bidding();
    event!(
        target: "euchre_bot::bid",
        Level::INFO,
        seat = %ctx.seat,
        dealer = %bidding.dealer(),
        phase = ?bidding.phase(),
        kitty = %bidding.kitty(),
        trump_scan = %ctx.features.trump_scan(),
        hand = %hand_preview(ctx),
        choice = ?choice,
    );
}

fn log_discard_decision(ctx: &PolicyContext, card: Card) {
    if !decision_logging_enabled(ctx) {
        return;
    }

    event!(
        target: "euchre_bot::discard",
        Level::INFO,
        seat = %ctx.seat,
        trump = ?ctx.round.trump(),
        kitty = %ctx.round.kitty(),
        hand = %hand_preview(ctx),
        discarded = %card,
    );
}

fn log_play_decision(ctx: &PolicyContext, choice: PlayChoice) {
    if !decision_logging_enabled(ctx) {
        return;
    }

    let trick = ctx.round.current_trick();
    event!(
        target: "euchre_bot::play",
        Level::INFO,
        seat = %ctx.seat,
        trump = ?ctx.round.trump(),
        lead = ?trick.lead_suit(),
        high = trick.highest_value(ctx.round.trump()),
        trick_cards = trick.play_count(),
        hand = %hand_preview(ctx),
        chosen = %choice.card,
        reason = choice.rule.as_str(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::BotFeatures;
    use euchre_core::model::hand::Hand;
    use euchre_core::model::player::Seat;
    use euchre_core::model::rank::Rank;
    use euchre_core::model::round::RoundState;
    use euchre_core::model::suit::Suit;

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn table() -> [Hand; 4] {
        [
            Hand::with_cards(vec![
                c(Rank::Nine, Suit::Clubs),
                c(Rank::Ten, Suit::Clubs),
                c(Rank::Jack, Suit::Clubs),
                c(Rank::Nine, Suit::Spades),
                c(Rank::Ten, Suit::Spades),
            ]),
            Hand::with_cards(vec![
                c(Rank::Ace, Suit::Hearts),
                c(Rank::King, Suit::Hearts),
                c(Rank::Queen, Suit::Hearts),
                c(Rank::Jack, Suit::Hearts),
                c(Rank::Ten, Suit::Hearts),
            ]),
            Hand::with_cards(vec![
                c(Rank::Ace, Suit::Diamonds),
                c(Rank::King, Suit::Diamonds),
                c(Rank::Queen, Suit::Diamonds),
                c(Rank::Jack, Suit::Diamonds),
                c(Rank::Ten, Suit::Diamonds),
            ]),
            Hand::with_cards(vec![
                c(Rank::Ace, Suit::Spades),
                c(Rank::King, Suit::Spades),
                c(Rank::Queen, Suit::Spades),
                c(Rank::Jack, Suit::Spades),
                c(Rank::Ace, Suit::Clubs),
            ]),
        ]
    }

    #[test]
    fn heuristic_bids_through_planner() {
        let round = RoundState::from_parts(table(), c(Rank::Nine, Suit::Hearts), Seat::South);
        let ctx = PolicyContext::new(Seat::West, &round, BotFeatures::default());
        let mut policy = HeuristicPolicy::new();
        assert_eq!(policy.choose_bid(&ctx), Some(BidChoice::OrderUp));
    }

    #[test]
    fn heuristic_discards_for_dealer() {
        let mut round =
            RoundState::from_parts(table(), c(Rank::Nine, Suit::Hearts), Seat::South);
        round.bid(Seat::West, BidChoice::OrderUp).unwrap();
        let ctx = PolicyContext::new(Seat::South, &round, BotFeatures::default());
        let mut policy = HeuristicPolicy::new();
        assert_eq!(ctx.hand.len(), 6);
        assert_eq!(policy.choose_discard(&ctx), Some(c(Rank::Nine, Suit::Clubs)));
    }

    #[test]
    fn heuristic_plays_lowest_when_leading() {
        let round = RoundState::in_play(
            table(),
            c(Rank::Nine, Suit::Hearts),
            Seat::East,
            Suit::Clubs,
            Seat::South,
        )
        .unwrap();
        let ctx = PolicyContext::new(Seat::South, &round, BotFeatures::default());
        let mut policy = HeuristicPolicy::new();
        assert_eq!(policy.choose_play(&ctx), Some(c(Rank::Nine, Suit::Spades)));
    }

    #[test]
    fn no_bid_once_bidding_is_closed() {
        let round = RoundState::in_play(
            table(),
            c(Rank::Nine, Suit::Hearts),
            Seat::East,
            Suit::Clubs,
            Seat::South,
        )
        .unwrap();
        let ctx = PolicyContext::new(Seat::West, &round, BotFeatures::default());
        assert_eq!(HeuristicPolicy::new().choose_bid(&ctx), None);
    }

    #[test]
    fn decision_logging_follows_feature_flag() {
        let round = RoundState::from_parts(table(), c(Rank::Nine, Suit::Hearts), Seat::South);
        let quiet = PolicyContext::new(Seat::West, &round, BotFeatures::default());
        assert!(!decision_logging_enabled(&quiet));
    }
}

use super::{BotContext, NAME_TRUMP_THRESHOLD, ORDER_UP_THRESHOLD, PICK_UP_THRESHOLD, TrumpScan};
use euchre_core::bidding::{BidChoice, BiddingPhase};
use euchre_core::model::card::Card;
use euchre_core::model::suit::Suit;
use euchre_core::valuation::Valuation;

pub struct BidPlanner;

impl BidPlanner {
    /// Decision for the seat whose turn it is. `None` once bidding has closed.
    pub fn choose(ctx: &BotContext<'_>) -> Option<BidChoice> {
        let bidding = ctx.round.bidding();
        let hand = ctx.hand().cards();
        match bidding.phase() {
            BiddingPhase::FirstRound => Some(Self::first_round(
                hand,
                bidding.kitty().suit,
                ctx.is_dealer(),
            )),
            BiddingPhase::SecondRound => Some(
                match Self::second_round(hand, bidding.kitty().suit, ctx.features.trump_scan()) {
                    Some(suit) => BidChoice::NameTrump(suit),
                    None => BidChoice::Pass,
                },
            ),
            BiddingPhase::TrumpDecided | BiddingPhase::Redeal => None,
        }
    }

    /// Counts cards printed in the kitty suit.
    pub fn first_round(hand: &[Card], kitty_suit: Suit, is_dealer: bool) -> BidChoice {
        let count = hand.iter().filter(|card| card.suit == kitty_suit).count();
        if is_dealer {
            if count >= PICK_UP_THRESHOLD {
                BidChoice::PickUp
            } else {
                BidChoice::Pass
            }
        } else if count >= ORDER_UP_THRESHOLD {
            BidChoice::OrderUp
        } else {
            BidChoice::Pass
        }
    }

    /// Strongest suit other than the turned-down one, valuing every card as if
    /// its own suit were trump. `None` when no suit clears the threshold.
    pub fn second_round(hand: &[Card], kitty_suit: Suit, scan: TrumpScan) -> Option<Suit> {
        let mut totals = [0u32; 4];
        let mut best: Option<(Suit, u32)> = None;
        for &card in hand {
            if card.suit == kitty_suit {
                continue;
            }
            let slot = card.suit.index();
            totals[slot] += u32::from(Valuation::leading(Some(card.suit)).value(card));
            if scan == TrumpScan::PerCard {
                best = Self::better(best, card.suit, totals[slot]);
            }
        }
        if scan == TrumpScan::SuitTotals {
            for suit in Suit::ALL {
                best = Self::better(best, suit, totals[suit.index()]);
            }
        }
        best.map(|(suit, _)| suit)
    }

    fn better(best: Option<(Suit, u32)>, suit: Suit, total: u32) -> Option<(Suit, u32)> {
        if total > NAME_TRUMP_THRESHOLD && best.is_none_or(|(_, high)| total > high) {
            Some((suit, total))
        } else {
            best
        }
    }
}

use euchre_core::bidding::{BidChoice, BiddingPhase};
use euchre_core::game::match_state::MatchState;
use euchre_core::model::card::Card;
use euchre_core::model::deck::{DECK_SIZE, Deck};
use euchre_core::model::player::Seat;
use euchre_core::model::round::{PlayOutcome, RoundPhase, RoundState};
use euchre_core::valuation::Valuation;
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

fn seeds(count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(20261019);
    (0..count).map(|_| rng.next_u64()).collect()
}

fn all_cards(round: &RoundState) -> Vec<Card> {
    let mut cards: Vec<Card> = round
        .hands()
        .iter()
        .flat_map(|hand| hand.cards().iter().copied())
        .collect();
    cards.extend(round.stock().iter().copied());
    cards.extend(round.discarded());
    for completed in round.trick_history() {
        cards.extend(completed.trick.plays().map(|play| play.card));
    }
    cards.extend(round.current_trick().plays().map(|play| play.card));
    if !round.bidding().accepted_kitty() {
        cards.push(round.kitty());
    }
    cards
}

#[test]
fn every_card_is_accounted_for_through_a_hand() {
    for seed in seeds(24) {
        let deck = Deck::shuffled_with_seed(seed);
        let mut round = RoundState::deal(deck, Seat::North).unwrap();
        assert_eq!(all_cards(&round).len(), DECK_SIZE);

        // Seat after the dealer orders up whatever the kitty shows.
        round.bid(Seat::East, BidChoice::OrderUp).unwrap();
        let dealer_hand = round.hand(Seat::North).cards().to_vec();
        let drop = Valuation::leading(round.trump())
            .lowest(dealer_hand.iter())
            .unwrap();
        round.discard(Seat::North, drop).unwrap();

        let mut outcome = PlayOutcome::Played;
        while round.phase() == RoundPhase::Playing {
            let seat = round.turn();
            let card = round.hand(seat).cards()[0];
            outcome = round.play_card(seat, card).unwrap();
            let unique: HashSet<Card> = all_cards(&round).into_iter().collect();
            assert_eq!(unique.len(), DECK_SIZE, "seed {seed}");
        }
        assert!(matches!(outcome, PlayOutcome::HandCompleted { .. }));
        let tricks = round.tricks_won();
        assert_eq!(tricks[0] + tricks[1], 5);
        assert!(round.outcome().is_ok());
    }
}

#[test]
fn bidding_never_needs_more_than_eight_decisions() {
    for seed in seeds(8) {
        let mut state = MatchState::with_seed(seed).unwrap();
        let round = state.round_mut();
        while round.bidding().is_open() {
            round.bid(round.turn(), BidChoice::Pass).unwrap();
        }
        assert_eq!(round.bidding().phase(), BiddingPhase::Redeal);
        assert_eq!(round.bidding().decisions(), 8);
        assert_eq!(round.phase(), RoundPhase::Redeal);
    }
}

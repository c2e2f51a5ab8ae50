use super::match_state::MatchState;
use crate::bidding::BiddingPhase;
use crate::model::card::Card;
use crate::model::player::{Seat, Team};
use crate::model::round::RoundPhase;
use crate::model::suit::Suit;
use serde::Serialize;

/// What a presentation layer may show a player sitting at `viewer`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableView {
    pub viewer: Seat,
    pub hand_number: u32,
    pub dealer: Seat,
    pub turn: Seat,
    pub phase: RoundPhase,
    pub bidding: BiddingPhase,
    pub kitty: Card,
    pub trump: Option<Suit>,
    pub maker: Option<Seat>,
    pub hand: Vec<Card>,
    pub hand_sizes: [usize; 4],
    pub trick: Vec<SeatCard>,
    pub tricks_won: [u8; 2],
    pub scores: [u32; 2],
    pub discarded: Option<Card>,
    pub winner: Option<Team>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SeatCard {
    pub seat: Seat,
    pub card: Card,
}

impl TableView {
    pub fn capture(state: &MatchState, viewer: Seat) -> Self {
        let round = state.round();
        let hand_sizes = Seat::LOOP.map(|seat| round.hand(seat).len());
        let discarded = round.discarded().filter(|_| viewer == round.dealer());
        TableView {
            viewer,
            hand_number: state.hand_number(),
            dealer: round.dealer(),
            turn: round.turn(),
            phase: round.phase(),
            bidding: round.bidding().phase(),
            kitty: round.kitty(),
            trump: round.trump(),
            maker: round.maker(),
            hand: round.hand(viewer).cards().to_vec(),
            hand_sizes,
            trick: round
                .current_trick()
                .plays()
                .map(|play| SeatCard {
                    seat: play.seat,
                    card: play.card,
                })
                .collect(),
            tricks_won: round.tricks_won(),
            scores: *state.scores().standings(),
            discarded,
            winner: state.winner(),
        }
    }

    pub fn to_json(state: &MatchState, viewer: Seat) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(state, viewer))
    }
}

#[cfg(test)]
mod tests {
    use super::TableView;
    use crate::bidding::BidChoice;
    use crate::game::match_state::MatchState;
    use crate::model::player::Seat;
    use crate::model::round::RoundPhase;

    #[test]
    fn view_shows_only_the_viewers_cards() {
        let state = MatchState::with_dealer(21, Seat::West).unwrap();
        let view = TableView::capture(&state, Seat::South);
        assert_eq!(view.hand, state.round().hand(Seat::South).cards());
        assert_eq!(view.hand_sizes, [5, 5, 5, 5]);
        assert_eq!(view.dealer, Seat::West);
        assert!(view.trick.is_empty());
        assert_eq!(view.trump, None);
    }

    #[test]
    fn view_serializes_to_json() {
        let state = MatchState::with_seed(99).unwrap();
        let json = TableView::to_json(&state, Seat::South).unwrap();
        assert!(json.contains("\"viewer\": \"South\""));
        assert!(json.contains("\"kitty\""));
        assert!(json.contains("\"scores\": ["));
    }

    #[test]
    fn discard_is_visible_to_the_dealer_only() {
        let mut state = MatchState::with_dealer(5, Seat::West).unwrap();
        let round = state.round_mut();
        assert_eq!(round.turn(), Seat::North);
        round.bid(Seat::North, BidChoice::OrderUp).unwrap();
        assert_eq!(round.phase(), RoundPhase::Discarding);
        let dropped = round.hand(Seat::West).cards()[0];
        round.discard(Seat::West, dropped).unwrap();

        let dealer_view = TableView::capture(&state, Seat::West);
        assert_eq!(dealer_view.discarded, Some(dropped));
        assert_eq!(dealer_view.phase, RoundPhase::Playing);
        for seat in [Seat::South, Seat::North, Seat::East] {
            let view = TableView::capture(&state, seat);
            assert_eq!(view.discarded, None, "{seat} must not see the discard");
            assert_eq!(view.maker, Some(Seat::North));
        }
    }
}

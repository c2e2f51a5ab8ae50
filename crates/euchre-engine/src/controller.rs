use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use euchre_bot::{BotFeatures, HeuristicPolicy, Policy, PolicyContext};
use euchre_core::bidding::{BidChoice, BidError, BiddingPhase};
use euchre_core::game::match_state::MatchState;
use euchre_core::game::view::TableView;
use euchre_core::model::card::Card;
use euchre_core::model::hand::Hand;
use euchre_core::model::player::{Seat, Team};
use euchre_core::model::round::{CompletedTrick, DiscardError, PlayError, PlayOutcome, RoundPhase};
use euchre_core::model::score::{HandOutcome, ScoreError};
use euchre_core::model::suit::Suit;
use euchre_core::model::trick::Trick;
use tracing::{debug, warn};

/// Input the controller needs before the game can move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Awaiting {
    Bid(Seat),
    Discard(Seat),
    Play(Seat),
    NextHand,
    GameOver,
}

impl Awaiting {
    pub fn seat(self) -> Option<Seat> {
        match self {
            Awaiting::Bid(seat) | Awaiting::Discard(seat) | Awaiting::Play(seat) => Some(seat),
            Awaiting::NextHand | Awaiting::GameOver => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidReport {
    pub seat: Seat,
    pub choice: BidChoice,
    pub phase: BiddingPhase,
    pub trump: Option<Suit>,
    pub maker: Option<Seat>,
    /// Everyone passed and a fresh hand was dealt.
    pub redealt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayReport {
    pub seat: Seat,
    pub card: Card,
    pub trick_winner: Option<Seat>,
    pub outcome: Option<HandOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnReport {
    Bid(BidReport),
    Discard { seat: Seat, card: Card },
    Play(PlayReport),
}

pub struct GameController {
    match_state: MatchState,
    policy: Box<dyn Policy>,
    features: BotFeatures,
    last_trick: Option<CompletedTrick>,
}

impl GameController {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        Self::with_policy(config, Box::new(HeuristicPolicy::new()))
    }

    pub fn with_policy(config: EngineConfig, policy: Box<dyn Policy>) -> EngineResult<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let match_state = match config.dealer {
            Some(dealer) => MatchState::with_dealer(seed, dealer)?,
            None => MatchState::with_seed(seed)?,
        };
        debug!(seed, dealer = %match_state.dealer(), "new game");
        Ok(Self {
            match_state,
            policy,
            features: config.features,
            last_trick: None,
        })
    }

    pub fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    /// Mutable access for hand-built setups.
    pub fn match_state_mut(&mut self) -> &mut MatchState {
        &mut self.match_state
    }

    pub fn awaiting(&self) -> Awaiting {
        if self.match_state.is_game_over() {
            return Awaiting::GameOver;
        }
        let round = self.match_state.round();
        match round.phase() {
            RoundPhase::Bidding => Awaiting::Bid(round.turn()),
            RoundPhase::Discarding => Awaiting::Discard(round.dealer()),
            RoundPhase::Playing => Awaiting::Play(round.turn()),
            RoundPhase::Complete | RoundPhase::Redeal => Awaiting::NextHand,
        }
    }

    pub fn is_human_turn(&self) -> bool {
        self.awaiting().seat().is_some_and(Seat::is_human)
    }

    /// Rotates the dealer and deals a fresh hand.
    pub fn deal_new_hand(&mut self) -> EngineResult<()> {
        self.ensure_active()?;
        self.match_state.deal_new_hand()?;
        self.last_trick = None;
        debug!(
            hand = self.match_state.hand_number(),
            dealer = %self.match_state.dealer(),
            kitty = %self.match_state.round().kitty(),
            "dealt new hand"
        );
        Ok(())
    }

    /// Advances bidding by one seat. The human seat needs `human`; computer
    /// seats must not be given one.
    pub fn decide_bidding(&mut self, human: Option<BidChoice>) -> EngineResult<BidReport> {
        self.ensure_active()?;
        let seat = self.match_state.round().turn();
        let choice = if seat.is_human() {
            human.ok_or(EngineError::HumanDecisionRequired { seat })?
        } else {
            if human.is_some() {
                return Err(EngineError::UnexpectedHumanDecision { seat });
            }
            if self.match_state.round().phase() != RoundPhase::Bidding {
                return Err(BidError::BiddingClosed.into());
            }
            let ctx = policy_context(&self.match_state, seat, self.features);
            self.policy
                .choose_bid(&ctx)
                .ok_or(EngineError::NoHeuristicChoice {
                    seat,
                    action: "bid",
                })?
        };

        let outcome = self.match_state.round_mut().bid(seat, choice)?;
        debug!(
            seat = %seat,
            choice = ?choice,
            phase = ?outcome.phase,
            trump = ?outcome.trump,
            "bid"
        );

        let redealt = outcome.phase == BiddingPhase::Redeal;
        if redealt {
            self.match_state.redeal()?;
            self.last_trick = None;
            debug!(
                redeals = self.match_state.redeals(),
                dealer = %self.match_state.dealer(),
                "all passed, redealing"
            );
        }

        Ok(BidReport {
            seat,
            choice,
            phase: outcome.phase,
            trump: outcome.trump,
            maker: outcome.maker,
            redealt,
        })
    }

    pub fn submit_human_discard(&mut self, card: Card) -> EngineResult<Card> {
        let dealer = self.pending_discard()?;
        if !dealer.is_human() {
            return Err(EngineError::NotHumanTurn { expected: dealer });
        }
        self.discard(dealer, card)
    }

    pub fn run_computer_discard(&mut self) -> EngineResult<Card> {
        let dealer = self.pending_discard()?;
        if dealer.is_human() {
            return Err(EngineError::NotComputerTurn { seat: dealer });
        }
        let ctx = policy_context(&self.match_state, dealer, self.features);
        let card = self
            .policy
            .choose_discard(&ctx)
            .ok_or(EngineError::NoHeuristicChoice {
                seat: dealer,
                action: "discard",
            })?;
        self.discard(dealer, card)
    }

    pub fn submit_human_play(&mut self, card: Card) -> EngineResult<PlayReport> {
        let seat = self.pending_play()?;
        if !seat.is_human() {
            return Err(EngineError::NotHumanTurn { expected: seat });
        }
        self.play(seat, card)
    }

    pub fn run_computer_play(&mut self) -> EngineResult<PlayReport> {
        let seat = self.pending_play()?;
        if seat.is_human() {
            return Err(EngineError::NotComputerTurn { seat });
        }
        let ctx = policy_context(&self.match_state, seat, self.features);
        let card = self
            .policy
            .choose_play(&ctx)
            .ok_or(EngineError::NoHeuristicChoice {
                seat,
                action: "play",
            })?;
        self.play(seat, card)
    }

    /// Runs computer turns until the human seat must act, a hand ends or the
    /// game is over.
    pub fn advance_computers(&mut self) -> EngineResult<Vec<TurnReport>> {
        let mut reports = Vec::new();
        loop {
            match self.awaiting() {
                Awaiting::GameOver => break,
                Awaiting::NextHand => {
                    self.advance_hand()?;
                }
                Awaiting::Bid(seat) if !seat.is_human() => {
                    reports.push(TurnReport::Bid(self.decide_bidding(None)?));
                }
                Awaiting::Discard(seat) if !seat.is_human() => {
                    let card = self.run_computer_discard()?;
                    reports.push(TurnReport::Discard { seat, card });
                }
                Awaiting::Play(seat) if !seat.is_human() => {
                    let report = self.run_computer_play()?;
                    reports.push(TurnReport::Play(report));
                    if report.outcome.is_some() {
                        break;
                    }
                }
                Awaiting::Bid(_) | Awaiting::Discard(_) | Awaiting::Play(_) => break,
            }
        }
        Ok(reports)
    }

    /// Scores the finished hand and deals the next one unless the game is won.
    pub fn finish_hand(&mut self) -> EngineResult<HandOutcome> {
        let round = self.match_state.round();
        if round.phase() != RoundPhase::Complete {
            return Err(ScoreError::HandInProgress(round.tricks_completed() as u8).into());
        }
        match self.match_state.finish_hand() {
            Ok(outcome) => {
                debug!(
                    winner = %outcome.winner,
                    kind = ?outcome.kind,
                    points = outcome.points,
                    scores = ?self.match_state.scores().standings(),
                    "hand scored"
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(error = %err, "hand could not be scored");
                Err(err.into())
            }
        }
    }

    /// What the heuristic would bid for the human seat.
    pub fn suggest_bid(&mut self) -> Option<BidChoice> {
        let ctx = policy_context(&self.match_state, Seat::HUMAN, self.features);
        self.policy.choose_bid(&ctx)
    }

    pub fn suggest_discard(&mut self) -> Option<Card> {
        let ctx = policy_context(&self.match_state, Seat::HUMAN, self.features);
        self.policy.choose_discard(&ctx)
    }

    pub fn suggest_play(&mut self) -> Option<Card> {
        let ctx = policy_context(&self.match_state, Seat::HUMAN, self.features);
        self.policy.choose_play(&ctx)
    }

    pub fn trick(&self) -> &Trick {
        self.match_state.round().current_trick()
    }

    pub fn last_trick(&self) -> Option<&CompletedTrick> {
        self.last_trick.as_ref()
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        self.match_state.round().hand(seat)
    }

    pub fn hands(&self) -> &[Hand; 4] {
        self.match_state.round().hands()
    }

    pub fn scores(&self) -> [u32; 2] {
        *self.match_state.scores().standings()
    }

    pub fn score(&self, team: Team) -> u32 {
        self.match_state.scores().score(team)
    }

    pub fn tricks_won(&self) -> [u8; 2] {
        self.match_state.round().tricks_won()
    }

    pub fn trump(&self) -> Option<Suit> {
        self.match_state.round().trump()
    }

    pub fn dealer(&self) -> Seat {
        self.match_state.dealer()
    }

    pub fn turn(&self) -> Seat {
        self.match_state.round().turn()
    }

    pub fn kitty(&self) -> Card {
        self.match_state.round().kitty()
    }

    pub fn maker(&self) -> Option<Seat> {
        self.match_state.round().maker()
    }

    pub fn phase(&self) -> RoundPhase {
        self.match_state.round().phase()
    }

    pub fn bidding_phase(&self) -> BiddingPhase {
        self.match_state.round().bidding().phase()
    }

    pub fn is_game_over(&self) -> bool {
        self.match_state.is_game_over()
    }

    pub fn winner(&self) -> Option<Team> {
        self.match_state.winner()
    }

    pub fn hand_number(&self) -> u32 {
        self.match_state.hand_number()
    }

    pub fn redeals(&self) -> u32 {
        self.match_state.redeals()
    }

    pub fn last_outcome(&self) -> Option<HandOutcome> {
        self.match_state.last_outcome()
    }

    pub fn seed(&self) -> u64 {
        self.match_state.seed()
    }

    pub fn features(&self) -> BotFeatures {
        self.features
    }

    pub fn table_view(&self) -> TableView {
        TableView::capture(&self.match_state, Seat::HUMAN)
    }

    fn ensure_active(&self) -> EngineResult<()> {
        if self.match_state.is_game_over() {
            Err(EngineError::GameOver)
        } else {
            Ok(())
        }
    }

    fn pending_discard(&self) -> EngineResult<Seat> {
        self.ensure_active()?;
        let round = self.match_state.round();
        if round.phase() != RoundPhase::Discarding {
            return Err(DiscardError::NotDiscarding.into());
        }
        Ok(round.dealer())
    }

    fn pending_play(&self) -> EngineResult<Seat> {
        self.ensure_active()?;
        let round = self.match_state.round();
        if round.phase() != RoundPhase::Playing {
            return Err(PlayError::NotInPlayPhase.into());
        }
        Ok(round.turn())
    }

    fn discard(&mut self, dealer: Seat, card: Card) -> EngineResult<Card> {
        self.match_state.round_mut().discard(dealer, card)?;
        debug!(dealer = %dealer, "discarded");
        Ok(card)
    }

    fn play(&mut self, seat: Seat, card: Card) -> EngineResult<PlayReport> {
        let outcome = self.match_state.round_mut().play_card(seat, card)?;
        let mut report = PlayReport {
            seat,
            card,
            trick_winner: None,
            outcome: None,
        };
        match outcome {
            PlayOutcome::Played => {}
            PlayOutcome::TrickCompleted { winner } => {
                self.record_trick(winner);
                report.trick_winner = Some(winner);
            }
            PlayOutcome::HandCompleted { winner } => {
                self.record_trick(winner);
                report.trick_winner = Some(winner);
                report.outcome = Some(self.finish_hand()?);
            }
        }
        Ok(report)
    }

    fn record_trick(&mut self, winner: Seat) {
        let round = self.match_state.round();
        self.last_trick = round.trick_history().last().cloned();
        debug!(
            winner = %winner,
            tricks = ?round.tricks_won(),
            "trick complete"
        );
    }

    fn advance_hand(&mut self) -> EngineResult<()> {
        match self.match_state.round().phase() {
            RoundPhase::Complete => self.finish_hand().map(|_| ()),
            _ => {
                self.match_state.redeal()?;
                Ok(())
            }
        }
    }
}

fn policy_context(
    match_state: &MatchState,
    seat: Seat,
    features: BotFeatures,
) -> PolicyContext<'_> {
    PolicyContext::new(seat, match_state.round(), features)
}

#[cfg(test)]
mod tests {
    use super::{Awaiting, GameController};
    use crate::config::EngineConfig;
    use crate::error::EngineError;
    use euchre_bot::BotFeatures;
    use euchre_core::bidding::{BidChoice, BidError, BiddingPhase};
    use euchre_core::model::card::Card;
    use euchre_core::model::hand::Hand;
    use euchre_core::model::player::{Seat, Team};
    use euchre_core::model::rank::Rank;
    use euchre_core::model::round::{PlayError, RoundPhase, RoundState};
    use euchre_core::model::suit::Suit;

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn controller(dealer: Seat) -> GameController {
        GameController::new(EngineConfig::with_seed(31).dealer(dealer)).unwrap()
    }

    #[test]
    fn read_accessors_describe_a_fresh_deal() {
        let game = controller(Seat::North);
        assert_eq!(game.seed(), 31);
        assert_eq!(game.features(), BotFeatures::default());
        assert_eq!(game.dealer(), Seat::North);
        assert_eq!(game.turn(), Seat::East);
        assert_eq!(game.phase(), RoundPhase::Bidding);
        assert_eq!(game.bidding_phase(), BiddingPhase::FirstRound);
        assert_eq!(game.hand_number(), 1);
        assert_eq!(game.redeals(), 0);
        assert_eq!(game.scores(), [0, 0]);
        assert_eq!(game.score(Team::EastWest), 0);
        assert_eq!(game.tricks_won(), [0, 0]);
        assert_eq!(game.trump(), None);
        assert_eq!(game.maker(), None);
        assert!(game.trick().is_empty());
        assert!(game.last_trick().is_none());
        assert!(game.last_outcome().is_none());
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);

        assert!(game.hands().iter().all(|hand| hand.len() == 5));
        assert_eq!(game.hand(Seat::South), &game.hands()[0]);
        assert!(game.hands().iter().all(|hand| !hand.contains(game.kitty())));

        let view = game.table_view();
        assert_eq!(view.viewer, Seat::South);
        assert_eq!(view.hand, game.hand(Seat::South).cards());
        assert_eq!(view.kitty, game.kitty());
    }

    #[test]
    fn human_seat_needs_a_decision() {
        // East deals, so South bids first.
        let mut game = controller(Seat::East);
        assert_eq!(game.awaiting(), Awaiting::Bid(Seat::South));
        assert!(game.is_human_turn());
        assert_eq!(
            game.decide_bidding(None),
            Err(EngineError::HumanDecisionRequired { seat: Seat::South })
        );
        let report = game.decide_bidding(Some(BidChoice::Pass)).unwrap();
        assert_eq!(report.seat, Seat::South);
        assert_eq!(game.awaiting(), Awaiting::Bid(Seat::West));
    }

    #[test]
    fn computer_seat_rejects_a_supplied_decision() {
        let mut game = controller(Seat::South);
        assert_eq!(game.awaiting(), Awaiting::Bid(Seat::West));
        assert_eq!(
            game.decide_bidding(Some(BidChoice::Pass)),
            Err(EngineError::UnexpectedHumanDecision { seat: Seat::West })
        );
        assert!(game.decide_bidding(None).is_ok());
    }

    #[test]
    fn illegal_human_bid_leaves_state_untouched() {
        let mut game = controller(Seat::East);
        let before = game.awaiting();
        assert!(matches!(
            game.decide_bidding(Some(BidChoice::PickUp)),
            Err(EngineError::Bid(BidError::IllegalChoice { .. }))
        ));
        assert_eq!(game.awaiting(), before);
        assert_eq!(game.match_state().round().bidding().decisions(), 0);
    }

    #[test]
    fn human_cannot_play_for_computers() {
        let mut game = controller(Seat::South);
        assert!(matches!(
            game.submit_human_play(c(Rank::Nine, Suit::Clubs)),
            Err(EngineError::Play(PlayError::NotInPlayPhase))
        ));
    }

    #[test]
    fn human_dealer_passing_twice_forces_a_redeal() {
        let mut game = controller(Seat::South);
        let mut seat = game.turn();
        for _ in 0..7 {
            game.match_state_mut()
                .round_mut()
                .bid(seat, BidChoice::Pass)
                .unwrap();
            seat = seat.next();
        }
        assert_eq!(game.awaiting(), Awaiting::Bid(Seat::South));
        let report = game.decide_bidding(Some(BidChoice::Pass)).unwrap();
        assert!(report.redealt);
        assert_eq!(report.phase, BiddingPhase::Redeal);
        assert_eq!(game.redeals(), 1);
        assert_eq!(game.dealer(), Seat::West);
        assert_eq!(game.phase(), RoundPhase::Bidding);
        assert_eq!(game.awaiting(), Awaiting::Bid(Seat::North));
    }

    #[test]
    fn thrown_in_hand_is_redealt_when_advancing() {
        let mut game = controller(Seat::West);
        let mut seat = game.turn();
        for _ in 0..8 {
            game.match_state_mut()
                .round_mut()
                .bid(seat, BidChoice::Pass)
                .unwrap();
            seat = seat.next();
        }
        assert_eq!(game.awaiting(), Awaiting::NextHand);
        game.advance_computers().unwrap();
        assert_eq!(game.redeals(), 1);
        assert_eq!(game.dealer(), Seat::North);
    }

    #[test]
    fn human_discard_and_play_flow() {
        let hands = [
            Hand::with_cards(vec![
                c(Rank::Jack, Suit::Spades),
                c(Rank::Jack, Suit::Clubs),
                c(Rank::Ace, Suit::Spades),
                c(Rank::King, Suit::Spades),
                c(Rank::Nine, Suit::Hearts),
            ]),
            Hand::with_cards(vec![
                c(Rank::Nine, Suit::Diamonds),
                c(Rank::Ten, Suit::Diamonds),
                c(Rank::Queen, Suit::Diamonds),
                c(Rank::King, Suit::Diamonds),
                c(Rank::Ace, Suit::Diamonds),
            ]),
            Hand::with_cards(vec![
                c(Rank::Nine, Suit::Clubs),
                c(Rank::Ten, Suit::Clubs),
                c(Rank::Queen, Suit::Clubs),
                c(Rank::King, Suit::Clubs),
                c(Rank::Ace, Suit::Clubs),
            ]),
            Hand::with_cards(vec![
                c(Rank::Ten, Suit::Hearts),
                c(Rank::Jack, Suit::Hearts),
                c(Rank::Queen, Suit::Hearts),
                c(Rank::King, Suit::Hearts),
                c(Rank::Ace, Suit::Hearts),
            ]),
        ];
        let mut game = controller(Seat::South);
        let round = RoundState::from_parts(hands, c(Rank::Queen, Suit::Spades), Seat::South);
        game.match_state_mut().set_round(round);

        // West, North and East hold no spades and pass.
        let reports = game.advance_computers().unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(game.awaiting(), Awaiting::Bid(Seat::South));
        game.decide_bidding(Some(BidChoice::PickUp)).unwrap();
        assert_eq!(game.awaiting(), Awaiting::Discard(Seat::South));
        assert!(matches!(
            game.run_computer_discard(),
            Err(EngineError::NotComputerTurn { seat: Seat::South })
        ));
        assert_eq!(
            game.submit_human_discard(c(Rank::Nine, Suit::Hearts)),
            Ok(c(Rank::Nine, Suit::Hearts))
        );
        assert_eq!(game.hand(Seat::South).len(), 5);
        assert_eq!(game.trump(), Some(Suit::Spades));
        assert_eq!(game.maker(), Some(Seat::South));
        assert_eq!(game.bidding_phase(), BiddingPhase::TrumpDecided);
        assert_eq!(game.table_view().discarded, Some(c(Rank::Nine, Suit::Hearts)));

        // West leads; computers run until South is up.
        game.advance_computers().unwrap();
        assert_eq!(game.awaiting(), Awaiting::Play(Seat::South));
        assert_eq!(game.trick().play_count(), 3);
        assert!(game.suggest_play().is_some());
        let report = game.submit_human_play(c(Rank::Jack, Suit::Spades)).unwrap();
        assert_eq!(report.seat, Seat::South);
        assert_eq!(report.trick_winner, Some(Seat::South));
        assert_eq!(report.outcome, None);
        assert_eq!(game.tricks_won(), [1, 0]);
        assert_eq!(game.last_trick().map(|done| done.winner), Some(Seat::South));
        assert_eq!(game.awaiting(), Awaiting::Play(Seat::South));
    }
}

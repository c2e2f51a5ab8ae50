mod bid;
mod discard;
mod play;

pub use bid::BidPlanner;
pub use discard::DiscardPlanner;
pub use play::{PlayChoice, PlayPlanner, PlayRule};

use euchre_core::model::hand::Hand;
use euchre_core::model::player::Seat;
use euchre_core::model::round::RoundState;
use std::fmt;
use std::str::FromStr;

/// A non-dealer orders up with this many cards of the kitty suit.
pub const ORDER_UP_THRESHOLD: usize = 3;
/// The dealer picks up with this many, counting on the kitty as a third.
pub const PICK_UP_THRESHOLD: usize = 2;
/// A suit is named in round two once its trump strength passes this.
pub const NAME_TRUMP_THRESHOLD: u32 = 25;

/// How the second bidding round weighs candidate suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrumpScan {
    /// Walk the hand once; a suit is taken the moment its running total
    /// crosses the threshold and beats the best so far.
    #[default]
    PerCard,
    /// Total every suit first, then take the strongest above the threshold.
    SuitTotals,
}

impl TrumpScan {
    pub const fn as_str(self) -> &'static str {
        match self {
            TrumpScan::PerCard => "per-card",
            TrumpScan::SuitTotals => "suit-totals",
        }
    }
}

impl fmt::Display for TrumpScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrumpScan {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "per-card" | "per_card" | "card" => Ok(TrumpScan::PerCard),
            "suit-totals" | "suit_totals" | "totals" => Ok(TrumpScan::SuitTotals),
            other => Err(format!("unknown trump scan '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BotFeatures {
    trump_scan: TrumpScan,
    decision_logs: bool,
}

impl BotFeatures {
    pub const fn new(trump_scan: TrumpScan, decision_logs: bool) -> Self {
        Self {
            trump_scan,
            decision_logs,
        }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub const fn trump_scan(self) -> TrumpScan {
        self.trump_scan
    }

    pub const fn decision_logs_enabled(self) -> bool {
        self.decision_logs
    }

    pub fn with_trump_scan(mut self, trump_scan: TrumpScan) -> Self {
        self.trump_scan = trump_scan;
        self
    }

    pub fn with_decision_logs(mut self, enabled: bool) -> Self {
        self.decision_logs = enabled;
        self
    }

    pub fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let trump_scan = read("EUCHRE_TRUMP_SCAN")
            .and_then(|raw| raw.parse::<TrumpScan>().ok())
            .unwrap_or_default();

        let decision_logs = read("EUCHRE_DECISION_LOGS")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(false);

        Self {
            trump_scan,
            decision_logs,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub seat: Seat,
    pub round: &'a RoundState,
    pub features: BotFeatures,
}

impl<'a> BotContext<'a> {
    pub fn new(seat: Seat, round: &'a RoundState, features: BotFeatures) -> Self {
        Self {
            seat,
            round,
            features,
        }
    }

    pub fn hand(&self) -> &'a Hand {
        self.round.hand(self.seat)
    }

    pub fn is_dealer(&self) -> bool {
        self.round.dealer() == self.seat
    }
}

pub mod bot;
pub mod policy;

pub use bot::{
    BidPlanner, BotContext, BotFeatures, DiscardPlanner, PlayChoice, PlayPlanner, PlayRule,
    TrumpScan,
};
pub use policy::{HeuristicPolicy, Policy, PolicyContext};

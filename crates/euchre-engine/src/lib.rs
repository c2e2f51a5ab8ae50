//! Turn-by-turn driver for a euchre table with one human seat (South) and
//! three heuristic seats.

pub mod config;
pub mod controller;
pub mod error;

pub use config::EngineConfig;
pub use controller::{Awaiting, BidReport, GameController, PlayReport, TurnReport};
pub use error::{EngineError, EngineResult};

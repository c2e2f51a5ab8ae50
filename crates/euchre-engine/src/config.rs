use euchre_bot::{BotFeatures, TrumpScan};
use euchre_core::model::player::Seat;

/// Settings for a new [`crate::GameController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Shuffle seed. `None` draws a fresh one.
    pub seed: Option<u64>,
    /// First dealer. `None` picks one from the seeded shuffle stream.
    pub dealer: Option<Seat>,
    pub features: BotFeatures,
}

impl EngineConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let seed = read("EUCHRE_SEED").and_then(|raw| raw.trim().parse::<u64>().ok());
        Self {
            seed,
            dealer: None,
            features: BotFeatures::from_reader(read),
        }
    }

    pub fn dealer(mut self, dealer: Seat) -> Self {
        self.dealer = Some(dealer);
        self
    }

    pub fn features(mut self, features: BotFeatures) -> Self {
        self.features = features;
        self
    }

    pub fn trump_scan(mut self, scan: TrumpScan) -> Self {
        self.features = self.features.with_trump_scan(scan);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;
    use euchre_bot::TrumpScan;
    use euchre_core::model::player::Seat;
    use std::collections::HashMap;

    #[test]
    fn reader_parses_seed_and_features() {
        let mut vars = HashMap::new();
        vars.insert("EUCHRE_SEED".to_string(), " 4242 ".to_string());
        vars.insert("EUCHRE_TRUMP_SCAN".to_string(), "suit-totals".to_string());

        let config = EngineConfig::from_reader(|key| vars.get(key).cloned());
        assert_eq!(config.seed, Some(4242));
        assert_eq!(config.features.trump_scan(), TrumpScan::SuitTotals);
        assert_eq!(config.dealer, None);
    }

    #[test]
    fn bad_seed_is_ignored() {
        let config = EngineConfig::from_reader(|key| {
            (key == "EUCHRE_SEED").then(|| "not-a-number".to_string())
        });
        assert_eq!(config.seed, None);
    }

    #[test]
    fn builder_methods_compose() {
        let config = EngineConfig::with_seed(7)
            .dealer(Seat::North)
            .trump_scan(TrumpScan::SuitTotals);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.dealer, Some(Seat::North));
        assert_eq!(config.features.trump_scan(), TrumpScan::SuitTotals);
    }
}

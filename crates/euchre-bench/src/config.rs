use euchre_bot::{BotFeatures, TrumpScan};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

const RUN_ID_PLACEHOLDER: &str = "{run_id}";

/// Bench run settings, read from YAML and overridable from the CLI.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub games: GamesConfig,
    #[serde(default)]
    pub bot: BotConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    /// Master seed; every game's own seed is drawn from it.
    pub seed: Option<u64>,
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BotConfig {
    #[serde(default = "BotConfig::default_scan")]
    pub trump_scan: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "LoggingConfig::default_level")]
    pub tracing_level: String,
    /// Per-decision bot events; only written when structured logging is on.
    #[serde(default)]
    pub decision_logs: bool,
}

/// Output paths with `{run_id}` substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a valid bench config: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{} failed validation: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        message: message.into(),
    }
}

impl BenchmarkConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        let mut cfg: BenchmarkConfig = match serde_yaml::from_str(&raw) {
            Ok(cfg) => cfg,
            Err(source) => return Err(ConfigError::Yaml { path, source }),
        };
        if let Err(source) = cfg.validate() {
            return Err(ConfigError::Invalid { path, source });
        }
        Ok(cfg)
    }

    /// Checks every field and fills defaults left blank. Call again after CLI overrides.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        let run_id = self.run_id.trim();
        if run_id.is_empty() {
            return Err(invalid("run_id", "must not be empty"));
        }
        if let Some(bad) = run_id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(invalid(
                "run_id",
                format!("character {bad:?} is not allowed (use letters, digits, '.', '_' or '-')"),
            ));
        }
        self.run_id = run_id.to_string();

        if self.games.count == 0 {
            return Err(invalid("games.count", "at least one game is required"));
        }

        self.bot.trump_scan()?;

        if self.outputs.jsonl.trim().is_empty() {
            return Err(invalid("outputs.jsonl", "path must not be empty"));
        }
        if self.outputs.summary_md.trim().is_empty() {
            return Err(invalid("outputs.summary_md", "path must not be empty"));
        }

        if self.logging.tracing_level.trim().is_empty() {
            self.logging.tracing_level = LoggingConfig::default_level();
        }
        if self.logging.level().is_none() {
            return Err(invalid(
                "logging.tracing_level",
                format!("unknown level {:?}", self.logging.tracing_level),
            ));
        }
        Ok(())
    }

    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        let resolve =
            |template: &str| PathBuf::from(template.replace(RUN_ID_PLACEHOLDER, &self.run_id));
        ResolvedOutputs {
            jsonl: resolve(&self.outputs.jsonl),
            summary_md: resolve(&self.outputs.summary_md),
        }
    }

    pub fn bot_features(&self) -> Result<BotFeatures, ValidationError> {
        let decision_logs = self.logging.enable_structured && self.logging.decision_logs;
        Ok(BotFeatures::new(self.bot.trump_scan()?, decision_logs))
    }
}

impl BotConfig {
    fn default_scan() -> String {
        TrumpScan::default().as_str().to_string()
    }

    pub fn trump_scan(&self) -> Result<TrumpScan, ValidationError> {
        self.trump_scan
            .parse()
            .map_err(|message: String| invalid("bot.trump_scan", message))
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            trump_scan: Self::default_scan(),
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }

    pub fn level(&self) -> Option<Level> {
        Level::from_str(self.tracing_level.trim()).ok()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: Self::default_level(),
            decision_logs: false,
        }
    }
}

impl ResolvedOutputs {
    /// Directory holding the summary; telemetry is written there as well.
    pub fn telemetry_dir(&self) -> PathBuf {
        match self.summary_md.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        let (ConfigError::Io { path, .. }
        | ConfigError::Yaml { path, .. }
        | ConfigError::Invalid { path, .. }) = self;
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
run_id: "nightly-01"
games:
  seed: 77
  count: 12
bot:
  trump_scan: "suit-totals"
outputs:
  jsonl: "bench/out/{run_id}/games.jsonl"
  summary_md: "bench/out/{run_id}/summary.md"
logging:
  enable_structured: true
  tracing_level: "DEBUG"
  decision_logs: true
"#;

    fn parse(yaml: &str) -> BenchmarkConfig {
        serde_yaml::from_str(yaml).expect("yaml parses")
    }

    fn field_of(err: ValidationError) -> String {
        let ValidationError::InvalidField { field, .. } = err;
        field
    }

    #[test]
    fn full_config_validates_and_resolves() {
        let mut cfg = parse(YAML);
        cfg.validate().expect("valid");

        assert_eq!(cfg.games.seed, Some(77));
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));

        let features = cfg.bot_features().expect("features");
        assert_eq!(features.trump_scan(), TrumpScan::SuitTotals);
        assert!(features.decision_logs_enabled());

        let outputs = cfg.resolved_outputs();
        assert_eq!(outputs.jsonl, PathBuf::from("bench/out/nightly-01/games.jsonl"));
        assert_eq!(outputs.telemetry_dir(), PathBuf::from("bench/out/nightly-01"));
    }

    #[test]
    fn defaults_fill_missing_blocks() {
        let yaml = r#"
run_id: "bare"
games:
  count: 1
outputs:
  jsonl: "games.jsonl"
  summary_md: "summary.md"
"#;
        let mut cfg = parse(yaml);
        cfg.validate().expect("valid");
        assert_eq!(cfg.games.seed, None);
        assert_eq!(cfg.bot.trump_scan().expect("scan"), TrumpScan::PerCard);
        assert!(!cfg.logging.enable_structured);
        assert_eq!(cfg.logging.level(), Some(Level::INFO));
        assert_eq!(cfg.resolved_outputs().telemetry_dir(), PathBuf::from("."));
    }

    #[test]
    fn decision_logs_need_structured_logging() {
        let mut cfg = parse(&YAML.replace("enable_structured: true", "enable_structured: false"));
        cfg.validate().expect("valid");
        assert!(!cfg.bot_features().expect("features").decision_logs_enabled());
    }

    #[test]
    fn bad_fields_are_named_in_the_error() {
        let cases = [
            (YAML.replace("count: 12", "count: 0"), "games.count"),
            (YAML.replace("suit-totals", "strongest"), "bot.trump_scan"),
            (YAML.replace("nightly-01", "nightly 01"), "run_id"),
            (YAML.replace("nightly-01", "  "), "run_id"),
            (
                YAML.replace("bench/out/{run_id}/summary.md", ""),
                "outputs.summary_md",
            ),
            (YAML.replace("\"DEBUG\"", "\"loud\""), "logging.tracing_level"),
        ];
        for (yaml, expected) in cases {
            let err = parse(&yaml).validate().expect_err("should be rejected");
            assert_eq!(field_of(err), expected);
        }
    }

    #[test]
    fn placeholder_may_repeat() {
        let mut cfg = parse(&YAML.replace(
            "bench/out/{run_id}/games.jsonl",
            "{run_id}/{run_id}.jsonl",
        ));
        cfg.validate().expect("valid");
        assert_eq!(
            cfg.resolved_outputs().jsonl,
            PathBuf::from("nightly-01/nightly-01.jsonl")
        );
    }

    #[test]
    fn missing_file_keeps_its_path() {
        let err = BenchmarkConfig::from_path("no/such/bench.yaml").expect_err("missing");
        assert!(matches!(err, ConfigError::Io { .. }));
        assert_eq!(err.path(), Path::new("no/such/bench.yaml"));
    }
}

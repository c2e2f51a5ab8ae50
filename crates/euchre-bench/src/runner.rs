use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use euchre_bot::BotFeatures;
use euchre_core::model::player::{Seat, Team};
use euchre_core::model::score::{HandOutcome, OutcomeKind};
use euchre_engine::{Awaiting, EngineConfig, EngineError, GameController, TurnReport};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{BenchmarkConfig, ResolvedOutputs, ValidationError};

const MAX_STEPS_PER_GAME: usize = 50_000;
const DEFAULT_SEED: u64 = 0xE0C4_2E00;

/// Plays complete games with every seat driven by the heuristic policy.
pub struct GameRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    features: BotFeatures,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub wins: [usize; 2],
    pub hands_played: u64,
    pub redeals: u64,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize row: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("game {game_index} (seed {seed}) failed: {source}")]
    Engine {
        game_index: usize,
        seed: u64,
        #[source]
        source: EngineError,
    },
    #[error(
        "game {game_index} (seed {seed}) did not finish within {} steps",
        MAX_STEPS_PER_GAME
    )]
    Stalled { game_index: usize, seed: u64 },
}

/// One JSONL row per finished game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRow {
    pub run_id: String,
    pub game_index: usize,
    pub seed: u64,
    pub first_dealer: String,
    pub trump_scan: String,
    pub winner: String,
    pub scores: [u32; 2],
    pub hands: u32,
    pub redeals: u32,
    pub marches: [u32; 2],
    pub euchres: [u32; 2],
}

#[derive(Debug, Default)]
struct GameTally {
    hands: u32,
    marches: [u32; 2],
    euchres: [u32; 2],
}

impl GameTally {
    fn record(&mut self, outcome: HandOutcome) {
        self.hands += 1;
        let team = outcome.winner.index();
        match outcome.kind {
            OutcomeKind::March => self.marches[team] += 1,
            OutcomeKind::Euchre => self.euchres[team] += 1,
            OutcomeKind::Made => {}
        }
    }
}

#[derive(Debug, Default)]
struct Totals {
    wins: [usize; 2],
    points: [u64; 2],
    marches: [u64; 2],
    euchres: [u64; 2],
    hands: u64,
    redeals: u64,
}

impl Totals {
    fn absorb(&mut self, row: &GameRow, winner: Team) {
        self.wins[winner.index()] += 1;
        for team in Team::BOTH {
            let idx = team.index();
            self.points[idx] += u64::from(row.scores[idx]);
            self.marches[idx] += u64::from(row.marches[idx]);
            self.euchres[idx] += u64::from(row.euchres[idx]);
        }
        self.hands += u64::from(row.hands);
        self.redeals += u64::from(row.redeals);
    }
}

impl GameRunner {
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let features = config.bot_features()?;
        Ok(Self {
            config,
            outputs,
            features,
        })
    }

    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(&self.outputs.jsonl)?;
        ensure_parent(&self.outputs.summary_md)?;

        let file = File::create(&self.outputs.jsonl)?;
        let mut writer = BufWriter::new(file);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(DEFAULT_SEED));

        let mut totals = Totals::default();
        let mut rows_written = 0usize;

        for game_index in 0..self.config.games.count {
            let seed = rng.next_u64();
            let (row, winner) = self.play_game(game_index, seed)?;
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;

            event!(
                target: "euchre_bench::game",
                Level::INFO,
                run_id = %self.config.run_id,
                game_index,
                seed,
                winner = %winner,
                scores = ?row.scores,
                hands = row.hands,
                redeals = row.redeals,
            );
            totals.absorb(&row, winner);
        }
        writer.flush()?;

        self.write_summary(&totals)?;

        Ok(RunSummary {
            games_played: self.config.games.count,
            rows_written,
            wins: totals.wins,
            hands_played: totals.hands,
            redeals: totals.redeals,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    fn play_game(&self, game_index: usize, seed: u64) -> Result<(GameRow, Team), RunnerError> {
        let engine_err = |source: EngineError| RunnerError::Engine {
            game_index,
            seed,
            source,
        };
        let config = EngineConfig::with_seed(seed).features(self.features);
        let mut game = GameController::new(config).map_err(engine_err)?;
        let first_dealer = game.dealer();
        let mut tally = GameTally::default();

        for _ in 0..MAX_STEPS_PER_GAME {
            match game.awaiting() {
                Awaiting::GameOver => break,
                Awaiting::Bid(Seat::South) => {
                    let choice = game.suggest_bid();
                    game.decide_bidding(choice).map_err(engine_err)?;
                }
                Awaiting::Discard(Seat::South) => {
                    let card = game
                        .suggest_discard()
                        .ok_or(EngineError::NoHeuristicChoice {
                            seat: Seat::South,
                            action: "discard",
                        })
                        .map_err(engine_err)?;
                    game.submit_human_discard(card).map_err(engine_err)?;
                }
                Awaiting::Play(Seat::South) => {
                    let card = game
                        .suggest_play()
                        .ok_or(EngineError::NoHeuristicChoice {
                            seat: Seat::South,
                            action: "play",
                        })
                        .map_err(engine_err)?;
                    let report = game.submit_human_play(card).map_err(engine_err)?;
                    if let Some(outcome) = report.outcome {
                        tally.record(outcome);
                    }
                }
                _ => {
                    for report in game.advance_computers().map_err(engine_err)? {
                        if let TurnReport::Play(play) = report
                            && let Some(outcome) = play.outcome
                        {
                            tally.record(outcome);
                        }
                    }
                }
            }
        }

        let Some(winner) = game.winner() else {
            return Err(RunnerError::Stalled { game_index, seed });
        };

        let row = GameRow {
            run_id: self.config.run_id.clone(),
            game_index,
            seed,
            first_dealer: first_dealer.to_string(),
            trump_scan: self.features.trump_scan().to_string(),
            winner: winner.to_string(),
            scores: game.scores(),
            hands: tally.hands,
            redeals: game.redeals(),
            marches: tally.marches,
            euchres: tally.euchres,
        };
        Ok((row, winner))
    }

    fn write_summary(&self, totals: &Totals) -> Result<(), RunnerError> {
        let games = self.config.games.count.max(1);
        let mut md = String::new();
        md.push_str(&format!("# Euchre Benchmark Summary: {}\n\n", self.config.run_id));
        let seed = self
            .config
            .games
            .seed
            .map_or_else(|| format!("default ({DEFAULT_SEED})"), |seed| seed.to_string());
        md.push_str(&format!("- Games: {}\n", self.config.games.count));
        md.push_str(&format!("- Seed: {seed}\n"));
        md.push_str(&format!("- Trump scan: {}\n", self.features.trump_scan()));
        md.push_str(&format!("- Hands played: {}\n", totals.hands));
        md.push_str(&format!("- Redeals: {}\n", totals.redeals));
        md.push_str(&format!(
            "- Avg hands per game: {:.2}\n\n",
            totals.hands as f64 / games as f64
        ));
        md.push_str("| Team | Wins | Win % | Avg Points | Marches | Euchres |\n");
        md.push_str("| --- | --- | --- | --- | --- | --- |\n");
        for team in Team::BOTH {
            let idx = team.index();
            md.push_str(&format!(
                "| {} | {} | {:.1} | {:.2} | {} | {} |\n",
                team,
                totals.wins[idx],
                totals.wins[idx] as f64 * 100.0 / games as f64,
                totals.points[idx] as f64 / games as f64,
                totals.marches[idx],
                totals.euchres[idx],
            ));
        }

        fs::write(&self.outputs.summary_md, md)?;
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

use std::fs;

use euchre_bench::config::BenchmarkConfig;
use euchre_bench::runner::GameRunner;
use tempfile::tempdir;

fn load_config(output_dir: &std::path::Path, scan: &str) -> BenchmarkConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
games:
  seed: 4242
  count: 3
bot:
  trump_scan: "{scan}"
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("games.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn run_once(scan: &str) -> (String, String) {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), scan);
    let outputs = config.resolved_outputs();

    let runner = GameRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("games complete");

    assert_eq!(summary.games_played, 3);
    assert_eq!(summary.rows_written, 3);
    assert_eq!(summary.wins[0] + summary.wins[1], 3);
    assert!(summary.hands_played >= 15);

    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    let md = fs::read_to_string(&summary.summary_path).expect("summary readable");
    (jsonl, md)
}

#[test]
fn smoke_run_writes_one_row_per_finished_game() {
    let (jsonl, md) = run_once("per-card");

    let rows: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    assert_eq!(rows.len(), 3);
    for (idx, row) in rows.iter().enumerate() {
        assert_eq!(row["run_id"], "test_smoke");
        assert_eq!(row["game_index"], idx as u64);
        assert_eq!(row["trump_scan"], "per-card");
        let scores: Vec<u64> = row["scores"]
            .as_array()
            .expect("scores array")
            .iter()
            .map(|v| v.as_u64().expect("score"))
            .collect();
        assert!(scores.iter().any(|&s| s >= 10));
        assert!(scores.iter().any(|&s| s < 10));
    }

    assert!(md.contains("# Euchre Benchmark Summary: test_smoke"));
    assert!(md.contains("| Team | Wins |"));
}

#[test]
fn same_seed_produces_identical_rows() {
    let (first, _) = run_once("suit-totals");
    let (second, _) = run_once("suit-totals");
    assert_eq!(first, second);
}

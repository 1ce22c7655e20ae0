use anyhow::Result;
use arcade_core::life::Pattern;
use arcade_core::{LifeConfig, WorldConfig};
use arcade_lab::benchmark::{resolve_pilots, run_benchmark, BenchmarkConfig};
use arcade_lab::life::{run_life, LifeRunConfig};
use arcade_lab::pilots::pilot_ids;
use arcade_lab::runner::{run_pilot, write_metrics, RunMetrics};
use std::fs;

#[test]
fn every_pilot_completes_a_short_run() -> Result<()> {
    for pilot in pilot_ids() {
        let metrics = run_pilot(pilot, 0xDEAD_BEEF, 5.0, 60, WorldConfig::default())?;
        assert_eq!(metrics.pilot_id, *pilot);
        assert_eq!(metrics.ticks, 300, "pilot={pilot}");
        assert!(metrics.best_score > 0.0, "pilot={pilot}");
        assert!(metrics.rocks_spawned > 0, "pilot={pilot}");
    }
    Ok(())
}

#[test]
fn pilots_are_deterministic_per_seed() -> Result<()> {
    for pilot in ["random", "dodger"] {
        let a = run_pilot(pilot, 0xC0FF_EE11, 20.0, 60, WorldConfig::default())?;
        let b = run_pilot(pilot, 0xC0FF_EE11, 20.0, 60, WorldConfig::default())?;
        assert_eq!(serde_json::to_value(&a)?, serde_json::to_value(&b)?, "pilot={pilot}");
    }
    Ok(())
}

#[test]
fn idle_pilot_never_presses_keys() -> Result<()> {
    let metrics = run_pilot("idle", 7, 3.0, 60, WorldConfig::default())?;
    assert_eq!(metrics.command_ticks, 0);
    assert_eq!(metrics.turn_ticks + metrics.thrust_ticks, 0);
    Ok(())
}

#[test]
fn spawns_are_counted_and_rng_state_recorded() -> Result<()> {
    // Two seconds is too short for any rock to reach the centred ship.
    let seed = 0x0BAD_5EED;
    let metrics = run_pilot("idle", seed, 2.0, 60, WorldConfig::default())?;
    assert!((3..=4).contains(&metrics.rocks_spawned), "spawned {}", metrics.rocks_spawned);
    assert_eq!(metrics.collisions, 0);
    assert_eq!(metrics.rocks_culled, 0);
    assert_eq!(metrics.rocks_on_field, metrics.rocks_spawned as usize);
    assert_ne!(metrics.final_rng_state, seed);

    let again = run_pilot("idle", seed, 2.0, 60, WorldConfig::default())?;
    assert_eq!(again.final_rng_state, metrics.final_rng_state);
    Ok(())
}

#[test]
fn bad_run_arguments_are_rejected() {
    assert!(run_pilot("warp-drive", 1, 1.0, 60, WorldConfig::default()).is_err());
    assert!(run_pilot("idle", 1, 0.0, 60, WorldConfig::default()).is_err());
    assert!(run_pilot("idle", 1, 1.0, 0, WorldConfig::default()).is_err());
    assert!(resolve_pilots(Some("idle,nobody")).is_err());
    assert!(resolve_pilots(Some(" , ")).is_err());
}

#[test]
fn metrics_file_round_trips() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("nested").join("run.json");
    let metrics = run_pilot("spinner", 3, 2.0, 60, WorldConfig::default())?;
    write_metrics(&path, &metrics)?;

    let loaded: RunMetrics = serde_json::from_slice(&fs::read(&path)?)?;
    assert_eq!(loaded.pilot_id, "spinner");
    assert_eq!(loaded.ticks, metrics.ticks);
    assert_eq!(loaded.command_ticks, metrics.command_ticks);
    Ok(())
}

#[test]
fn benchmark_writes_summary_and_csvs() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let report = run_benchmark(BenchmarkConfig {
        pilots: vec!["idle".to_string(), "spinner".to_string()],
        seeds: vec![0xDEAD_BEEF, 0xC0FF_EE11],
        seconds: 5.0,
        tick_hz: 60,
        world: WorldConfig::default(),
        out_dir: tmp.path().to_path_buf(),
        jobs: Some(2),
    })?;

    assert_eq!(report.run_count, 4);
    assert_eq!(report.pilot_rankings.len(), 2);
    assert!(report.pilot_rankings.iter().all(|p| p.runs == 2));
    assert!(tmp.path().join("summary.json").exists());

    let runs = fs::read_to_string(tmp.path().join("runs.csv"))?;
    assert_eq!(runs.lines().count(), 5);
    assert!(runs.starts_with("pilot_id,seed_hex,"));

    let rankings = fs::read_to_string(tmp.path().join("rankings.csv"))?;
    assert_eq!(rankings.lines().count(), 3);
    assert!(rankings.lines().nth(1).unwrap_or_default().starts_with("1,"));
    Ok(())
}

#[test]
fn benchmark_rejects_zero_jobs() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let result = run_benchmark(BenchmarkConfig {
        pilots: vec!["idle".to_string()],
        seeds: vec![1],
        seconds: 1.0,
        tick_hz: 60,
        world: WorldConfig::default(),
        out_dir: tmp.path().to_path_buf(),
        jobs: Some(0),
    });
    assert!(result.is_err());
    Ok(())
}

fn small_life() -> LifeConfig {
    LifeConfig {
        rows: 5,
        cols: 5,
        ..LifeConfig::default()
    }
}

#[test]
fn life_run_prints_final_board() -> Result<()> {
    let config = LifeRunConfig {
        life: small_life(),
        seed: 1,
        generations: 2,
        pattern: Some(Pattern::Blinker),
        every: None,
        json: false,
    };
    let mut out = Vec::new();
    let snapshot = run_life(&config, &mut out)?;

    assert_eq!(snapshot.generation, 2);
    assert_eq!(
        String::from_utf8(out)?,
        "generation=2 population=3\n.....\n.....\n.###.\n.....\n.....\n\n"
    );
    Ok(())
}

#[test]
fn life_run_prints_every_n_generations() -> Result<()> {
    let config = LifeRunConfig {
        life: small_life(),
        seed: 1,
        generations: 4,
        pattern: Some(Pattern::Blinker),
        every: Some(2),
        json: false,
    };
    let mut out = Vec::new();
    run_life(&config, &mut out)?;

    let text = String::from_utf8(out)?;
    let headers: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with("generation="))
        .collect();
    assert_eq!(
        headers,
        vec![
            "generation=0 population=3",
            "generation=2 population=3",
            "generation=4 population=3"
        ]
    );
    Ok(())
}

#[test]
fn life_run_emits_json_snapshot() -> Result<()> {
    let config = LifeRunConfig {
        life: small_life(),
        seed: 1,
        generations: 1,
        pattern: Some(Pattern::Blinker),
        every: None,
        json: true,
    };
    let mut out = Vec::new();
    run_life(&config, &mut out)?;

    let value: serde_json::Value = serde_json::from_slice(&out)?;
    assert_eq!(value["generation"], 1);
    assert_eq!(value["population"], 3);
    assert_eq!(value["grid"][2], "..#..");
    assert_eq!(value["running"], true);
    Ok(())
}

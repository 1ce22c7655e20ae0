use crate::pilots::pilot_ids;
use crate::runner::{run_pilot, RunMetrics};
use crate::util::seed_to_hex;
use anyhow::{anyhow, Context, Result};
use arcade_core::WorldConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub seconds: f64,
    pub tick_hz: u32,
    pub world: WorldConfig,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRecord {
    pub pilot_id: String,
    pub seed: u32,
    pub seed_hex: String,
    pub ticks: u64,
    pub final_score: f64,
    pub best_score: f64,
    pub collisions: u32,
    pub rocks_spawned: u32,
    pub rocks_culled: u32,
    pub command_ticks: u32,
    pub turn_ticks: u32,
    pub thrust_ticks: u32,
}

impl From<&RunMetrics> for RunRecord {
    fn from(metrics: &RunMetrics) -> Self {
        Self {
            pilot_id: metrics.pilot_id.clone(),
            seed: metrics.seed,
            seed_hex: seed_to_hex(metrics.seed),
            ticks: metrics.ticks,
            final_score: metrics.final_score,
            best_score: metrics.best_score,
            collisions: metrics.collisions,
            rocks_spawned: metrics.rocks_spawned,
            rocks_culled: metrics.rocks_culled,
            command_ticks: metrics.command_ticks,
            turn_ticks: metrics.turn_ticks,
            thrust_ticks: metrics.thrust_ticks,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PilotAggregate {
    pub pilot_id: String,
    pub runs: usize,
    pub avg_best_score: f64,
    pub max_best_score: f64,
    pub avg_final_score: f64,
    pub avg_collisions: f64,
    pub min_collisions: u32,
    /// Share of runs that never touched a rock.
    pub clean_run_rate: f64,
    pub avg_command_ticks: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub seconds: f64,
    pub tick_hz: u32,
    pub world: WorldConfig,
    pub jobs: Option<usize>,
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub run_count: usize,
    pub pilot_rankings: Vec<PilotAggregate>,
    pub runs: Vec<RunRecord>,
}

pub fn resolve_pilots(input: Option<&str>) -> Result<Vec<String>> {
    let Some(raw) = input else {
        return Ok(pilot_ids().iter().map(|id| (*id).to_string()).collect());
    };

    let pilots: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    if pilots.is_empty() {
        return Err(anyhow!("--pilots resolved to empty list"));
    }
    if let Some(unknown) = pilots.iter().find(|id| !pilot_ids().contains(&id.as_str())) {
        return Err(anyhow!(
            "unknown pilot '{unknown}' (available: {})",
            pilot_ids().join(", ")
        ));
    }
    Ok(pilots)
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if config.pilots.is_empty() {
        return Err(anyhow!("benchmark requires at least one pilot"));
    }
    if let Some(jobs) = config.jobs {
        if jobs == 0 {
            return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
        }
    }
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let run_jobs: Vec<(String, u32)> = config
        .pilots
        .iter()
        .flat_map(|pilot| config.seeds.iter().map(move |seed| (pilot.clone(), *seed)))
        .collect();

    tracing::info!(
        runs = run_jobs.len(),
        seconds = config.seconds,
        tick_hz = config.tick_hz,
        jobs = ?config.jobs,
        "starting benchmark"
    );

    let run_one = |(pilot_id, seed): &(String, u32)| -> Result<RunMetrics> {
        run_pilot(pilot_id, *seed, config.seconds, config.tick_hz, config.world)
            .with_context(|| format!("benchmark run failed for pilot={pilot_id} seed={seed:#x}"))
    };

    let run_results: Vec<Result<RunMetrics>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| run_jobs.par_iter().map(run_one).collect())
    } else {
        run_jobs.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }

    let mut rankings = aggregate(&runs);
    rankings.sort_by(|a, b| {
        b.avg_best_score
            .total_cmp(&a.avg_best_score)
            .then_with(|| a.avg_collisions.total_cmp(&b.avg_collisions))
            .then_with(|| a.pilot_id.cmp(&b.pilot_id))
    });

    let mut run_records: Vec<RunRecord> = runs.iter().map(RunRecord::from).collect();
    run_records.sort_by(|a, b| {
        b.best_score
            .total_cmp(&a.best_score)
            .then_with(|| a.collisions.cmp(&b.collisions))
            .then_with(|| a.pilot_id.cmp(&b.pilot_id))
            .then_with(|| a.seed.cmp(&b.seed))
    });

    write_runs_csv(&config.out_dir.join("runs.csv"), &run_records)?;
    write_rankings_csv(&config.out_dir.join("rankings.csv"), &rankings)?;

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        seconds: config.seconds,
        tick_hz: config.tick_hz,
        world: config.world,
        jobs: config.jobs,
        pilots: config.pilots,
        seeds: config.seeds,
        run_count: run_records.len(),
        pilot_rankings: rankings,
        runs: run_records,
    };

    let report_path = config.out_dir.join("summary.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary json")?,
    )
    .with_context(|| format!("failed writing {}", report_path.display()))?;

    tracing::info!(path = %report_path.display(), runs = report.run_count, "benchmark written");
    Ok(report)
}

fn aggregate(runs: &[RunMetrics]) -> Vec<PilotAggregate> {
    let mut grouped: HashMap<&str, Vec<&RunMetrics>> = HashMap::new();
    for run in runs {
        grouped.entry(run.pilot_id.as_str()).or_default().push(run);
    }

    grouped
        .into_iter()
        .map(|(pilot_id, pilot_runs)| {
            let count = pilot_runs.len() as f64;
            let sum_best: f64 = pilot_runs.iter().map(|r| r.best_score).sum();
            let sum_final: f64 = pilot_runs.iter().map(|r| r.final_score).sum();
            let sum_collisions: u64 = pilot_runs.iter().map(|r| u64::from(r.collisions)).sum();
            let sum_commands: u64 = pilot_runs.iter().map(|r| u64::from(r.command_ticks)).sum();
            let clean_runs = pilot_runs.iter().filter(|r| r.collisions == 0).count();

            PilotAggregate {
                pilot_id: pilot_id.to_string(),
                runs: pilot_runs.len(),
                avg_best_score: sum_best / count,
                max_best_score: pilot_runs
                    .iter()
                    .map(|r| r.best_score)
                    .fold(0.0, f64::max),
                avg_final_score: sum_final / count,
                avg_collisions: sum_collisions as f64 / count,
                min_collisions: pilot_runs
                    .iter()
                    .map(|r| r.collisions)
                    .min()
                    .unwrap_or_default(),
                clean_run_rate: clean_runs as f64 / count,
                avg_command_ticks: sum_commands as f64 / count,
            }
        })
        .collect()
}

fn write_runs_csv(path: &Path, rows: &[RunRecord]) -> Result<()> {
    let mut csv = String::from(
        "pilot_id,seed_hex,seed,ticks,final_score,best_score,collisions,rocks_spawned,rocks_culled,command_ticks,turn_ticks,thrust_ticks\n",
    );
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{:.4},{:.4},{},{},{},{},{},{}\n",
            row.pilot_id,
            row.seed_hex,
            row.seed,
            row.ticks,
            row.final_score,
            row.best_score,
            row.collisions,
            row.rocks_spawned,
            row.rocks_culled,
            row.command_ticks,
            row.turn_ticks,
            row.thrust_ticks
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}

fn write_rankings_csv(path: &Path, rows: &[PilotAggregate]) -> Result<()> {
    let mut csv = String::from(
        "rank,pilot_id,runs,avg_best_score,max_best_score,avg_final_score,avg_collisions,min_collisions,clean_run_rate,avg_command_ticks\n",
    );
    for (idx, row) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{:.4},{:.4},{:.4},{:.3},{},{:.3},{:.1}\n",
            idx + 1,
            row.pilot_id,
            row.runs,
            row.avg_best_score,
            row.max_best_score,
            row.avg_final_score,
            row.avg_collisions,
            row.min_collisions,
            row.clean_run_rate,
            row.avg_command_ticks
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}

use crate::pilots::{create_pilot, Pilot};
use anyhow::{anyhow, Context, Result};
use arcade_core::{ShipCommand, World, WorldConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunMetrics {
    pub pilot_id: String,
    pub seed: u32,
    pub tick_hz: u32,
    pub ticks: u64,
    pub seconds: f64,
    pub final_score: f64,
    pub best_score: f64,
    pub collisions: u32,
    pub rocks_spawned: u32,
    pub rocks_culled: u32,
    pub rocks_on_field: usize,
    pub command_ticks: u32,
    pub turn_ticks: u32,
    pub thrust_ticks: u32,
    pub final_rng_state: u32,
}

pub fn run_pilot(
    pilot_id: &str,
    seed: u32,
    seconds: f64,
    tick_hz: u32,
    config: WorldConfig,
) -> Result<RunMetrics> {
    let mut pilot = create_pilot(pilot_id).ok_or_else(|| anyhow!("unknown pilot '{pilot_id}'"))?;
    run_pilot_instance(pilot.as_mut(), seed, seconds, tick_hz, config)
}

pub fn run_pilot_instance(
    pilot: &mut dyn Pilot,
    seed: u32,
    seconds: f64,
    tick_hz: u32,
    config: WorldConfig,
) -> Result<RunMetrics> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(anyhow!("seconds must be > 0, got {seconds}"));
    }
    if tick_hz == 0 {
        return Err(anyhow!("tick rate must be > 0 Hz"));
    }

    pilot.reset(seed);
    let mut world = World::new(config, seed)
        .with_context(|| format!("invalid world configuration for seed={seed:#x}"))?;

    let dt = 1.0 / f64::from(tick_hz);
    let ticks = (seconds * f64::from(tick_hz)).round().max(1.0) as u64;

    let mut metrics = RunMetrics {
        pilot_id: pilot.id().to_string(),
        seed,
        tick_hz,
        ticks,
        seconds: ticks as f64 * dt,
        final_score: 0.0,
        best_score: 0.0,
        collisions: 0,
        rocks_spawned: 0,
        rocks_culled: 0,
        rocks_on_field: 0,
        command_ticks: 0,
        turn_ticks: 0,
        thrust_ticks: 0,
        final_rng_state: 0,
    };

    for _ in 0..ticks {
        if let Some(command) = pilot.next_command(&world) {
            metrics.command_ticks += 1;
            match command {
                ShipCommand::RotateLeft | ShipCommand::RotateRight => metrics.turn_ticks += 1,
                ShipCommand::FireEngine => metrics.thrust_ticks += 1,
            }
            world.push_command(command);
        }

        let report = world.tick(dt);
        if report.collided {
            tracing::debug!(
                pilot = metrics.pilot_id.as_str(),
                seed,
                tick = world.tick_count(),
                rocks = world.rocks().len(),
                "ship hit a rock"
            );
        }
        if let Some(rock_id) = report.spawned {
            metrics.rocks_spawned += 1;
            tracing::debug!(
                pilot = metrics.pilot_id.as_str(),
                seed,
                tick = world.tick_count(),
                rock_id,
                rocks = world.rocks().len(),
                "rock spawned"
            );
        }
        metrics.rocks_culled += report.culled as u32;
    }

    metrics.final_score = world.score();
    metrics.best_score = world.best_score();
    metrics.collisions = world.collisions();
    metrics.rocks_on_field = world.rocks().len();
    metrics.final_rng_state = world.rng_state();
    Ok(metrics)
}

pub fn write_metrics(path: &Path, metrics: &RunMetrics) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating {}", parent.display()))?;
        }
    }
    let bytes = serde_json::to_vec_pretty(metrics).context("failed to serialize run metrics")?;
    fs::write(path, bytes).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

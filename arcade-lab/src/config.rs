use std::env;

use arcade_core::asteroids::Bounds;
use arcade_core::constants::{ASTEROIDS_TICK_HZ, LIFE_STEP_SECONDS};
use arcade_core::{CollisionPolicy, LifeConfig, WorldConfig};

pub const ENV_LIFE_ROWS: &str = "ARCADE_LIFE_ROWS";
pub const ENV_LIFE_COLS: &str = "ARCADE_LIFE_COLS";
pub const ENV_LIFE_TICK_MS: &str = "ARCADE_LIFE_TICK_MS";
pub const ENV_ASTEROIDS_HZ: &str = "ARCADE_ASTEROIDS_HZ";
pub const ENV_WORLD_WIDTH: &str = "ARCADE_WORLD_WIDTH";
pub const ENV_WORLD_HEIGHT: &str = "ARCADE_WORLD_HEIGHT";
pub const ENV_COLLISION_POLICY: &str = "ARCADE_COLLISION_POLICY";

/// Compiled defaults with environment overrides applied. CLI flags are
/// layered on top by the caller.
#[derive(Debug, Clone, Copy)]
pub struct LabSettings {
    pub life: LifeConfig,
    pub world: WorldConfig,
    pub tick_hz: u32,
}

impl Default for LabSettings {
    fn default() -> Self {
        Self {
            life: LifeConfig::default(),
            world: WorldConfig::default(),
            tick_hz: ASTEROIDS_TICK_HZ,
        }
    }
}

impl LabSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let mut life = defaults.life;
        life.rows = read_usize(&lookup, ENV_LIFE_ROWS, life.rows);
        life.cols = read_usize(&lookup, ENV_LIFE_COLS, life.cols);
        let default_ms = (LIFE_STEP_SECONDS * 1_000.0).round() as u32;
        let tick_ms = read_u32(&lookup, ENV_LIFE_TICK_MS, default_ms);
        life.step_seconds = f64::from(tick_ms) / 1_000.0;

        let mut world = defaults.world;
        let width = read_f64(&lookup, ENV_WORLD_WIDTH, world.bounds.width);
        let height = read_f64(&lookup, ENV_WORLD_HEIGHT, world.bounds.height);
        match Bounds::new(world.bounds.x, world.bounds.y, width, height) {
            Ok(bounds) => world.bounds = bounds,
            Err(err) => tracing::warn!(
                "{} / {} rejected ({}). Falling back to defaults.",
                ENV_WORLD_WIDTH,
                ENV_WORLD_HEIGHT,
                err
            ),
        }

        if let Some(raw) = lookup(ENV_COLLISION_POLICY) {
            match CollisionPolicy::from_name(&raw) {
                Some(policy) => world.collision_policy = policy,
                None => tracing::warn!(
                    "{} has unknown value {:?}. Keeping {}.",
                    ENV_COLLISION_POLICY,
                    raw,
                    world.collision_policy.as_str()
                ),
            }
        }

        Self {
            life,
            world,
            tick_hz: read_u32(&lookup, ENV_ASTEROIDS_HZ, defaults.tick_hz),
        }
    }
}

fn read_usize(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: usize) -> usize {
    lookup(name)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn read_u32(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u32) -> u32 {
    lookup(name)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn read_f64(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: f64) -> f64 {
    lookup(name)
        .and_then(|value| value.trim().parse::<f64>().ok())
        .unwrap_or(default)
}

use anyhow::{anyhow, Context, Result};
use arcade_core::life::Pattern;
use arcade_core::{CollisionPolicy, Density};
use arcade_lab::benchmark::{resolve_pilots, run_benchmark, BenchmarkConfig};
use arcade_lab::config::LabSettings;
use arcade_lab::life::{run_life, LifeRunConfig};
use arcade_lab::pilots::{create_pilot, describe_pilots, pilot_ids};
use arcade_lab::runner::{run_pilot, write_metrics};
use arcade_lab::util::{parse_seed, resolve_seeds, seed_to_hex};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "arcade-lab")]
#[command(about = "Headless driver for the Life and asteroid-avoidance cores")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run Conway's Game of Life and print the board as text
    Life {
        #[arg(long)]
        rows: Option<usize>,
        #[arg(long)]
        cols: Option<usize>,
        /// Each cell starts alive with probability 1/DENSITY
        #[arg(long)]
        density: Option<String>,
        #[arg(long, default_value = "0x1ee7")]
        seed: String,
        #[arg(long, default_value_t = 10)]
        generations: u32,
        /// Stamp a named pattern on a clear board instead of seeding randomly
        #[arg(long)]
        pattern: Option<String>,
        /// Print the board every N generations
        #[arg(long)]
        every: Option<u32>,
        /// Print the final snapshot as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Asteroid-avoidance runs driven by scripted pilots
    Asteroids {
        #[command(subcommand)]
        command: AsteroidsCommands,
    },
    /// List available pilots
    Pilots,
}

#[derive(Subcommand, Debug)]
enum AsteroidsCommands {
    /// Run one seeded world with one pilot
    Run {
        #[arg(long, default_value = "idle")]
        pilot: String,
        #[arg(long, default_value = "0x1ee7")]
        seed: String,
        #[arg(long, default_value_t = 60.0)]
        seconds: f64,
        #[command(flatten)]
        world: WorldArgs,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run every pilot against every seed
    Benchmark {
        #[arg(long)]
        pilots: Option<String>,
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[arg(long, default_value_t = 60.0)]
        seconds: f64,
        #[command(flatten)]
        world: WorldArgs,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long)]
        jobs: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct WorldArgs {
    #[arg(long)]
    tick_hz: Option<u32>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long, value_enum)]
    collision: Option<CliCollision>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliCollision {
    SoftReset,
    ClearRocks,
}

impl From<CliCollision> for CollisionPolicy {
    fn from(value: CliCollision) -> Self {
        match value {
            CliCollision::SoftReset => CollisionPolicy::SoftReset,
            CliCollision::ClearRocks => CollisionPolicy::ClearRocks,
        }
    }
}

impl WorldArgs {
    /// Flags override whatever the environment set.
    fn apply(&self, settings: &mut LabSettings) {
        if let Some(hz) = self.tick_hz {
            settings.tick_hz = hz;
        }
        if let Some(width) = self.width {
            settings.world.bounds.width = width;
        }
        if let Some(height) = self.height {
            settings.world.bounds.height = height;
        }
        if let Some(policy) = self.collision {
            settings.world.collision_policy = policy.into();
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let Cli { command } = Cli::parse();
    let mut settings = LabSettings::from_env();

    match command {
        Commands::Life {
            rows,
            cols,
            density,
            seed,
            generations,
            pattern,
            every,
            json,
        } => {
            if let Some(rows) = rows {
                settings.life.rows = rows;
            }
            if let Some(cols) = cols {
                settings.life.cols = cols;
            }
            if let Some(text) = density {
                settings.life.density =
                    Density::parse(&text).with_context(|| format!("invalid --density {text:?}"))?;
            }
            let pattern = pattern
                .map(|name| name.parse::<Pattern>())
                .transpose()
                .context("invalid --pattern")?;

            let config = LifeRunConfig {
                life: settings.life,
                seed: parse_seed(&seed)?,
                generations,
                pattern,
                every,
                json,
            };
            let stdout = io::stdout();
            run_life(&config, &mut stdout.lock())?;
        }
        Commands::Asteroids { command } => match command {
            AsteroidsCommands::Run {
                pilot,
                seed,
                seconds,
                world,
                output,
            } => {
                if create_pilot(&pilot).is_none() {
                    let available = pilot_ids().join(", ");
                    return Err(anyhow!("unknown pilot '{pilot}'. available: {available}"));
                }
                world.apply(&mut settings);
                let seed = parse_seed(&seed)?;

                tracing::info!(
                    pilot = pilot.as_str(),
                    seed = %seed_to_hex(seed),
                    seconds,
                    tick_hz = settings.tick_hz,
                    "starting asteroids run"
                );
                let metrics = run_pilot(&pilot, seed, seconds, settings.tick_hz, settings.world)?;
                tracing::info!(
                    best_score = metrics.best_score,
                    collisions = metrics.collisions,
                    "asteroids run finished"
                );

                if let Some(path) = output {
                    write_metrics(&path, &metrics)?;
                    println!("output={}", path.display());
                } else {
                    println!("{}", serde_json::to_string_pretty(&metrics)?);
                }
            }
            AsteroidsCommands::Benchmark {
                pilots,
                seeds,
                seed_start,
                seed_count,
                seconds,
                world,
                out_dir,
                jobs,
            } => {
                world.apply(&mut settings);
                let pilots = resolve_pilots(pilots.as_deref())?;
                let seeds = resolve_seeds(seeds.as_deref(), seed_start.as_deref(), seed_count)?;
                let out_dir = out_dir.unwrap_or_else(|| {
                    PathBuf::from(format!("benchmarks/asteroids-{}", timestamp_suffix()))
                });

                let report = run_benchmark(BenchmarkConfig {
                    pilots,
                    seeds,
                    seconds,
                    tick_hz: settings.tick_hz,
                    world: settings.world,
                    out_dir: out_dir.clone(),
                    jobs,
                })?;

                println!("runs={}", report.run_count);
                println!(
                    "jobs={}",
                    report
                        .jobs
                        .map(|value| value.to_string())
                        .unwrap_or_else(|| "auto".to_string())
                );
                println!("out_dir={}", out_dir.display());
                println!("rankings:");
                for (idx, pilot) in report.pilot_rankings.iter().enumerate() {
                    println!(
                        "  {}. {:10} avg_best={:.2}s max_best={:.2}s avg_collisions={:.1} clean={:.0}%",
                        idx + 1,
                        pilot.pilot_id,
                        pilot.avg_best_score,
                        pilot.max_best_score,
                        pilot.avg_collisions,
                        pilot.clean_run_rate * 100.0,
                    );
                }
            }
        },
        Commands::Pilots => {
            for (id, description) in describe_pilots() {
                println!("{id:10} {description}");
            }
        }
    }

    Ok(())
}

fn timestamp_suffix() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{now}")
}

use anyhow::{anyhow, Context, Result};
use arcade_core::life::Pattern;
use arcade_core::{LifeConfig, LifeInput, LifeSession, LifeSnapshot};
use std::io::Write;

#[derive(Clone, Debug)]
pub struct LifeRunConfig {
    pub life: LifeConfig,
    pub seed: u32,
    pub generations: u32,
    /// Replaces the random seeding with a centred pattern on a clear board.
    pub pattern: Option<Pattern>,
    /// Print the board every N generations. `None` prints only the last one.
    pub every: Option<u32>,
    pub json: bool,
}

/// Runs a headless session one step interval at a time and writes boards to `out`.
pub fn run_life(config: &LifeRunConfig, out: &mut impl Write) -> Result<LifeSnapshot> {
    if config.every == Some(0) {
        return Err(anyhow!("--every must be >= 1 when provided"));
    }

    let mut session = LifeSession::new(config.life, config.seed).with_context(|| {
        format!(
            "invalid life configuration {}x{}",
            config.life.rows, config.life.cols
        )
    })?;
    if let Some(pattern) = config.pattern {
        session.push(LifeInput::Stamp(pattern));
    }

    tracing::info!(
        rows = config.life.rows,
        cols = config.life.cols,
        density = config.life.density.value(),
        seed = config.seed,
        pattern = ?config.pattern,
        generations = config.generations,
        "starting life run"
    );

    let step = session.advance(0.0);
    if let Some(err) = step.rejected.first() {
        return Err(anyhow!("life setup rejected: {err}"));
    }
    if config.every.is_some() && !config.json {
        write_board(out, &session.snapshot())?;
    }

    for _ in 0..config.generations {
        let step = session.advance(config.life.step_seconds);
        if step.generations == 0 {
            return Err(anyhow!(
                "life ticker stalled at generation {}",
                session.board().generation()
            ));
        }
        let generation = session.board().generation();
        if let Some(every) = config.every {
            if !config.json && generation % every == 0 {
                write_board(out, &session.snapshot())?;
            }
        }
    }

    let snapshot = session.snapshot();
    if config.json {
        serde_json::to_writer_pretty(&mut *out, &snapshot)
            .context("failed to serialize life snapshot")?;
        writeln!(out)?;
    } else if config.every.is_none() {
        write_board(out, &snapshot)?;
    }

    tracing::info!(
        generation = snapshot.generation,
        population = snapshot.population,
        "life run finished"
    );
    Ok(snapshot)
}

fn write_board(out: &mut impl Write, snapshot: &LifeSnapshot) -> Result<()> {
    writeln!(
        out,
        "generation={} population={}",
        snapshot.generation, snapshot.population
    )?;
    for row in &snapshot.grid {
        writeln!(out, "{row}")?;
    }
    writeln!(out)?;
    Ok(())
}

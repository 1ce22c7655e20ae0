use crate::clock::Ticker;
use crate::error::ArcadeError;
use crate::input::{InputQueue, LifeInput};
use crate::rng::SeededRng;

use super::{Density, LifeBoard, LifeConfig, LifeSnapshot, Pattern};

const RUNNING_LABEL: &str = "Pause";
const PAUSED_LABEL: &str = "Resume";

/// Outcome of one [`LifeSession::advance`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStep {
    pub generations: u32,
    /// Events refused during the drain, in arrival order. The board is left
    /// as it was for each of them.
    pub rejected: Vec<ArcadeError>,
}

/// Board plus the host-facing controls: ticker, density field and queue.
#[derive(Clone, Debug)]
pub struct LifeSession {
    board: LifeBoard,
    ticker: Ticker,
    rng: SeededRng,
    density: Density,
    inputs: InputQueue<LifeInput>,
}

impl LifeSession {
    /// Allocates the board and seeds it once, like the desktop build on launch.
    pub fn new(config: LifeConfig, seed: u32) -> Result<Self, ArcadeError> {
        let mut session = Self {
            board: LifeBoard::new(config.rows, config.cols)?,
            ticker: Ticker::new(config.step_seconds)?,
            rng: SeededRng::new(seed),
            density: config.density,
            inputs: InputQueue::new(),
        };
        session.board.restart(session.density, &mut session.rng);
        Ok(session)
    }

    #[inline]
    pub fn board(&self) -> &LifeBoard {
        &self.board
    }

    #[inline]
    pub fn density(&self) -> Density {
        self.density
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Caption for the run/pause button.
    pub fn run_label(&self) -> &'static str {
        if self.ticker.is_running() {
            RUNNING_LABEL
        } else {
            PAUSED_LABEL
        }
    }

    pub fn push(&mut self, input: LifeInput) {
        self.inputs.push(input);
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool, ArcadeError> {
        self.board.toggle(row, col)
    }

    /// Validates the density text before touching the board.
    pub fn restart(&mut self, density_text: &str) -> Result<(), ArcadeError> {
        let density = Density::parse(density_text)?;
        self.density = density;
        self.board.restart(density, &mut self.rng);
        Ok(())
    }

    pub fn toggle_running(&mut self) -> bool {
        self.ticker.toggle()
    }

    pub fn pause(&mut self) {
        self.ticker.stop();
    }

    pub fn resume(&mut self) {
        self.ticker.start();
    }

    pub fn clear(&mut self) {
        self.board.clear();
    }

    pub fn stamp(&mut self, pattern: Pattern) {
        self.board.stamp(pattern);
    }

    fn apply(&mut self, input: LifeInput) -> Result<(), ArcadeError> {
        match input {
            LifeInput::Toggle { row, col } => self.toggle_cell(row, col).map(|_| ()),
            LifeInput::Restart(text) => self.restart(&text),
            LifeInput::ToggleRunning => {
                self.toggle_running();
                Ok(())
            }
            LifeInput::Clear => {
                self.clear();
                Ok(())
            }
            LifeInput::Stamp(pattern) => {
                self.stamp(pattern);
                Ok(())
            }
        }
    }

    /// Drains queued input, then runs every generation the ticker says is due.
    pub fn advance(&mut self, dt: f64) -> SessionStep {
        let mut step = SessionStep::default();

        let pending: Vec<LifeInput> = self.inputs.drain().collect();
        for input in pending {
            if let Err(err) = self.apply(input) {
                step.rejected.push(err);
            }
        }

        step.generations = self.ticker.advance(dt);
        for _ in 0..step.generations {
            self.board.update();
        }
        step
    }

    pub fn snapshot(&self) -> LifeSnapshot {
        self.board.snapshot(self.is_running())
    }
}

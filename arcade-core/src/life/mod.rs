use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{LIFE_COLS, LIFE_DEFAULT_DENSITY, LIFE_ROWS, LIFE_STEP_SECONDS};
use crate::error::ArcadeError;
use crate::rng::SeededRng;

mod pattern;
mod session;

pub use pattern::Pattern;
pub use session::{LifeSession, SessionStep};

const ALIVE_GLYPH: char = '#';
const DEAD_GLYPH: char = '.';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Cell {
    alive: bool,
    alive_nearby: u8,
}

/// Seeding density: on restart each cell is alive with probability `1 / value`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Density(f64);

impl Density {
    pub fn new(value: f64) -> Result<Self, ArcadeError> {
        if !value.is_finite() || value < 1.0 {
            return Err(ArcadeError::DensityOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Validates the raw text of the density field.
    pub fn parse(input: &str) -> Result<Self, ArcadeError> {
        let value = input
            .trim()
            .parse::<f64>()
            .map_err(|_| ArcadeError::MalformedDensity {
                input: input.to_string(),
            })?;
        Self::new(value)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn probability(self) -> f64 {
        1.0 / self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self(LIFE_DEFAULT_DENSITY)
    }
}

impl FromStr for Density {
    type Err = ArcadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<f64> for Density {
    type Error = ArcadeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Density> for f64 {
    fn from(density: Density) -> Self {
        density.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LifeConfig {
    pub rows: usize,
    pub cols: usize,
    pub step_seconds: f64,
    pub density: Density,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rows: LIFE_ROWS,
            cols: LIFE_COLS,
            step_seconds: LIFE_STEP_SECONDS,
            density: Density::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub generation: u32,
    pub population: usize,
    pub running: bool,
    /// One string per row, `#` alive and `.` dead.
    pub grid: Vec<String>,
}

/// Fixed-size Conway board without wraparound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeBoard {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    generation: u32,
}

impl LifeBoard {
    pub fn new(rows: usize, cols: usize) -> Result<Self, ArcadeError> {
        if rows == 0 || cols == 0 {
            return Err(ArcadeError::EmptyGrid);
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
            generation: 0,
        })
    }

    /// Builds a board from text rows, `#` marking live cells.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ArcadeError> {
        let cols = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut board = Self::new(rows.len(), cols)?;
        for (row, line) in rows.iter().enumerate() {
            for (col, glyph) in line.chars().enumerate() {
                if glyph == ALIVE_GLYPH {
                    board.cells[row * cols + col].alive = true;
                }
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize, ArcadeError> {
        self.index(row, col).ok_or(ArcadeError::CellOutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// `false` for positions outside the board.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.index(row, col)
            .map(|index| self.cells[index].alive)
            .unwrap_or(false)
    }

    /// Neighbor count left by the most recent refresh pass.
    pub fn neighbor_count(&self, row: usize, col: usize) -> Option<u8> {
        self.index(row, col).map(|index| self.cells[index].alive_nearby)
    }

    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) -> Result<(), ArcadeError> {
        let index = self.checked_index(row, col)?;
        self.cells[index].alive = alive;
        Ok(())
    }

    /// Flips one cell outside the rule engine. Returns the new state.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool, ArcadeError> {
        let index = self.checked_index(row, col)?;
        let cell = &mut self.cells[index];
        cell.alive = !cell.alive;
        Ok(cell.alive)
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    /// Recomputes every cell's alive-neighbor count from the current states.
    pub fn refresh_counts(&mut self) {
        for row in 0..self.rows {
            let row_min = row.saturating_sub(1);
            let row_max = (row + 1).min(self.rows - 1);
            for col in 0..self.cols {
                let col_min = col.saturating_sub(1);
                let col_max = (col + 1).min(self.cols - 1);

                let mut count = 0u8;
                for neighbor_row in row_min..=row_max {
                    for neighbor_col in col_min..=col_max {
                        if (neighbor_row, neighbor_col) != (row, col)
                            && self.cells[neighbor_row * self.cols + neighbor_col].alive
                        {
                            count += 1;
                        }
                    }
                }
                self.cells[row * self.cols + col].alive_nearby = count;
            }
        }
    }

    /// Advances one generation. All counts settle before any state changes.
    pub fn update(&mut self) {
        self.refresh_counts();
        for cell in &mut self.cells {
            cell.alive = match (cell.alive, cell.alive_nearby) {
                (true, 2) | (true, 3) => true, // survival
                (false, 3) => true,            // birth
                _ => false,
            };
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Reseeds every cell independently with probability `1 / density`.
    pub fn restart(&mut self, density: Density, rng: &mut SeededRng) {
        let probability = density.probability();
        for cell in &mut self.cells {
            *cell = Cell {
                alive: rng.chance(probability),
                alive_nearby: 0,
            };
        }
        self.generation = 0;
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.generation = 0;
    }

    /// Clears the board and places `pattern` at its centre. Cells that do not
    /// fit are dropped.
    pub fn stamp(&mut self, pattern: Pattern) {
        self.clear();

        let (height, width) = pattern.extent();
        let top = (self.rows as isize - height as isize) / 2;
        let left = (self.cols as isize - width as isize) / 2;
        for &(dr, dc) in pattern.cells() {
            let row = top + dr as isize;
            let col = left + dc as isize;
            if row < 0 || col < 0 {
                continue;
            }
            if let Some(index) = self.index(row as usize, col as usize) {
                self.cells[index].alive = true;
            }
        }
    }

    pub fn row_text(&self, row: usize) -> String {
        (0..self.cols)
            .map(|col| {
                if self.is_alive(row, col) {
                    ALIVE_GLYPH
                } else {
                    DEAD_GLYPH
                }
            })
            .collect()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            out.push_str(&self.row_text(row));
            out.push('\n');
        }
        out
    }

    pub fn snapshot(&self, running: bool) -> LifeSnapshot {
        LifeSnapshot {
            rows: self.rows,
            cols: self.cols,
            generation: self.generation,
            population: self.population(),
            running,
            grid: (0..self.rows).map(|row| self.row_text(row)).collect(),
        }
    }
}

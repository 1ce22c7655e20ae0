use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArcadeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    Blinker,
    Toad,
    Beacon,
    Glider,
    RPentomino,
}

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Blinker,
        Pattern::Toad,
        Pattern::Beacon,
        Pattern::Glider,
        Pattern::RPentomino,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Blinker => "blinker",
            Self::Toad => "toad",
            Self::Beacon => "beacon",
            Self::Glider => "glider",
            Self::RPentomino => "r-pentomino",
        }
    }

    /// Live cells as `(row, col)` offsets from the pattern's top-left corner.
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            Self::Blinker => &[(0, 0), (0, 1), (0, 2)],
            Self::Toad => &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
            Self::Beacon => &[
                (0, 0),
                (0, 1),
                (1, 0),
                (1, 1),
                (2, 2),
                (2, 3),
                (3, 2),
                (3, 3),
            ],
            Self::Glider => &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
            Self::RPentomino => &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
        }
    }

    /// `(height, width)` of the bounding box.
    pub fn extent(self) -> (usize, usize) {
        self.cells()
            .iter()
            .fold((0, 0), |(height, width), &(row, col)| {
                (height.max(row + 1), width.max(col + 1))
            })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = ArcadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.name() == wanted)
            .ok_or_else(|| ArcadeError::UnknownPattern {
                name: s.to_string(),
            })
    }
}

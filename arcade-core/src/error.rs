use core::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ArcadeError {
    MalformedDensity { input: String },
    DensityOutOfRange { value: f64 },
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    EmptyGrid,
    InvalidBounds { width: f64, height: f64 },
    InvalidSize { what: &'static str, size: f64 },
    UnknownPattern { name: String },
    InvalidInterval { seconds: f64 },
}

impl fmt::Display for ArcadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedDensity { input } => {
                write!(f, "density must be a number, got {input:?}")
            }
            Self::DensityOutOfRange { value } => {
                write!(f, "density must be a finite number >= 1, got {value}")
            }
            Self::CellOutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "cell ({row}, {col}) is outside the {rows}x{cols} board"
            ),
            Self::EmptyGrid => write!(f, "board needs at least one row and one column"),
            Self::InvalidBounds { width, height } => write!(
                f,
                "play area must have a positive finite size, got {width}x{height}"
            ),
            Self::InvalidSize { what, size } => {
                write!(f, "{what} size must be positive and finite, got {size}")
            }
            Self::UnknownPattern { name } => write!(f, "unknown pattern: {name}"),
            Self::InvalidInterval { seconds } => {
                write!(f, "tick interval must be positive and finite, got {seconds}s")
            }
        }
    }
}

impl std::error::Error for ArcadeError {}

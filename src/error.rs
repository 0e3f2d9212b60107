use crate::algorithms::common::SearchError;
use thiserror::Error;

/// Crate-level error for everything outside the search itself.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("grid size must be positive")]
    InvalidGridSize,

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("invalid position '{0}', expected 'x,y'")]
    InvalidPosition(String),

    #[error("scenario error: {0}")]
    Scenario(String),

    #[error("a {grid_size}x{grid_size} grid is too large to plot, even with {cell_px}px cells")]
    PlotTooLarge { grid_size: usize, cell_px: u32 },

    #[error("plot font could not be parsed")]
    InvalidFont,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type PlanResult<T> = Result<T, PlanError>;

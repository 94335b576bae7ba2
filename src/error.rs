//! Startup and configuration errors
//!
//! Gameplay itself never fails: an empty target set is an expected state and
//! game over is a phase. Only startup can go wrong, and when it does the shell
//! shows a banner and the game does not start.

use std::fmt;

/// Invalid tuning override
#[derive(Debug)]
pub enum TuningError {
    /// The override block is not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    OutOfRange {
        field: &'static str,
        value: f64,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning is not valid JSON: {e}"),
            TuningError::OutOfRange { field, value } => {
                write!(f, "tuning field `{field}` out of range: {value}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Failure to bring up the game
#[derive(Debug)]
pub enum InitError {
    /// A required DOM element is missing from the page
    MissingElement { id: &'static str },
    /// The 3D die presenter could not be constructed (e.g. no 3D runtime)
    RendererUnavailable { reason: String },
    /// Tuning override rejected
    Tuning(TuningError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::MissingElement { id } => write!(f, "missing page element #{id}"),
            InitError::RendererUnavailable { reason } => {
                write!(f, "could not start the die renderer: {reason}")
            }
            InitError::Tuning(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::Tuning(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TuningError> for InitError {
    fn from(e: TuningError) -> Self {
        InitError::Tuning(e)
    }
}

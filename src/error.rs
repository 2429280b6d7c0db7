//! Simulation-specific error types.
//!
//! The simulation core is pure math over pre-validated fixed-capacity buffers
//! and has no recoverable errors; everything here exists for the persistence
//! layer, which is the only part of the demo that touches the outside world.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error enum for the emberfall sandbox.
#[derive(Debug)]
pub enum SimError {
    /// Reading or writing the obstacle save file failed for a reason other
    /// than the file not existing (a missing file on load is a no-op, not an
    /// error).
    Io {
        /// Path of the file being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The save file's header (capacity or count line) did not parse.
    MalformedSave {
        /// Path of the offending file.
        path: PathBuf,
        /// 1-based line number of the first unparseable header line.
        line: usize,
    },

    /// The save file declared an obstacle capacity outside the acceptable
    /// range: non-positive capacities cannot back a ring buffer, and
    /// oversized ones would size an unbounded up-front allocation.
    InvalidCapacity {
        /// The capacity value found in the file.
        found: i64,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Io { path, source } => {
                write!(f, "obstacle file '{}': {}", path.display(), source)
            }
            SimError::MalformedSave { path, line } => write!(
                f,
                "obstacle file '{}': malformed header at line {}",
                path.display(),
                line
            ),
            SimError::InvalidCapacity { found } => {
                write!(
                    f,
                    "obstacle file declares capacity {found}, need 1..={}",
                    crate::constants::MAX_LOADED_CAPACITY
                )
            }
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

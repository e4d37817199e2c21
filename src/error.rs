//! Error types for spatial cluster scanning.

use std::fmt;

/// Errors that can occur while preparing or running a scan.
///
/// The clustering engine itself is infallible over valid inputs; every
/// variant here is produced by input validation or by the point-file loader
/// used by the CLI drivers.
#[derive(Debug, Clone)]
pub enum ScanError {
    /// A point set required by the scan is empty. The name identifies which
    /// one ("events", "background", "cases", "controls", "points").
    EmptyPointSet(&'static str),

    /// Search radius must be strictly positive and finite.
    InvalidRadius(f64),

    /// Significance level must lie strictly inside (0, 1).
    InvalidSignificance(f64),

    /// Baseline ratio must be strictly positive and finite.
    InvalidBaseline(f64),

    /// I/O failure while reading a point file.
    Io { path: String, message: String },

    /// A malformed record in a point file (1-based line number).
    Parse {
        path: String,
        line: usize,
        message: String,
    },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::EmptyPointSet(which) => {
                write!(f, "empty point set: {}", which)
            }
            ScanError::InvalidRadius(r) => {
                write!(f, "invalid search radius: {} (must be > 0)", r)
            }
            ScanError::InvalidSignificance(a) => {
                write!(f, "invalid significance level: {} (must be in (0, 1))", a)
            }
            ScanError::InvalidBaseline(b) => {
                write!(f, "invalid baseline ratio: {} (must be > 0)", b)
            }
            ScanError::Io { path, message } => {
                write!(f, "cannot read {}: {}", path, message)
            }
            ScanError::Parse {
                path,
                line,
                message,
            } => {
                write!(f, "{}:{}: {}", path, line, message)
            }
        }
    }
}

impl std::error::Error for ScanError {}

//! Error type for archive and grid construction.

use thiserror::Error;

/// Configuration faults detected when building archives or grids.
///
/// Rejecting a candidate in [`Archive::add`](crate::archive::Archive::add)
/// is a normal outcome and is reported as `false`, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchiveError {
    /// The archive capacity is zero.
    #[error("archive capacity must be at least 1")]
    ZeroCapacity,

    /// The number of objectives is zero.
    #[error("number of objectives must be at least 1")]
    NoObjectives,

    /// The grid would need more hypercubes than can be tracked.
    #[error("grid with {bisections} bisections over {objectives} objectives has too many hypercubes")]
    GridTooLarge {
        /// Requested bisections per axis.
        bisections: usize,
        /// Requested number of objectives.
        objectives: usize,
    },
}

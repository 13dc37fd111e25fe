//! Archive configuration.
//!
//! [`ArchiveConfig`] holds the parameters shared by every archive variant.

use crate::error::ArchiveError;
use crate::grid::AdaptiveGrid;

/// Configuration for bounded archives.
///
/// `bisections` is only used by grid-backed archives.
///
/// # Defaults
///
/// ```
/// use u_moea::archive::ArchiveConfig;
///
/// let config = ArchiveConfig::default();
/// assert_eq!(config.max_size, 100);
/// assert_eq!(config.objectives, 2);
/// assert_eq!(config.bisections, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_moea::archive::ArchiveConfig;
///
/// let config = ArchiveConfig::default()
///     .with_max_size(50)
///     .with_objectives(3)
///     .with_bisections(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchiveConfig {
    /// Maximum number of members kept at rest.
    pub max_size: usize,

    /// Number of objectives of the archived solutions.
    pub objectives: usize,

    /// Bisections per objective axis of the adaptive grid.
    ///
    /// Each axis is split into `2^bisections` cells.
    pub bisections: usize,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            max_size: 100,
            objectives: 2,
            bisections: 5,
        }
    }
}

impl ArchiveConfig {
    /// Sets the archive capacity.
    pub fn with_max_size(mut self, n: usize) -> Self {
        self.max_size = n;
        self
    }

    /// Sets the number of objectives.
    pub fn with_objectives(mut self, n: usize) -> Self {
        self.objectives = n;
        self
    }

    /// Sets the grid bisections per axis.
    pub fn with_bisections(mut self, n: usize) -> Self {
        self.bisections = n;
        self
    }

    /// Validates the configuration.
    ///
    /// The grid parameters are checked as well, since any variant may be
    /// built from the same configuration.
    pub fn validate(&self) -> Result<(), ArchiveError> {
        if self.max_size == 0 {
            return Err(ArchiveError::ZeroCapacity);
        }
        AdaptiveGrid::new(self.bisections, self.objectives).map(|_| ())
    }
}

//! Pareto archives and density estimation for multi-objective evolutionary
//! algorithms.
//!
//! Provides the shared core of population-based multi-objective search
//! (NSGA-II, SPEA2, PAES, PESA-II, MOCHC, DE hybrids):
//!
//! - **Dominance**: constraint-aware Pareto dominance and objective-space
//!   equality.
//! - **Ranking**: fast non-dominated sort into ordered fronts.
//! - **Density**: crowding distance (NSGA-II) and strength/raw fitness with
//!   environmental selection (SPEA2).
//! - **Adaptive grid**: hypercube partition of objective space with
//!   occupancy-based density (PAES, PESA-II).
//! - **Archives**: capacity-bounded sets of mutually non-dominated solutions
//!   with pluggable eviction policies.
//!
//! All objectives are **minimized**.
//!
//! # Architecture
//!
//! Everything here is synchronous and single-threaded. Archives, rankings
//! and grids are plain values owned by one run; randomness is passed in by
//! the caller. Genetic operators, problem evaluation and result reporting
//! live with the consumers of this crate. Diagnostics go through the `log`
//! facade.

pub mod archive;
pub mod density;
pub mod dominance;
pub mod error;
pub mod grid;
pub mod ranking;
pub mod selection;
pub mod solution;

pub use archive::{
    AdaptiveGridArchive, Archive, ArchiveConfig, CrowdingArchive, GridArchive,
    StrengthRawFitnessArchive,
};
pub use error::ArchiveError;
pub use ranking::Ranking;
pub use solution::{ObjectiveVector, Solution};

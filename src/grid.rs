//! Adaptive grid over objective space.
//!
//! The grid splits every objective axis into `2^bisections` equal cells
//! between the current minimum and maximum of a solution set, giving
//! `2^(bisections * objectives)` hypercubes. Cell occupancy serves as a
//! density estimate for PAES and PESA-II style archives and selection.
//!
//! # References
//!
//! - Knowles & Corne (2000), "Approximating the Nondominated Front Using the
//!   Pareto Archived Evolution Strategy", Evolutionary Computation 8(2)
//! - Corne et al. (2001), "PESA-II: Region-based Selection in Evolutionary
//!   Multiobjective Optimization", GECCO 2001

use crate::error::ArchiveError;
use crate::solution::Solution;
use log::debug;
use rand::Rng;

/// Upper bound on the number of hypercubes a grid may track.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Uniform hypercube partition of objective space, recomputed from the
/// extents of a solution set.
///
/// # Example
///
/// ```
/// use u_moea::grid::AdaptiveGrid;
/// use u_moea::ObjectiveVector;
///
/// let members: Vec<ObjectiveVector> = vec![
///     [0.0, 10.0].into(),
///     [2.0, 2.0].into(),
///     [8.0, 8.0].into(),
///     [10.0, 0.0].into(),
/// ];
///
/// let mut grid = AdaptiveGrid::new(1, 2).unwrap();
/// grid.update(&members);
///
/// let low = grid.location(&members[1]);
/// let high = grid.location(&members[2]);
/// assert_ne!(low, high);
/// assert_eq!(grid.location_density(low), 1);
/// assert_eq!(grid.location_density(high), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveGrid {
    bisections: usize,
    objectives: usize,
    cells_per_axis: usize,
    lower_limits: Vec<f64>,
    upper_limits: Vec<f64>,
    hypercubes: Vec<usize>,
    occupied: Vec<usize>,
    most_populated: Option<usize>,
}

impl AdaptiveGrid {
    /// Creates an empty grid with `bisections` splits per axis over
    /// `objectives` axes.
    ///
    /// Fails when `objectives` is zero or the grid would need more than
    /// [`MAX_GRID_CELLS`] hypercubes.
    pub fn new(bisections: usize, objectives: usize) -> Result<Self, ArchiveError> {
        if objectives == 0 {
            return Err(ArchiveError::NoObjectives);
        }

        let too_large = ArchiveError::GridTooLarge {
            bisections,
            objectives,
        };
        let cells_per_axis = u32::try_from(bisections)
            .ok()
            .and_then(|b| 1usize.checked_shl(b))
            .ok_or_else(|| too_large.clone())?;
        let total = u32::try_from(objectives)
            .ok()
            .and_then(|m| cells_per_axis.checked_pow(m))
            .filter(|&total| total <= MAX_GRID_CELLS)
            .ok_or(too_large)?;

        Ok(Self {
            bisections,
            objectives,
            cells_per_axis,
            lower_limits: vec![0.0; objectives],
            upper_limits: vec![0.0; objectives],
            hypercubes: vec![0; total],
            occupied: Vec::new(),
            most_populated: None,
        })
    }

    /// Recomputes the extents and the occupancy of every hypercube from
    /// `solutions`.
    pub fn update<S: Solution>(&mut self, solutions: &[S]) {
        self.update_limits(solutions);

        self.hypercubes.iter_mut().for_each(|count| *count = 0);
        for solution in solutions {
            let cell = self.location(solution);
            self.hypercubes[cell] += 1;
        }

        self.refresh_occupancy();

        debug!(
            "grid refreshed: {} solutions in {} of {} hypercubes",
            solutions.len(),
            self.occupied.len(),
            self.hypercubes.len()
        );
    }

    fn update_limits<S: Solution>(&mut self, solutions: &[S]) {
        if solutions.is_empty() {
            self.lower_limits.iter_mut().for_each(|v| *v = 0.0);
            self.upper_limits.iter_mut().for_each(|v| *v = 0.0);
            return;
        }

        self.lower_limits.iter_mut().for_each(|v| *v = f64::INFINITY);
        self.upper_limits.iter_mut().for_each(|v| *v = f64::NEG_INFINITY);

        for solution in solutions {
            debug_assert_eq!(solution.number_of_objectives(), self.objectives);
            for (obj, &value) in solution.objectives().iter().enumerate() {
                self.lower_limits[obj] = self.lower_limits[obj].min(value);
                self.upper_limits[obj] = self.upper_limits[obj].max(value);
            }
        }
    }

    fn refresh_occupancy(&mut self) {
        self.occupied.clear();
        self.most_populated = None;

        let mut max_count = 0;
        for (cell, &count) in self.hypercubes.iter().enumerate() {
            if count == 0 {
                continue;
            }
            self.occupied.push(cell);
            // strict comparison keeps the first cell reaching the maximum
            if count > max_count {
                max_count = count;
                self.most_populated = Some(cell);
            }
        }
    }

    /// Hypercube index of `solution`.
    ///
    /// Each axis contributes its cell position as one digit of a mixed-radix
    /// number with base `2^bisections`, objective 0 being the least
    /// significant digit. Values outside the current extents fall into the
    /// nearest boundary cell; an axis with zero width maps to cell 0.
    pub fn location<S: Solution + ?Sized>(&self, solution: &S) -> usize {
        debug_assert_eq!(solution.number_of_objectives(), self.objectives);

        let cells = self.cells_per_axis;
        let mut location = 0;
        let mut radix = 1;

        for (obj, &value) in solution.objectives().iter().enumerate() {
            let lower = self.lower_limits[obj];
            let range = self.upper_limits[obj] - lower;

            let cell = if range > 0.0 {
                let position = ((value - lower) / range * cells as f64).floor();
                if position.is_nan() || position < 0.0 {
                    0
                } else {
                    (position as usize).min(cells - 1)
                }
            } else {
                0
            };

            location += cell * radix;
            radix *= cells;
        }

        location
    }

    /// Number of solutions in hypercube `cell` (0 for unknown cells).
    pub fn location_density(&self, cell: usize) -> usize {
        self.hypercubes.get(cell).copied().unwrap_or(0)
    }

    /// Uniformly picks one occupied hypercube, or `None` when the grid is empty.
    pub fn random_occupied_hypercube<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.occupied.is_empty() {
            return None;
        }
        Some(self.occupied[rng.random_range(0..self.occupied.len())])
    }

    /// Picks an occupied hypercube with probability inversely proportional
    /// to its density, or `None` when the grid is empty.
    pub fn roulette_hypercube<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.occupied.is_empty() {
            return None;
        }

        let total: f64 = self
            .occupied
            .iter()
            .map(|&cell| 1.0 / self.hypercubes[cell] as f64)
            .sum();
        let threshold = rng.random_range(0.0..total);

        let mut cumulative = 0.0;
        for &cell in &self.occupied {
            cumulative += 1.0 / self.hypercubes[cell] as f64;
            if cumulative > threshold {
                return Some(cell);
            }
        }

        self.occupied.last().copied() // floating-point fallback
    }

    /// The first hypercube (in index order) holding the most solutions.
    pub fn most_populated_hypercube(&self) -> Option<usize> {
        self.most_populated
    }

    /// Occupied hypercubes in ascending index order.
    pub fn occupied_hypercubes(&self) -> &[usize] {
        &self.occupied
    }

    /// Mean number of solutions per occupied hypercube (0 when empty).
    pub fn average_occupation(&self) -> f64 {
        if self.occupied.is_empty() {
            return 0.0;
        }
        let total: usize = self.occupied.iter().map(|&cell| self.hypercubes[cell]).sum();
        total as f64 / self.occupied.len() as f64
    }

    /// Total number of hypercubes.
    pub fn number_of_hypercubes(&self) -> usize {
        self.hypercubes.len()
    }

    /// Bisections per axis.
    pub fn bisections(&self) -> usize {
        self.bisections
    }

    /// Number of objective axes.
    pub fn objectives(&self) -> usize {
        self.objectives
    }

    /// Per-objective lower extent.
    pub fn lower_limits(&self) -> &[f64] {
        &self.lower_limits
    }

    /// Per-objective upper extent.
    pub fn upper_limits(&self) -> &[f64] {
        &self.upper_limits
    }
}

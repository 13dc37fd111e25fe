//! Eviction policies deciding which member leaves an overflowing archive.

use crate::density::{crowding_distance, strength_raw_fitness};
use crate::grid::AdaptiveGrid;
use crate::solution::Solution;
use std::cmp::Ordering;

/// Picks the member to drop when an archive exceeds its capacity.
///
/// The archive calls [`on_change`](EvictionPolicy::on_change) after every
/// structural change, then [`select_victim`](EvictionPolicy::select_victim)
/// with `max_size + 1` members whenever an insertion overflows.
pub trait EvictionPolicy<S> {
    /// Returns the index of the member to evict. `members` is never empty.
    fn select_victim(&mut self, members: &[S]) -> usize;

    /// Observes the current membership after an insertion or removal.
    ///
    /// The default implementation is a no-op.
    fn on_change(&mut self, _members: &[S]) {}
}

/// Evicts the member with the lowest crowding distance.
///
/// Members are stably sorted by descending distance and the last one is
/// dropped, so among equally crowded members the latest in archive order
/// goes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrowdingEviction;

impl<S: Solution> EvictionPolicy<S> for CrowdingEviction {
    fn select_victim(&mut self, members: &[S]) -> usize {
        let distances = crowding_distance(members);
        let mut order: Vec<usize> = (0..members.len()).collect();
        order.sort_by(|&a, &b| {
            distances[b]
                .partial_cmp(&distances[a])
                .unwrap_or(Ordering::Equal)
        });
        order[order.len() - 1]
    }
}

/// Evicts the member with the highest SPEA2 fitness.
///
/// Members are stably sorted by ascending fitness and the last one is
/// dropped, so among members with equal fitness the latest in archive order
/// goes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrengthEviction;

impl<S: Solution + Sync> EvictionPolicy<S> for StrengthEviction {
    fn select_victim(&mut self, members: &[S]) -> usize {
        let fitness = strength_raw_fitness(members);
        let mut order: Vec<usize> = (0..members.len()).collect();
        order.sort_by(|&a, &b| fitness[a].partial_cmp(&fitness[b]).unwrap_or(Ordering::Equal));
        order[order.len() - 1]
    }
}

/// Evicts a member of the most populated grid hypercube.
///
/// The hypercube is the first one in index order at maximum occupancy, and
/// the victim is the first member in archive order located in it. The grid
/// is refreshed after every structural change of the archive.
#[derive(Debug, Clone)]
pub struct GridEviction {
    grid: AdaptiveGrid,
}

impl GridEviction {
    /// Wraps a grid.
    pub fn new(grid: AdaptiveGrid) -> Self {
        Self { grid }
    }

    /// The grid, as of the last structural change.
    pub fn grid(&self) -> &AdaptiveGrid {
        &self.grid
    }
}

impl<S: Solution> EvictionPolicy<S> for GridEviction {
    fn select_victim(&mut self, members: &[S]) -> usize {
        self.grid
            .most_populated_hypercube()
            .and_then(|cell| members.iter().position(|m| self.grid.location(m) == cell))
            .unwrap_or(members.len() - 1)
    }

    fn on_change(&mut self, members: &[S]) {
        self.grid.update(members);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::ObjectiveVector;

    fn members(objs: &[&[f64]]) -> Vec<ObjectiveVector> {
        objs.iter().map(|o| ObjectiveVector::new(o.to_vec())).collect()
    }

    #[test]
    fn test_crowding_evicts_interior() {
        let m = members(&[&[1.0, 5.0], &[5.0, 1.0], &[3.0, 3.0]]);
        assert_eq!(CrowdingEviction.select_victim(&m), 2);
    }

    #[test]
    fn test_crowding_ties_evict_latest() {
        // two members: both infinite
        let m = members(&[&[1.0, 5.0], &[5.0, 1.0]]);
        assert_eq!(CrowdingEviction.select_victim(&m), 1);
    }

    #[test]
    fn test_strength_evicts_highest_fitness() {
        let m = members(&[&[0.0, 10.0], &[10.0, 0.0], &[5.0, 5.0], &[5.1, 4.9]]);
        // (5.1, 4.9) has the nearest second neighbour, hence the largest density term
        assert_eq!(StrengthEviction.select_victim(&m), 3);
    }

    #[test]
    fn test_strength_ties_evict_latest() {
        // symmetric front: every member has the same nearest-neighbour distance
        let m = members(&[&[0.0, 2.0], &[1.0, 1.0], &[2.0, 0.0]]);
        let fitness = strength_raw_fitness(&m);
        assert_eq!(fitness[0], fitness[1]);
        assert_eq!(fitness[1], fitness[2]);
        assert_eq!(StrengthEviction.select_victim(&m), 2);
    }

    #[test]
    fn test_grid_evicts_first_in_densest_cell() {
        let m = members(&[&[10.0, 0.0], &[0.0, 10.0], &[1.0, 9.0], &[2.0, 8.0]]);
        let mut policy = GridEviction::new(AdaptiveGrid::new(1, 2).unwrap());
        policy.on_change(&m);
        assert_eq!(policy.select_victim(&m), 1);
    }
}

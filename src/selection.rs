//! Region-based selection from grid-backed archives.
//!
//! PESA-II selects hypercubes rather than individuals: a binary tournament
//! between two occupied hypercubes favours the less crowded one, then a
//! member of the winning hypercube is drawn uniformly.
//!
//! # References
//!
//! - Corne et al. (2001), "PESA-II: Region-based Selection in Evolutionary
//!   Multiobjective Optimization", GECCO 2001

use crate::archive::GridArchive;
use crate::solution::Solution;
use rand::Rng;

/// Selects one archive member by hypercube tournament.
///
/// Returns `None` when the archive is empty.
///
/// # Example
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_moea::archive::AdaptiveGridArchive;
/// use u_moea::selection::select_by_grid;
/// use u_moea::ObjectiveVector;
///
/// let mut archive = AdaptiveGridArchive::adaptive_grid(10, 2, 2).unwrap();
/// archive.add(ObjectiveVector::from([0.0, 4.0]));
/// archive.add(ObjectiveVector::from([4.0, 0.0]));
///
/// let mut rng = StdRng::seed_from_u64(42);
/// assert!(select_by_grid(&archive, &mut rng).is_some());
/// ```
pub fn select_by_grid<'a, S, A, R>(archive: &'a A, rng: &mut R) -> Option<&'a S>
where
    S: Solution,
    A: GridArchive<S>,
    R: Rng,
{
    let grid = archive.grid();

    let first = grid.random_occupied_hypercube(rng)?;
    let second = grid.random_occupied_hypercube(rng)?;

    let (d1, d2) = (grid.location_density(first), grid.location_density(second));
    let cell = if d1 < d2 {
        first
    } else if d2 < d1 {
        second
    } else if rng.random_bool(0.5) {
        first
    } else {
        second
    };

    let candidates: Vec<&S> = archive
        .members()
        .iter()
        .filter(|s| grid.location(*s) == cell)
        .collect();

    debug_assert!(!candidates.is_empty(), "occupied hypercube {cell} has no members");
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::AdaptiveGridArchive;
    use crate::solution::ObjectiveVector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_archive() {
        let archive: AdaptiveGridArchive<ObjectiveVector> =
            AdaptiveGridArchive::adaptive_grid(5, 2, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(select_by_grid(&archive, &mut rng).is_none());
    }

    #[test]
    fn test_prefers_sparse_regions() {
        let mut archive = AdaptiveGridArchive::adaptive_grid(10, 1, 2).unwrap();
        archive.add(ObjectiveVector::from([0.0, 10.0]));
        archive.add(ObjectiveVector::from([0.5, 9.5]));
        archive.add(ObjectiveVector::from([1.0, 9.0]));
        archive.add(ObjectiveVector::from([10.0, 0.0]));

        let mut rng = StdRng::seed_from_u64(42);
        let mut isolated = 0;
        let n = 4000;
        for _ in 0..n {
            let s = select_by_grid(&archive, &mut rng).unwrap();
            if s.objectives() == [10.0, 0.0] {
                isolated += 1;
            }
        }

        // the lone member wins every mixed tournament and half the ties: ~3/4
        assert!(isolated > n / 2, "isolated member selected {isolated}/{n}");
    }
}

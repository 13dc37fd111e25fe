//! Non-dominated ranking.
//!
//! Partitions a collection of solutions into Pareto fronts using the fast
//! non-dominated sort of NSGA-II. Front 0 holds the non-dominated solutions,
//! front 1 those dominated only by front 0, and so on.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use crate::dominance::{dominance_cmp, Dominance};
use crate::solution::Solution;

/// Result of non-dominated ranking.
///
/// Fronts hold indices into the ranked collection. They are disjoint, ordered
/// by dominance depth, and together cover every input index exactly once.
///
/// # Example
///
/// ```
/// use u_moea::{ObjectiveVector, Ranking};
///
/// let population: Vec<ObjectiveVector> = vec![
///     [1.0, 5.0].into(), // A
///     [3.0, 3.0].into(), // B
///     [5.0, 1.0].into(), // C
///     [4.0, 4.0].into(), // D, dominated by B
/// ];
///
/// let ranking = Ranking::new(&population);
///
/// assert_eq!(ranking.number_of_subfronts(), 2);
/// assert_eq!(ranking.subfront(0), &[0, 1, 2]);
/// assert_eq!(ranking.subfront(1), &[3]);
/// assert!(ranking.subfront(7).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    ranks: Vec<usize>,
    fronts: Vec<Vec<usize>>,
}

impl Ranking {
    /// Ranks `solutions` with constraint-aware dominance.
    ///
    /// # Complexity
    ///
    /// O(m * n²) where m = number of objectives, n = number of solutions
    pub fn new<S: Solution>(solutions: &[S]) -> Self {
        let n = solutions.len();
        if n == 0 {
            return Self::default();
        }

        let mut domination_count = vec![0usize; n];
        let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut ranks = vec![0usize; n];

        for i in 0..n {
            for j in (i + 1)..n {
                match dominance_cmp(&solutions[i], &solutions[j]) {
                    Dominance::Left => {
                        dominated_by[i].push(j);
                        domination_count[j] += 1;
                    }
                    Dominance::Right => {
                        dominated_by[j].push(i);
                        domination_count[i] += 1;
                    }
                    Dominance::Neither => {}
                }
            }
        }

        // counts are final only after the full pairwise pass
        let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

        let mut fronts = vec![front_0];
        loop {
            let current = &fronts[fronts.len() - 1];
            let mut next_front = Vec::new();

            for &i in current {
                for &j in &dominated_by[i] {
                    domination_count[j] -= 1;
                    if domination_count[j] == 0 {
                        ranks[j] = fronts.len();
                        next_front.push(j);
                    }
                }
            }

            if next_front.is_empty() {
                break;
            }
            next_front.sort_unstable();
            fronts.push(next_front);
        }

        Self { ranks, fronts }
    }

    /// Number of fronts produced.
    pub fn number_of_subfronts(&self) -> usize {
        self.fronts.len()
    }

    /// Indices of front `index`, or an empty slice when there is no such front.
    pub fn subfront(&self, index: usize) -> &[usize] {
        self.fronts.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Borrows the solutions of front `index` out of the ranked collection.
    ///
    /// `solutions` must be the collection this ranking was built from.
    /// Returns an empty vector when there is no such front.
    pub fn subfront_solutions<'a, S>(&self, index: usize, solutions: &'a [S]) -> Vec<&'a S> {
        debug_assert_eq!(solutions.len(), self.ranks.len(), "ranking built from another collection");
        self.subfront(index).iter().map(|&i| &solutions[i]).collect()
    }

    /// Rank of the solution at `index` (0 = non-dominated).
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn rank(&self, index: usize) -> usize {
        self.ranks[index]
    }

    /// Rank of every solution, parallel to the ranked collection.
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// All fronts in increasing dominance depth.
    pub fn fronts(&self) -> &[Vec<usize>] {
        &self.fronts
    }

    /// Number of ranked solutions.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns `true` if the ranked collection was empty.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dominance::dominates;
    use crate::solution::ObjectiveVector;
    use proptest::prelude::*;

    fn population(objs: &[&[f64]]) -> Vec<ObjectiveVector> {
        objs.iter().map(|o| ObjectiveVector::new(o.to_vec())).collect()
    }

    #[test]
    fn test_empty_collection() {
        let pop: Vec<ObjectiveVector> = Vec::new();
        let ranking = Ranking::new(&pop);
        assert_eq!(ranking.number_of_subfronts(), 0);
        assert!(ranking.subfront(0).is_empty());
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_single_solution() {
        let pop = population(&[&[1.0, 2.0]]);
        let ranking = Ranking::new(&pop);
        assert_eq!(ranking.ranks(), &[0]);
        assert_eq!(ranking.number_of_subfronts(), 1);
        assert_eq!(ranking.subfront(0), &[0]);
    }

    #[test]
    fn test_clear_dominance_chain() {
        let pop = population(&[&[3.0, 3.0], &[1.0, 1.0], &[2.0, 2.0]]);
        let ranking = Ranking::new(&pop);
        assert_eq!(ranking.ranks(), &[2, 0, 1]);
        assert_eq!(ranking.number_of_subfronts(), 3);
        assert_eq!(ranking.subfront(2), &[0]);
    }

    #[test]
    fn test_mixed_fronts() {
        let pop = population(&[
            &[1.0, 5.0], // front 0
            &[3.0, 3.0], // front 0
            &[5.0, 1.0], // front 0
            &[4.0, 4.0], // dominated by [1]
            &[6.0, 6.0], // dominated by [3]
        ]);
        let ranking = Ranking::new(&pop);
        assert_eq!(ranking.ranks(), &[0, 0, 0, 1, 2]);
        assert_eq!(ranking.subfront(1), &[3]);
        assert_eq!(ranking.subfront(2), &[4]);
    }

    #[test]
    fn test_duplicates_share_front() {
        let pop = population(&[&[2.0, 2.0], &[2.0, 2.0], &[2.0, 2.0]]);
        let ranking = Ranking::new(&pop);
        assert_eq!(ranking.number_of_subfronts(), 1);
        assert_eq!(ranking.subfront(0).len(), 3);
    }

    #[test]
    fn test_infeasible_solutions_ranked_last() {
        let mut pop = population(&[&[0.0, 0.0], &[5.0, 5.0]]);
        pop[0].set_constraint_violation(1.0);
        let ranking = Ranking::new(&pop);
        assert_eq!(ranking.ranks(), &[1, 0]);
    }

    #[test]
    fn test_out_of_range_front_is_empty() {
        let pop = population(&[&[1.0, 3.0], &[3.0, 1.0]]);
        let ranking = Ranking::new(&pop);
        assert!(ranking.subfront(1).is_empty());
        assert!(ranking.subfront_solutions(5, &pop).is_empty());
    }

    #[test]
    fn test_scenario_single_front_of_three() {
        let pop = population(&[&[0.0, 10.0], &[5.0, 5.0], &[10.0, 0.0]]);
        let ranking = Ranking::new(&pop);
        assert_eq!(ranking.number_of_subfronts(), 1);
        let front = ranking.subfront_solutions(0, &pop);
        assert_eq!(front.len(), 3);
    }

    fn arb_population() -> impl Strategy<Value = Vec<ObjectiveVector>> {
        prop::collection::vec(
            (prop::collection::vec(0u8..8, 3), 0u8..2),
            0..40,
        )
        .prop_map(|raw| {
            raw.into_iter()
                .map(|(objs, violation)| {
                    ObjectiveVector::new(objs.into_iter().map(f64::from).collect())
                        .with_constraint_violation(f64::from(violation))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_fronts_partition_input(pop in arb_population()) {
            let ranking = Ranking::new(&pop);

            let mut seen: Vec<usize> = ranking.fronts().iter().flatten().copied().collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..pop.len()).collect::<Vec<_>>());

            for (rank, front) in ranking.fronts().iter().enumerate() {
                prop_assert!(!front.is_empty());
                for &i in front {
                    prop_assert_eq!(ranking.rank(i), rank);
                    for &j in front {
                        prop_assert!(!dominates(&pop[i], &pop[j]));
                    }
                    if rank > 0 {
                        let dominated_by_better = ranking.fronts()[..rank]
                            .iter()
                            .flatten()
                            .any(|&k| dominates(&pop[k], &pop[i]));
                        prop_assert!(dominated_by_better);
                    }
                }
            }
        }
    }
}

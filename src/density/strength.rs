//! SPEA2 strength/raw fitness and environmental selection.
//!
//! # References
//!
//! - Zitzler, Laumanns & Thiele (2001), "SPEA2: Improving the Strength Pareto
//!   Evolutionary Algorithm", TIK-Report 103, ETH Zurich

use crate::dominance::{dominance_cmp, Dominance};
use crate::solution::Solution;
use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Euclidean distance between two objective vectors.
pub fn objective_distance<A, B>(a: &A, b: &B) -> f64
where
    A: Solution + ?Sized,
    B: Solution + ?Sized,
{
    a.objectives()
        .iter()
        .zip(b.objectives())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Pairwise Euclidean distances in objective space.
///
/// With the `parallel` feature rows are computed with rayon.
pub fn distance_matrix<S: Solution + Sync>(solutions: &[S]) -> Vec<Vec<f64>> {
    let row = |i: usize| -> Vec<f64> {
        solutions
            .iter()
            .map(|other| objective_distance(&solutions[i], other))
            .collect()
    };

    #[cfg(feature = "parallel")]
    {
        (0..solutions.len()).into_par_iter().map(row).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..solutions.len()).map(row).collect()
    }
}

/// Computes SPEA2 fitness for every solution.
///
/// - strength(i) = number of solutions `i` dominates
/// - raw(i) = sum of the strengths of the solutions dominating `i`
/// - density(i) = `1 / (d_k + 2)`, where `d_k` is the distance to the k-th
///   nearest other solution and `k = floor(sqrt(n))`
///
/// Fitness is `raw + density`, lower is better. Non-dominated solutions
/// always score below 1.
///
/// # Example
///
/// ```
/// use u_moea::density::strength_raw_fitness;
/// use u_moea::ObjectiveVector;
///
/// let population: Vec<ObjectiveVector> = vec![
///     [1.0, 4.0].into(),
///     [4.0, 1.0].into(),
///     [5.0, 5.0].into(), // dominated by both
/// ];
///
/// let fitness = strength_raw_fitness(&population);
/// assert!(fitness[0] < 1.0);
/// assert!(fitness[1] < 1.0);
/// assert!(fitness[2] >= 2.0);
/// ```
pub fn strength_raw_fitness<S: Solution + Sync>(solutions: &[S]) -> Vec<f64> {
    let n = solutions.len();
    if n == 0 {
        return Vec::new();
    }

    let mut strength = vec![0usize; n];
    let mut dominators: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(&solutions[i], &solutions[j]) {
                Dominance::Left => {
                    strength[i] += 1;
                    dominators[j].push(i);
                }
                Dominance::Right => {
                    strength[j] += 1;
                    dominators[i].push(j);
                }
                Dominance::Neither => {}
            }
        }
    }

    let k = (n as f64).sqrt() as usize;
    let distances = distance_matrix(solutions);

    (0..n)
        .map(|i| {
            let raw: usize = dominators[i].iter().map(|&j| strength[j]).sum();
            raw as f64 + 1.0 / (kth_nearest(&distances[i], i, k) + 2.0)
        })
        .collect()
}

/// Distance from `own` to its k-th nearest neighbour in `row` (1-based).
///
/// Falls back to the farthest neighbour when there are fewer than `k`, and
/// to zero when there are none.
fn kth_nearest(row: &[f64], own: usize, k: usize) -> f64 {
    let mut others: Vec<f64> = row
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != own)
        .map(|(_, &d)| d)
        .collect();

    if others.is_empty() {
        return 0.0;
    }

    others.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let idx = k.max(1).min(others.len()) - 1;
    others[idx]
}

/// SPEA2 environmental selection.
///
/// Keeps every non-dominated solution (fitness < 1). If there are more than
/// `target_size` of them, the most crowded are removed one at a time: the
/// solution whose sorted distances to the remaining members are
/// lexicographically smallest goes first, ties broken by lowest index.
/// If there are fewer, the best dominated solutions by ascending fitness
/// fill the gap.
///
/// Returns at most `target_size` solutions, in their original relative order
/// for the non-dominated part, followed by any fill-ins.
pub fn environmental_selection<S: Solution + Sync>(solutions: Vec<S>, target_size: usize) -> Vec<S> {
    if solutions.len() <= target_size {
        return solutions;
    }

    let fitness = strength_raw_fitness(&solutions);

    let (mut kept, mut dominated): (Vec<usize>, Vec<usize>) =
        (0..solutions.len()).partition(|&i| fitness[i] < 1.0);

    if kept.len() < target_size {
        dominated.sort_by(|&a, &b| fitness[a].partial_cmp(&fitness[b]).unwrap_or(Ordering::Equal));
        let missing = target_size - kept.len();
        kept.extend(dominated.into_iter().take(missing));
    } else if kept.len() > target_size {
        let members: Vec<&S> = kept.iter().map(|&i| &solutions[i]).collect();
        let survivors = truncate(&members, target_size);
        kept = survivors.into_iter().map(|k| kept[k]).collect();
    }

    let mut slots: Vec<Option<S>> = solutions.into_iter().map(Some).collect();
    kept.into_iter().filter_map(|i| slots[i].take()).collect()
}

/// Iteratively removes the most crowded member until `target_size` remain.
///
/// Returns indices into `members` of the survivors, ascending.
fn truncate<S: Solution + Sync>(members: &[S], target_size: usize) -> Vec<usize> {
    let distances = distance_matrix(members);
    let n = members.len();

    // neighbour lists sorted by distance, each entry is (distance, neighbour)
    let mut neighbours: Vec<Vec<(f64, usize)>> = (0..n)
        .map(|i| {
            let mut list: Vec<(f64, usize)> = (0..n)
                .filter(|&j| j != i)
                .map(|j| (distances[i][j], j))
                .collect();
            list.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
            list
        })
        .collect();

    let mut alive = vec![true; n];
    let mut remaining = n;

    while remaining > target_size {
        let victim = (0..n)
            .filter(|&i| alive[i])
            .min_by(|&a, &b| cmp_neighbour_lists(&neighbours[a], &neighbours[b]).then(a.cmp(&b)))
            .expect("remaining > target_size >= 0 so at least one member is alive");

        alive[victim] = false;
        remaining -= 1;
        for list in neighbours.iter_mut() {
            list.retain(|&(_, j)| j != victim);
        }
    }

    (0..n).filter(|&i| alive[i]).collect()
}

fn cmp_neighbour_lists(a: &[(f64, usize)], b: &[(f64, usize)]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.0.partial_cmp(&y.0).unwrap_or(Ordering::Equal) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

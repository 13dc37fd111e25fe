//! Crowding distance assignment for diversity preservation.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

use crate::dominance::objective_cmp;
use crate::ranking::Ranking;
use crate::solution::Solution;
use std::cmp::Ordering;

/// Computes the crowding distance of every solution in `front`.
///
/// Measures how spread out the solutions are in objective space. Higher
/// distance means the solution is more isolated (more worth keeping).
///
/// # Algorithm (Deb et al., 2002)
///
/// For each objective:
/// 1. Sort solutions by objective value
/// 2. Assign infinity to boundary solutions
/// 3. For interior solutions, add `(next - prev) / (max - min)`
///
/// An objective on which every member has the same value contributes zero.
/// Fronts with one or two members are all boundary solutions.
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_moea::density::crowding_distance;
/// use u_moea::ObjectiveVector;
///
/// let front: Vec<ObjectiveVector> = vec![
///     [0.0, 10.0].into(),
///     [5.0, 5.0].into(),
///     [10.0, 0.0].into(),
/// ];
///
/// let distances = crowding_distance(&front);
///
/// assert!(distances[0].is_infinite());
/// assert_eq!(distances[1], 2.0);
/// assert!(distances[2].is_infinite());
/// ```
pub fn crowding_distance<S: Solution>(front: &[S]) -> Vec<f64> {
    let n = front.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = front[0].number_of_objectives();
    let mut distances = vec![0.0f64; n];
    let mut indices: Vec<usize> = (0..n).collect();

    for obj_idx in 0..m {
        // stable, so equal values keep collection order
        indices.sort_by(|&a, &b| objective_cmp(obj_idx, &front[a], &front[b]));

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let min_val = front[indices[0]].objective(obj_idx);
        let max_val = front[indices[n - 1]].objective(obj_idx);
        let range = max_val - min_val;

        if range > 0.0 {
            for i in 1..(n - 1) {
                let prev = front[indices[i - 1]].objective(obj_idx);
                let next = front[indices[i + 1]].objective(obj_idx);
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

/// Computes crowding distances front by front for a ranked population.
///
/// The result is parallel to `solutions`: each solution gets the distance
/// computed within its own front.
pub fn crowding_distance_by_front<S: Solution>(ranking: &Ranking, solutions: &[S]) -> Vec<f64> {
    let mut distances = vec![0.0f64; solutions.len()];

    for front in ranking.fronts() {
        let members: Vec<&S> = front.iter().map(|&i| &solutions[i]).collect();
        for (&i, d) in front.iter().zip(crowding_distance(&members)) {
            distances[i] = d;
        }
    }

    distances
}

/// Crowded-comparison ordering: lower rank first, then larger distance first.
///
/// Used both for truncating the last front during survivor selection and
/// for binary tournaments.
pub fn crowded_cmp(rank_a: usize, distance_a: f64, rank_b: usize, distance_b: f64) -> Ordering {
    rank_a.cmp(&rank_b).then_with(|| {
        distance_b
            .partial_cmp(&distance_a)
            .unwrap_or(Ordering::Equal)
    })
}

/// NSGA-II survivor selection.
///
/// Fills the result with whole fronts while they fit, then takes the
/// members of the splitting front with the largest crowding distance.
/// Returns at most `n` indices into `solutions`, best first.
pub fn nsga2_select<S: Solution>(solutions: &[S], n: usize) -> Vec<usize> {
    let n = solutions.len().min(n);
    let ranking = Ranking::new(solutions);

    let mut result = Vec::with_capacity(n);
    let mut front_idx = 0;

    while result.len() < n {
        let front = ranking.subfront(front_idx);
        if front.is_empty() {
            break;
        }

        let missing = n - result.len();
        if front.len() <= missing {
            result.extend_from_slice(front);
        } else {
            let members: Vec<&S> = front.iter().map(|&i| &solutions[i]).collect();
            let distances = crowding_distance(&members);

            let mut order: Vec<usize> = (0..front.len()).collect();
            order.sort_by(|&a, &b| crowded_cmp(front_idx, distances[a], front_idx, distances[b]));
            result.extend(order.into_iter().take(missing).map(|k| front[k]));
        }

        front_idx += 1;
    }

    debug_assert_eq!(result.len(), n);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::ObjectiveVector;

    fn front(objs: &[&[f64]]) -> Vec<ObjectiveVector> {
        objs.iter().map(|o| ObjectiveVector::new(o.to_vec())).collect()
    }

    #[test]
    fn test_crowding_empty() {
        let empty: Vec<ObjectiveVector> = Vec::new();
        assert!(crowding_distance(&empty).is_empty());
    }

    #[test]
    fn test_crowding_single() {
        let dist = crowding_distance(&front(&[&[1.0, 2.0]]));
        assert_eq!(dist.len(), 1);
        assert!(dist[0].is_infinite());
    }

    #[test]
    fn test_crowding_two() {
        let dist = crowding_distance(&front(&[&[1.0, 3.0], &[3.0, 1.0]]));
        assert!(dist.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_crowding_scenario_three_points() {
        let dist = crowding_distance(&front(&[&[0.0, 10.0], &[5.0, 5.0], &[10.0, 0.0]]));
        assert!(dist[0].is_infinite());
        assert!(dist[2].is_infinite());
        assert!((dist[1] - 2.0).abs() < 1e-12, "got {}", dist[1]);
    }

    #[test]
    fn test_crowding_evenly_spaced() {
        let dist = crowding_distance(&front(&[
            &[0.0, 4.0],
            &[1.0, 3.0],
            &[2.0, 2.0],
            &[3.0, 1.0],
            &[4.0, 0.0],
        ]));

        assert!(dist[0].is_infinite());
        assert!(dist[4].is_infinite());
        for d in &dist[1..4] {
            assert!((d - 1.0).abs() < 1e-10, "expected 1.0, got {d}");
        }
    }

    #[test]
    fn test_crowding_zero_range_objective() {
        let dist = crowding_distance(&front(&[&[1.0, 5.0], &[2.0, 5.0], &[3.0, 5.0]]));
        assert!(dist[0].is_infinite());
        assert!(dist[2].is_infinite());
        // only the first objective contributes
        assert!((dist[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_crowding_all_equal_no_nan() {
        let dist = crowding_distance(&front(&[&[2.0, 2.0], &[2.0, 2.0], &[2.0, 2.0]]));
        assert!(dist.iter().all(|d| !d.is_nan()));
        assert_eq!(dist[1], 0.0);
    }

    #[test]
    fn test_boundary_rule_per_objective() {
        let pop = front(&[
            &[0.0, 7.0, 1.0],
            &[2.0, 3.0, 9.0],
            &[4.0, 5.0, 4.0],
            &[6.0, 1.0, 5.0],
            &[8.0, 2.0, 3.0],
        ]);
        let dist = crowding_distance(&pop);
        for obj in 0..3 {
            let (min_i, _) = pop
                .iter()
                .enumerate()
                .min_by(|a, b| objective_cmp(obj, a.1, b.1))
                .unwrap();
            let (max_i, _) = pop
                .iter()
                .enumerate()
                .max_by(|a, b| objective_cmp(obj, a.1, b.1))
                .unwrap();
            assert!(dist[min_i].is_infinite());
            assert!(dist[max_i].is_infinite());
        }
    }

    #[test]
    fn test_by_front_uses_own_front() {
        let pop = front(&[&[1.0, 5.0], &[3.0, 3.0], &[5.0, 1.0], &[4.0, 4.0]]);
        let ranking = Ranking::new(&pop);
        let dist = crowding_distance_by_front(&ranking, &pop);
        assert!(dist[0].is_infinite());
        assert!(dist[1].is_finite());
        // alone in front 1
        assert!(dist[3].is_infinite());
    }

    #[test]
    fn test_crowded_cmp() {
        assert_eq!(crowded_cmp(0, 1.0, 1, 5.0), Ordering::Less);
        assert_eq!(crowded_cmp(1, 5.0, 1, 1.0), Ordering::Less);
        assert_eq!(crowded_cmp(1, f64::INFINITY, 1, 3.0), Ordering::Less);
        assert_eq!(crowded_cmp(2, 3.0, 2, 3.0), Ordering::Equal);
    }

    #[test]
    fn test_nsga2_select_fills_fronts_then_truncates() {
        let pop = front(&[
            &[0.0, 4.0], // front 0
            &[1.0, 3.0], // front 0
            &[4.0, 0.0], // front 0
            &[2.0, 5.0], // front 1
            &[3.0, 3.5], // front 1
            &[5.0, 2.0], // front 1
            &[9.0, 9.0], // front 2
        ]);

        let selected = nsga2_select(&pop, 5);
        assert_eq!(selected.len(), 5);
        assert_eq!(&selected[..3], &[0, 1, 2]);
        // boundary members of front 1 win over its interior member
        let mut tail = selected[3..].to_vec();
        tail.sort_unstable();
        assert_eq!(tail, vec![3, 5]);
    }

    #[test]
    fn test_nsga2_select_more_than_available() {
        let pop = front(&[&[1.0, 1.0], &[2.0, 2.0]]);
        assert_eq!(nsga2_select(&pop, 10), vec![0, 1]);
    }
}

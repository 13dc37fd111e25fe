//! Dominance and equality relations over solutions.
//!
//! All objectives are **minimized**. Constraint violation takes precedence
//! over objective values: a solution with less overall violation dominates
//! one with more, whatever their objectives.

use crate::solution::Solution;
use std::cmp::Ordering;

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

impl Dominance {
    /// Classic comparator encoding: `-1` when the left side dominates,
    /// `+1` when the right side dominates, `0` otherwise.
    pub fn as_sign(self) -> i8 {
        match self {
            Dominance::Left => -1,
            Dominance::Right => 1,
            Dominance::Neither => 0,
        }
    }

    /// Swaps the roles of left and right.
    pub fn reverse(self) -> Self {
        match self {
            Dominance::Left => Dominance::Right,
            Dominance::Right => Dominance::Left,
            Dominance::Neither => Dominance::Neither,
        }
    }
}

/// Compares two objective vectors for Pareto dominance, ignoring constraints.
///
/// ```
/// use u_moea::dominance::{pareto_cmp, Dominance};
///
/// assert_eq!(pareto_cmp(&[1.0, 2.0], &[2.0, 2.0]), Dominance::Left);
/// assert_eq!(pareto_cmp(&[1.0, 3.0], &[3.0, 1.0]), Dominance::Neither);
/// assert_eq!(pareto_cmp(&[2.0, 2.0], &[2.0, 2.0]), Dominance::Neither);
/// ```
pub fn pareto_cmp(a: &[f64], b: &[f64]) -> Dominance {
    debug_assert_eq!(a.len(), b.len(), "objective counts must match");

    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }

        if a_better_in_some && b_better_in_some {
            return Dominance::Neither;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Constraint-aware dominance comparison.
///
/// If the overall constraint violations differ, the less violated solution
/// dominates. Otherwise standard Pareto dominance on the objectives applies.
///
/// ```
/// use u_moea::dominance::{dominance_cmp, Dominance};
/// use u_moea::ObjectiveVector;
///
/// let feasible = ObjectiveVector::from([9.0, 9.0]);
/// let infeasible = ObjectiveVector::from([0.0, 0.0]).with_constraint_violation(1.0);
///
/// assert_eq!(dominance_cmp(&feasible, &infeasible), Dominance::Left);
/// ```
pub fn dominance_cmp<A, B>(a: &A, b: &B) -> Dominance
where
    A: Solution + ?Sized,
    B: Solution + ?Sized,
{
    let (va, vb) = (a.constraint_violation(), b.constraint_violation());
    if va < vb {
        Dominance::Left
    } else if vb < va {
        Dominance::Right
    } else {
        pareto_cmp(a.objectives(), b.objectives())
    }
}

/// Returns `true` if `a` dominates `b`.
pub fn dominates<A, B>(a: &A, b: &B) -> bool
where
    A: Solution + ?Sized,
    B: Solution + ?Sized,
{
    dominance_cmp(a, b) == Dominance::Left
}

/// Returns `true` if every objective value of `a` equals the one of `b`.
///
/// Constraint violation is not inspected.
pub fn objectives_equal<A, B>(a: &A, b: &B) -> bool
where
    A: Solution + ?Sized,
    B: Solution + ?Sized,
{
    a.objectives() == b.objectives()
}

/// Total ordering of two solutions by one objective, ascending.
///
/// `NaN` compares as equal.
pub fn objective_cmp<S: Solution + ?Sized>(index: usize, a: &S, b: &S) -> Ordering {
    a.objective(index)
        .partial_cmp(&b.objective(index))
        .unwrap_or(Ordering::Equal)
}

//! Solution abstraction shared by every pass in the crate.
//!
//! The core never evaluates solutions; it only reads their objective values
//! and overall constraint violation. Scratch annotations such as rank,
//! crowding distance or fitness are returned by each pass as arrays
//! parallel to its input instead of being written back onto the solution.

use std::rc::Rc;
use std::sync::Arc;

/// An evaluated candidate solution as seen by ranking, density estimation
/// and archives.
///
/// All objectives are **minimized**.
///
/// # Implementing
///
/// ```
/// use u_moea::Solution;
///
/// struct Tour {
///     order: Vec<usize>,
///     costs: [f64; 2],
/// }
///
/// impl Solution for Tour {
///     fn objectives(&self) -> &[f64] {
///         &self.costs
///     }
/// }
///
/// let tour = Tour { order: vec![0, 1, 2], costs: [12.0, 3.5] };
/// assert_eq!(tour.order.len(), 3);
/// assert_eq!(tour.number_of_objectives(), 2);
/// assert_eq!(tour.constraint_violation(), 0.0);
/// ```
pub trait Solution {
    /// Objective values, indexed by objective.
    fn objectives(&self) -> &[f64];

    /// Overall constraint violation. `0.0` means feasible; larger is worse.
    ///
    /// The default implementation treats every solution as feasible.
    fn constraint_violation(&self) -> f64 {
        0.0
    }

    /// Number of objectives.
    fn number_of_objectives(&self) -> usize {
        self.objectives().len()
    }

    /// Value of objective `index`.
    ///
    /// # Panics
    /// Panics if `index >= number_of_objectives()`.
    fn objective(&self, index: usize) -> f64 {
        self.objectives()[index]
    }
}

impl<T: Solution + ?Sized> Solution for &T {
    fn objectives(&self) -> &[f64] {
        (**self).objectives()
    }

    fn constraint_violation(&self) -> f64 {
        (**self).constraint_violation()
    }
}

impl<T: Solution + ?Sized> Solution for Rc<T> {
    fn objectives(&self) -> &[f64] {
        (**self).objectives()
    }

    fn constraint_violation(&self) -> f64 {
        (**self).constraint_violation()
    }
}

impl<T: Solution + ?Sized> Solution for Arc<T> {
    fn objectives(&self) -> &[f64] {
        (**self).objectives()
    }

    fn constraint_violation(&self) -> f64 {
        (**self).constraint_violation()
    }
}

impl<T: Solution + ?Sized> Solution for Box<T> {
    fn objectives(&self) -> &[f64] {
        (**self).objectives()
    }

    fn constraint_violation(&self) -> f64 {
        (**self).constraint_violation()
    }
}

/// A plain objective vector with a constraint violation.
///
/// Useful when decision variables live elsewhere, and throughout the tests.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveVector {
    objectives: Vec<f64>,
    constraint_violation: f64,
}

impl ObjectiveVector {
    /// Creates a feasible solution with the given objective values.
    pub fn new(objectives: Vec<f64>) -> Self {
        Self {
            objectives,
            constraint_violation: 0.0,
        }
    }

    /// Creates a solution with `n` objectives all set to zero.
    pub fn with_objectives(n: usize) -> Self {
        Self::new(vec![0.0; n])
    }

    /// Sets the overall constraint violation.
    pub fn with_constraint_violation(mut self, violation: f64) -> Self {
        self.constraint_violation = violation;
        self
    }

    /// Sets objective `index` to `value`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn set_objective(&mut self, index: usize, value: f64) {
        self.objectives[index] = value;
    }

    /// Sets the overall constraint violation.
    pub fn set_constraint_violation(&mut self, violation: f64) {
        self.constraint_violation = violation;
    }
}

impl Solution for ObjectiveVector {
    fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    fn constraint_violation(&self) -> f64 {
        self.constraint_violation
    }
}

impl From<Vec<f64>> for ObjectiveVector {
    fn from(objectives: Vec<f64>) -> Self {
        Self::new(objectives)
    }
}

impl<const N: usize> From<[f64; N]> for ObjectiveVector {
    fn from(objectives: [f64; N]) -> Self {
        Self::new(objectives.to_vec())
    }
}

//! Density estimators over objective space.
//!
//! - [`crowding`]: NSGA-II crowding distance, crowded comparison and
//!   survivor selection
//! - [`strength`]: SPEA2 strength/raw fitness and environmental selection
//!
//! Every estimator is a pure function over a slice of solutions and returns
//! a vector parallel to its input.

pub mod crowding;
pub mod strength;

pub use crowding::{crowded_cmp, crowding_distance, crowding_distance_by_front, nsga2_select};
pub use strength::{
    distance_matrix, environmental_selection, objective_distance, strength_raw_fitness,
};

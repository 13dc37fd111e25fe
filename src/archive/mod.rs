//! Bounded archives of mutually non-dominated solutions.
//!
//! One [`Archive`] type implements the accept/reject-by-dominance logic;
//! an [`EvictionPolicy`] decides which member leaves when an insertion
//! pushes the archive over capacity.
//!
//! | Alias | Policy | Used by |
//! |-------|--------|---------|
//! | [`CrowdingArchive`] | lowest crowding distance | NSGA-II style, MOCHC, DE hybrids |
//! | [`StrengthRawFitnessArchive`] | highest SPEA2 fitness | SPEA2 style |
//! | [`AdaptiveGridArchive`] | densest grid hypercube | PAES, PESA-II |
//!
//! At rest (between calls to [`Archive::add`]) every pair of members is
//! mutually non-dominated, no two members are equal in objective space, and
//! the size never exceeds `max_size`.

mod config;
mod policy;

pub use config::ArchiveConfig;
pub use policy::{CrowdingEviction, EvictionPolicy, GridEviction, StrengthEviction};

use crate::dominance::{dominance_cmp, objectives_equal, Dominance};
use crate::error::ArchiveError;
use crate::grid::AdaptiveGrid;
use crate::solution::Solution;
use log::{debug, trace};
use std::ops::Index;

/// Archive evicting the most crowded member on overflow.
pub type CrowdingArchive<S> = Archive<S, CrowdingEviction>;

/// Archive evicting the member with the worst SPEA2 fitness on overflow.
pub type StrengthRawFitnessArchive<S> = Archive<S, StrengthEviction>;

/// Archive evicting from the densest grid hypercube on overflow.
pub type AdaptiveGridArchive<S> = Archive<S, GridEviction>;

/// A capacity-bounded set of mutually non-dominated solutions.
///
/// # Example
///
/// ```
/// use u_moea::archive::CrowdingArchive;
/// use u_moea::ObjectiveVector;
///
/// let mut archive = CrowdingArchive::crowding(2).unwrap();
///
/// assert!(archive.add(ObjectiveVector::from([1.0, 5.0])));
/// assert!(archive.add(ObjectiveVector::from([5.0, 1.0])));
/// assert!(!archive.add(ObjectiveVector::from([6.0, 6.0]))); // dominated
/// assert!(!archive.add(ObjectiveVector::from([1.0, 5.0]))); // duplicate
///
/// // non-dominated, but the most crowded once inserted
/// assert!(archive.add(ObjectiveVector::from([3.0, 3.0])));
/// assert_eq!(archive.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Archive<S, P> {
    members: Vec<S>,
    max_size: usize,
    policy: P,
}

impl<S: Solution, P: EvictionPolicy<S>> Archive<S, P> {
    /// Creates an empty archive holding at most `max_size` solutions.
    pub fn with_policy(max_size: usize, policy: P) -> Result<Self, ArchiveError> {
        if max_size == 0 {
            return Err(ArchiveError::ZeroCapacity);
        }
        Ok(Self {
            members: Vec::with_capacity(max_size + 1),
            max_size,
            policy,
        })
    }

    /// Offers `candidate` to the archive.
    ///
    /// The candidate is rejected if a member dominates it or a member is
    /// equal to it in objective space. Otherwise every member it dominates
    /// is removed and it is appended. If the archive then exceeds
    /// `max_size`, the eviction policy drops exactly one member, which may
    /// be the candidate itself.
    ///
    /// Returns `true` when the candidate was inserted.
    pub fn add(&mut self, candidate: S) -> bool {
        for (i, member) in self.members.iter().enumerate() {
            match dominance_cmp(member, &candidate) {
                Dominance::Left => {
                    trace!("candidate rejected: dominated by member {i}");
                    return false;
                }
                Dominance::Neither if objectives_equal(member, &candidate) => {
                    trace!("candidate rejected: equal to member {i}");
                    return false;
                }
                _ => {}
            }
        }

        let before = self.members.len();
        self.members
            .retain(|member| dominance_cmp(&candidate, member) != Dominance::Left);
        if self.members.len() < before {
            trace!("candidate dominates {} members", before - self.members.len());
        }

        self.members.push(candidate);
        self.policy.on_change(&self.members);

        if self.members.len() > self.max_size {
            let victim = self.policy.select_victim(&self.members);
            debug!(
                "archive overflow: evicting member {victim} of {}",
                self.members.len()
            );
            self.members.remove(victim);
            self.policy.on_change(&self.members);
        }

        debug_assert!(self.members.len() <= self.max_size);
        true
    }

    /// Removes and returns the member at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> S {
        let removed = self.members.remove(index);
        self.policy.on_change(&self.members);
        removed
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        self.members.clear();
        self.policy.on_change(&self.members);
    }
}

impl<S, P> Archive<S, P> {
    /// The member at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&S> {
        self.members.get(index)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the archive has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Capacity of the archive.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Iterates over the members in archive order.
    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.members.iter()
    }

    /// The members in archive order.
    pub fn as_slice(&self) -> &[S] {
        &self.members
    }

    /// The eviction policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Consumes the archive, returning its members.
    pub fn into_vec(self) -> Vec<S> {
        self.members
    }
}

impl<S: Solution> Archive<S, CrowdingEviction> {
    /// Creates an archive evicting by crowding distance.
    pub fn crowding(max_size: usize) -> Result<Self, ArchiveError> {
        Self::with_policy(max_size, CrowdingEviction)
    }

    /// Creates a crowding archive from a validated configuration.
    pub fn from_config(config: &ArchiveConfig) -> Result<Self, ArchiveError> {
        config.validate()?;
        Self::crowding(config.max_size)
    }
}

impl<S: Solution + Sync> Archive<S, StrengthEviction> {
    /// Creates an archive evicting by SPEA2 strength raw fitness.
    pub fn strength(max_size: usize) -> Result<Self, ArchiveError> {
        Self::with_policy(max_size, StrengthEviction)
    }

    /// Creates a strength archive from a validated configuration.
    pub fn from_config(config: &ArchiveConfig) -> Result<Self, ArchiveError> {
        config.validate()?;
        Self::strength(config.max_size)
    }
}

impl<S: Solution> Archive<S, GridEviction> {
    /// Creates an archive evicting from the densest cell of an adaptive grid
    /// with `bisections` splits per axis over `objectives` axes.
    pub fn adaptive_grid(
        max_size: usize,
        bisections: usize,
        objectives: usize,
    ) -> Result<Self, ArchiveError> {
        let grid = AdaptiveGrid::new(bisections, objectives)?;
        Self::with_policy(max_size, GridEviction::new(grid))
    }

    /// Creates a grid archive from a validated configuration.
    pub fn from_config(config: &ArchiveConfig) -> Result<Self, ArchiveError> {
        config.validate()?;
        Self::adaptive_grid(config.max_size, config.bisections, config.objectives)
    }
}

/// Capability of archives that maintain an adaptive grid.
///
/// Operators that need grid density take `&impl GridArchive<S>`, so handing
/// them an archive without a grid fails to compile.
pub trait GridArchive<S> {
    /// The grid as of the last structural change.
    fn grid(&self) -> &AdaptiveGrid;

    /// The archived solutions.
    fn members(&self) -> &[S];
}

impl<S> GridArchive<S> for Archive<S, GridEviction> {
    fn grid(&self) -> &AdaptiveGrid {
        self.policy.grid()
    }

    fn members(&self) -> &[S] {
        &self.members
    }
}

impl<S, P> Index<usize> for Archive<S, P> {
    type Output = S;

    fn index(&self, index: usize) -> &S {
        &self.members[index]
    }
}

impl<'a, S, P> IntoIterator for &'a Archive<S, P> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

//! Resolver backed by host-supplied rank/size values

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::{Communicator, RankResolver};

/// Rank and size of this process within one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GroupPosition {
    rank: usize,
    size: usize,
}

/// Resolver for hosts that already know their rank
///
/// Useful when the messaging runtime is driven from elsewhere (a Python
/// `mpi4py` session, a scheduler environment) and only the numbers need to
/// reach the logger. Groups created later, e.g. after a split, are added with
/// [`FixedRankResolver::insert`]. Unknown communicators resolve to the world
/// position.
///
/// # Example
///
/// ```
/// use hpclog_core::rank::{Communicator, FixedRankResolver, RankResolver};
///
/// let resolver = FixedRankResolver::new(3, 4)
///     .with_communicator(Communicator::from_raw(1), 1, 2);
/// assert_eq!(resolver.current_rank(Communicator::WORLD), 3);
/// assert_eq!(resolver.group_size(Communicator::from_raw(1)), 2);
/// ```
#[derive(Debug)]
pub struct FixedRankResolver {
    world: GroupPosition,
    groups: RwLock<HashMap<Communicator, GroupPosition>>,
}

impl FixedRankResolver {
    /// Create a resolver for world rank `rank` of `size`
    pub fn new(rank: usize, size: usize) -> Self {
        Self {
            world: GroupPosition { rank, size: size.max(1) },
            groups: RwLock::new(HashMap::new()),
        }
    }

    /// Builder form of [`FixedRankResolver::insert`]
    pub fn with_communicator(self, comm: Communicator, rank: usize, size: usize) -> Self {
        self.insert(comm, rank, size);
        self
    }

    /// Register (or replace) this process's position in `comm`
    pub fn insert(&self, comm: Communicator, rank: usize, size: usize) {
        if comm == Communicator::WORLD {
            return;
        }
        self.groups
            .write()
            .insert(comm, GroupPosition { rank, size: size.max(1) });
    }

    /// Position in `comm`, falling back to the world group
    fn position(&self, comm: Communicator) -> GroupPosition {
        self.groups.read().get(&comm).copied().unwrap_or(self.world)
    }
}

impl RankResolver for FixedRankResolver {
    fn current_rank(&self, comm: Communicator) -> usize {
        self.position(comm).rank
    }

    fn group_size(&self, comm: Communicator) -> usize {
        self.position(comm).size
    }

    fn is_distributed_runtime_active(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_position() {
        let resolver = FixedRankResolver::new(2, 3);
        assert_eq!(resolver.current_rank(Communicator::WORLD), 2);
        assert_eq!(resolver.group_size(Communicator::WORLD), 3);
        assert!(resolver.is_distributed_runtime_active());
    }

    #[test]
    fn test_split_groups() {
        let half = Communicator::from_raw(11);
        let resolver = FixedRankResolver::new(3, 4);
        resolver.insert(half, 1, 2);

        assert_eq!(resolver.position(half), GroupPosition { rank: 1, size: 2 });
        assert_eq!(resolver.current_rank(Communicator::from_raw(99)), 3);
    }

    #[test]
    fn test_world_cannot_be_overridden() {
        let resolver = FixedRankResolver::new(0, 4).with_communicator(Communicator::WORLD, 3, 9);
        assert_eq!(resolver.group_size(Communicator::WORLD), 4);
    }

    #[test]
    fn test_zero_size_clamped() {
        let resolver = FixedRankResolver::new(0, 0);
        assert_eq!(resolver.group_size(Communicator::WORLD), 1);
    }
}

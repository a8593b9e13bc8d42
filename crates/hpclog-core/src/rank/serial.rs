//! Single-process resolver

use super::traits::{Communicator, RankResolver};

/// Resolver used when no distributed runtime is wired in
///
/// Always rank 0 of a group of 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialResolver;

impl SerialResolver {
    pub fn new() -> Self {
        Self
    }
}

impl RankResolver for SerialResolver {
    fn current_rank(&self, _comm: Communicator) -> usize {
        0
    }

    fn group_size(&self, _comm: Communicator) -> usize {
        1
    }

    fn is_distributed_runtime_active(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_resolver() {
        let resolver = SerialResolver::new();
        let other = Communicator::from_raw(9);
        assert_eq!(resolver.current_rank(Communicator::WORLD), 0);
        assert_eq!(resolver.current_rank(other), 0);
        assert_eq!(resolver.group_size(other), 1);
        assert!(!resolver.is_distributed_runtime_active());
    }
}

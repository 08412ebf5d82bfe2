use crate::zfx_id::Id;
use crate::Result;

use std::collections::HashSet;

/// The consensus state being bootstrapped.
pub trait BootstrapTarget {
    /// Returns the set of containers that are accepted, but have no accepted children.
    fn current_accepted_frontier(&self) -> HashSet<Id>;

    /// Returns the subset of `container_ids` that is accepted locally.
    fn filter_accepted(&self, container_ids: &HashSet<Id>) -> HashSet<Id>;

    /// Treats `container_ids` as the accepted frontier of the network and starts
    /// syncing towards it. Only fatal errors are returned.
    fn force_accepted(&mut self, container_ids: HashSet<Id>) -> Result<()>;

    /// Replays previously persisted raw containers, in acceptance order.
    fn persist_events(&mut self, containers: Vec<Vec<u8>>) -> Result<()>;
}

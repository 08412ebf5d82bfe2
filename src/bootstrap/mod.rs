//! Bootstrapping of a chain from a weighted set of trusted beacons.
//!
//! A joining node polls every beacon twice. The first round collects the union of
//! the beacons' accepted frontiers, the second round asks every beacon which of those
//! containers it has accepted. Containers backed by at least `alpha` stake are handed
//! to the [BootstrapTarget] as the accepted frontier of the network.
//!
//! Alternatively a chain can be replayed from a local [RecoveryRecord], in which case
//! the network is not consulted at all.
mod bootstrapper;
mod handlers;
mod recovery;
mod sender;
mod target;

#[cfg(test)]
pub(crate) mod test_utils;

pub use bootstrapper::*;
pub use handlers::*;
pub use recovery::RecoveryRecord;
pub use sender::Sender;
pub use target::BootstrapTarget;

//! Stake weighted view over the validators consulted during bootstrap.
mod validator_set;

pub use validator_set::ValidatorSet;

use crate::zfx_id::Id;

/// Stake weight of a validator.
pub type Weight = u64;

/// Read-only access to validator weights and the bootstrap beacons.
pub trait ValidatorWeights: Send + Sync {
    /// The stake weight of `validator_id`, `0` if the validator is unknown.
    fn weight(&self, validator_id: &Id) -> Weight;

    /// The beacons polled during bootstrap, in a stable order.
    fn beacons(&self) -> Vec<Id>;
}

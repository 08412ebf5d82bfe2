use crate::zfx_id::Id;

use super::{ValidatorWeights, Weight};

use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// A fixed set of weighted validators which keeps the order in which the
/// validators were inserted.
#[derive(Debug, Clone, Default)]
pub struct ValidatorSet {
    order: Vec<Id>,
    weights: HashMap<Id, Weight>,
}

impl ValidatorSet {
    pub fn new() -> Self {
        ValidatorSet { order: vec![], weights: HashMap::default() }
    }

    /// Inserts a validator. Inserting a known validator again adds the weights
    /// (saturating), the position of the validator stays the same.
    pub fn insert(&mut self, id: Id, weight: Weight) {
        match self.weights.entry(id) {
            Entry::Occupied(mut o) => {
                let w = o.get_mut();
                *w = w.saturating_add(weight);
            }
            Entry::Vacant(v) => {
                v.insert(weight);
                self.order.push(id);
            }
        }
    }
}

impl std::iter::FromIterator<(Id, Weight)> for ValidatorSet {
    fn from_iter<I: IntoIterator<Item = (Id, Weight)>>(iter: I) -> Self {
        let mut set = ValidatorSet::new();
        for (id, weight) in iter {
            set.insert(id, weight);
        }
        set
    }
}

impl ValidatorWeights for ValidatorSet {
    fn weight(&self, validator_id: &Id) -> Weight {
        self.weights.get(validator_id).cloned().unwrap_or(0)
    }

    fn beacons(&self) -> Vec<Id> {
        self.order.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_validator_has_no_weight() {
        let set: ValidatorSet = vec![(Id::one(), 10)].into_iter().collect();
        assert_eq!(set.weight(&Id::one()), 10);
        assert_eq!(set.weight(&Id::two()), 0);
    }

    #[test]
    fn test_beacons_keep_insertion_order() {
        let set: ValidatorSet =
            vec![(Id::two(), 1), (Id::zero(), 2), (Id::one(), 3)].into_iter().collect();
        assert_eq!(set.beacons(), vec![Id::two(), Id::zero(), Id::one()]);
    }

    #[test]
    fn test_duplicate_insert_saturates() {
        let mut set = ValidatorSet::new();
        set.insert(Id::one(), u64::MAX - 1);
        set.insert(Id::one(), 5);
        set.insert(Id::two(), 1);
        assert_eq!(set.weight(&Id::one()), u64::MAX);
        assert_eq!(set.beacons().len(), 2);
    }
}

//! A membership set over dense keys which can be emptied in constant time.
//!
//! Every key stores the epoch in which it was last inserted; a key is a member if and only if its
//! stamp equals the current epoch. Moving to the next epoch therefore empties the set without
//! touching the stamps, which is what the propagation engine needs when it collects the changed
//! variables of one cycle after another.

use super::KeyedVec;
use super::StorageKey;

#[derive(Debug, Clone)]
pub struct EpochSet<Key> {
    stamps: KeyedVec<Key, u32>,
    /// Stamps are never equal to 0 after an insertion, so a fresh set starts at epoch 1.
    epoch: u32,
}

impl<Key: StorageKey> EpochSet<Key> {
    pub fn new(num_keys: usize) -> Self {
        let mut stamps = KeyedVec::default();
        stamps.resize(num_keys, 0);
        EpochSet { stamps, epoch: 1 }
    }

    /// Empties the set.
    pub fn next_epoch(&mut self) {
        if self.epoch == u32::MAX {
            self.stamps.iter_mut().for_each(|stamp| *stamp = 0);
            self.epoch = 0;
        }
        self.epoch += 1;
    }

    /// Inserts the key; returns `true` if it was not yet a member during the current epoch.
    pub fn insert(&mut self, key: Key) -> bool {
        let stamp = &mut self.stamps[key];
        if *stamp == self.epoch {
            return false;
        }
        *stamp = self.epoch;
        true
    }

    pub fn contains(&self, key: Key) -> bool {
        self.stamps.get(key).is_some_and(|stamp| *stamp == self.epoch)
    }

    pub fn capacity(&self) -> usize {
        self.stamps.len()
    }
}

//! Per-owner mutual exclusion around cart read-modify-write episodes.

use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::carts::models::CartOwner;

#[derive(Debug, Default)]
pub(crate) struct OwnerLocks {
    registry: StdMutex<FxHashMap<CartOwner, Arc<Mutex<()>>>>,
}

/// Holds every requested owner lock until dropped.
#[derive(Debug)]
pub(crate) struct OwnerGuard {
    _guards: SmallVec<[OwnedMutexGuard<()>; 2]>,
}

impl OwnerLocks {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Lock every owner in `owners`.
    ///
    /// Owners are locked in their total order so two episodes touching the
    /// same pair of carts cannot deadlock.
    pub(crate) async fn lock(&self, owners: impl IntoIterator<Item = CartOwner>) -> OwnerGuard {
        let mut owners: SmallVec<[CartOwner; 2]> = owners.into_iter().collect();

        owners.sort();
        owners.dedup();

        let mutexes: SmallVec<[Arc<Mutex<()>>; 2]> = {
            let mut registry = self
                .registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            // Entries referenced only by the registry are idle.
            registry.retain(|_, mutex| Arc::strong_count(mutex) > 1);

            owners
                .into_iter()
                .map(|owner| Arc::clone(registry.entry(owner).or_default()))
                .collect()
        };

        let mut guards = SmallVec::new();

        for mutex in mutexes {
            guards.push(mutex.lock_owned().await);
        }

        OwnerGuard { _guards: guards }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

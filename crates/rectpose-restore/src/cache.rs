use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::restore::SolvedPose;

/// Last accepted solution, shared between threads.
///
/// The slot is replaced as a whole under the lock, so readers never observe a
/// partially written pose.
#[derive(Debug, Default)]
pub struct PoseCache {
    latest: Mutex<Option<SolvedPose>>,
}

impl PoseCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // the slot holds plain data, so a poisoned lock is still consistent
    fn slot(&self) -> MutexGuard<'_, Option<SolvedPose>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the cached solution and return the previous one.
    pub fn store(&self, solved: SolvedPose) -> Option<SolvedPose> {
        self.slot().replace(solved)
    }

    /// The cached solution, if any.
    pub fn latest(&self) -> Option<SolvedPose> {
        *self.slot()
    }

    /// Drop the cached solution.
    pub fn clear(&self) -> Option<SolvedPose> {
        self.slot().take()
    }
}

//! Identity types for particles.

use serde::{Deserialize, Serialize};

/// Unique identifier for one particle lifetime.
///
/// A fresh ID is allocated at every emission, so a recycled particle gets a
/// new identity when it is re-emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticleId(u64);

impl ParticleId {
    /// Null/invalid particle ID.
    pub const NULL: Self = Self(0);

    /// Creates a particle ID from a raw value (for deserialization).
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Checks if this is a valid (non-null) particle ID.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Monotonic allocator for particle IDs.
///
/// Passed into the simulation explicitly instead of living behind a process
/// global, so tests can replay the exact IDs handed out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleIdAllocator {
    next: u64,
}

impl ParticleIdAllocator {
    /// Creates an allocator starting at ID 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Hands out the next ID. Never returns [`ParticleId::NULL`].
    pub fn allocate(&mut self) -> ParticleId {
        let id = ParticleId(self.next);
        self.next += 1;
        id
    }
}

impl Default for ParticleIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_is_monotonic_and_never_null() {
        let mut ids = ParticleIdAllocator::new();
        let first = ids.allocate();
        let second = ids.allocate();

        assert!(first.is_valid());
        assert!(second.is_valid());
        assert!(second.raw() > first.raw());
        assert_ne!(first, second);
    }

    #[test]
    fn raw_round_trip() {
        let id = ParticleId::from_raw(42);
        assert_eq!(id.raw(), 42);
        assert!(!ParticleId::NULL.is_valid());
    }
}

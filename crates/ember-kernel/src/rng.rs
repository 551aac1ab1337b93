//! Uniform random sampling for emission.
//!
//! Every variance term in an [`EmitterConfig`](crate::emitter::EmitterConfig)
//! is scaled by an independent draw from [-1, 1]. The sampler is injected
//! into the simulation so emission is seedable and deterministic under test.

/// Uniform sampler over [-1, 1].
pub trait UnitRng {
    /// Returns the next sample in [-1, 1].
    fn unit(&mut self) -> f32;
}

/// Default sampler backed by [`fastrand::Rng`].
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: fastrand::Rng,
}

impl SeededRng {
    /// Creates a sampler with an OS-provided seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Creates a sampler with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRng for SeededRng {
    fn unit(&mut self) -> f32 {
        self.rng.f32() * 2.0 - 1.0
    }
}

/// Sampler that always returns the same value.
///
/// Collapses every sampled distribution to a single point, which pins down
/// emission exactly in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedRng(pub f32);

impl UnitRng for FixedRng {
    fn unit(&mut self) -> f32 {
        self.0
    }
}

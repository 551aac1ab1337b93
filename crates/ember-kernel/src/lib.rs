//! # Ember Kernel
//!
//! Particle simulation and software rendering for the Ember particle system.
//!
//! This crate provides the per-particle core:
//! - Randomized emission from an [`EmitterConfig`](emitter::EmitterConfig)
//!   distribution (base value + symmetric variance per field)
//! - Physics integration with gravity plus radial and tangential acceleration
//!   anchored to the emission origin
//! - Linear color/size/rotation interpolation over each particle's lifetime
//! - Five render styles, from gradient discs to per-pixel sprite tinting
//! - A [`Surface`](surface::Surface) abstraction with a software raster
//!   implementation for headless use and tests
//!
//! ## Pipeline
//!
//! An external pool owns the particles and drives the per-frame cycle:
//! `initialize` samples a birth state, `step` advances physics and
//! interpolation with the elapsed milliseconds, and a [`ParticleRenderer`]
//! paints the stepped state. Particles whose lifetime has run out report
//! `is_alive() == false` and are recycled by re-initializing them.
//!
//! ## Determinism
//!
//! The uniform sampler and the ID allocator are injected rather than global,
//! so a fixed seed reproduces an emission exactly.
//!
//! # Example
//!
//! ```
//! use ember_common::ParticleIdAllocator;
//! use ember_kernel::{EmitterConfig, Particle, SeededRng};
//! use glam::Vec2;
//!
//! let config = EmitterConfig::sparks(Vec2::new(160.0, 120.0));
//! let mut rng = SeededRng::with_seed(1);
//! let mut ids = ParticleIdAllocator::new();
//!
//! let mut particle = Particle::new();
//! particle.initialize(&config, &mut rng, &mut ids);
//! particle.step(16.0, &config);
//! assert!(particle.is_alive());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod canvas;
pub mod emitter;
pub mod particle;
pub mod render;
pub mod rng;
pub mod sprite;
pub mod surface;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::canvas::*;
    pub use crate::emitter::*;
    pub use crate::particle::*;
    pub use crate::render::*;
    pub use crate::rng::*;
    pub use crate::sprite::*;
    pub use crate::surface::*;
}

pub use prelude::*;

//! Emitter configuration: a distribution over initial particle states.

use ember_common::Rgba;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Read-only description of how new particles are born.
///
/// Every `*_variance` field is a symmetric perturbation: at emission time the
/// effective value is `base + variance * u`, with `u` drawn uniformly from
/// [-1, 1] and one independent draw per field. The owning emitter supplies
/// this to [`Particle::initialize`](crate::particle::Particle::initialize)
/// and [`Particle::step`](crate::particle::Particle::step); the core never
/// mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Emission origin.
    pub position: Vec2,
    /// Component-wise spread of the emission origin.
    pub position_variance: Vec2,
    /// Initial direction in degrees.
    pub angle: f32,
    /// Spread of the initial direction in degrees.
    pub angle_variance: f32,
    /// Initial speed magnitude.
    pub speed: f32,
    /// Spread of the initial speed.
    pub speed_variance: f32,
    /// Color at birth.
    pub start_color: Rgba,
    /// Per-channel spread of the birth color.
    pub start_color_variance: Rgba,
    /// Color at death.
    pub end_color: Rgba,
    /// Per-channel spread of the death color.
    pub end_color_variance: Rgba,
    /// Size at birth, floored at 0 after variance.
    pub start_size: f32,
    /// Spread of the birth size.
    pub start_size_variance: f32,
    /// Size at death, floored at 0 after variance.
    pub end_size: f32,
    /// Spread of the death size.
    pub end_size_variance: f32,
    /// Lifetime in seconds, floored at 0 after variance.
    pub lifespan: f32,
    /// Spread of the lifetime in seconds.
    pub lifespan_variance: f32,
    /// Acceleration away from the emission origin (negative pulls inward).
    pub radial_acceleration: f32,
    /// Spread of the radial acceleration.
    pub radial_acceleration_variance: f32,
    /// Acceleration perpendicular to the radial direction, producing swirl.
    pub tangential_acceleration: f32,
    /// Spread of the tangential acceleration.
    pub tangential_acceleration_variance: f32,
    /// Constant acceleration field. The integrator mirrors the y component
    /// into screen space, so a negative y accelerates particles down-screen.
    pub gravity: Vec2,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            position_variance: Vec2::ZERO,
            angle: 90.0,
            angle_variance: 10.0,
            speed: 60.0,
            speed_variance: 20.0,
            start_color: Rgba::WHITE,
            start_color_variance: Rgba::TRANSPARENT,
            end_color: Rgba::WHITE.faded(),
            end_color_variance: Rgba::TRANSPARENT,
            start_size: 20.0,
            start_size_variance: 5.0,
            end_size: 0.0,
            end_size_variance: 0.0,
            lifespan: 1.0,
            lifespan_variance: 0.25,
            radial_acceleration: 0.0,
            radial_acceleration_variance: 0.0,
            tangential_acceleration: 0.0,
            tangential_acceleration_variance: 0.0,
            gravity: Vec2::ZERO,
        }
    }
}

impl EmitterConfig {
    /// Fast, short-lived sparks that arc under gravity.
    #[must_use]
    pub fn sparks(position: Vec2) -> Self {
        Self {
            position,
            angle: 90.0,
            angle_variance: 40.0,
            speed: 150.0,
            speed_variance: 60.0,
            start_color: Rgba::new(1.0, 0.9, 0.5, 1.0),
            end_color: Rgba::new(1.0, 0.4, 0.1, 0.0),
            start_size: 4.0,
            start_size_variance: 1.5,
            end_size: 1.0,
            lifespan: 0.5,
            lifespan_variance: 0.2,
            gravity: Vec2::new(0.0, -98.0),
            ..Self::default()
        }
    }

    /// Slow, soft glow discs that swell and fade in place.
    #[must_use]
    pub fn glow(position: Vec2) -> Self {
        Self {
            position,
            position_variance: Vec2::new(4.0, 4.0),
            angle_variance: 180.0,
            speed: 15.0,
            speed_variance: 10.0,
            start_color: Rgba::new(1.0, 1.0, 1.0, 0.8),
            start_color_variance: Rgba::new(0.0, 0.0, 0.1, 0.1),
            end_color: Rgba::new(0.6, 0.7, 1.0, 0.0),
            start_size: 40.0,
            start_size_variance: 10.0,
            lifespan: 2.5,
            lifespan_variance: 0.5,
            ..Self::default()
        }
    }

    /// Particles that orbit the emission origin on widening spirals.
    #[must_use]
    pub fn swirl(position: Vec2) -> Self {
        Self {
            position,
            angle_variance: 180.0,
            speed: 50.0,
            speed_variance: 10.0,
            radial_acceleration: -30.0,
            radial_acceleration_variance: 10.0,
            tangential_acceleration: 80.0,
            tangential_acceleration_variance: 20.0,
            start_size: 8.0,
            start_size_variance: 2.0,
            end_size: 2.0,
            lifespan: 1.5,
            lifespan_variance: 0.3,
            ..Self::default()
        }
    }

    /// Sets the emission origin.
    #[must_use]
    pub const fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Sets the constant acceleration field.
    #[must_use]
    pub const fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets the birth and death colors.
    #[must_use]
    pub const fn with_colors(mut self, start: Rgba, end: Rgba) -> Self {
        self.start_color = start;
        self.end_color = end;
        self
    }

    /// Sets the birth and death sizes.
    #[must_use]
    pub const fn with_sizes(mut self, start: f32, end: f32) -> Self {
        self.start_size = start;
        self.end_size = end;
        self
    }

    /// Sets the base lifetime in seconds.
    #[must_use]
    pub const fn with_lifespan(mut self, lifespan: f32) -> Self {
        self.lifespan = lifespan;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_keep_sane_lifetimes() {
        for config in [
            EmitterConfig::sparks(Vec2::ZERO),
            EmitterConfig::glow(Vec2::ZERO),
            EmitterConfig::swirl(Vec2::ZERO),
        ] {
            // Variance can shorten a life but never below zero at emission.
            assert!(config.lifespan > config.lifespan_variance);
            assert!(config.start_size >= 0.0);
        }
    }

    #[test]
    fn builder_chain() {
        let config = EmitterConfig::default()
            .with_position(Vec2::new(50.0, 75.0))
            .with_gravity(Vec2::new(0.0, -40.0))
            .with_sizes(12.0, 3.0)
            .with_lifespan(2.0);

        assert!((config.position.x - 50.0).abs() < f32::EPSILON);
        assert!((config.gravity.y + 40.0).abs() < f32::EPSILON);
        assert!((config.start_size - 12.0).abs() < f32::EPSILON);
        assert!((config.end_size - 3.0).abs() < f32::EPSILON);
        assert!((config.lifespan - 2.0).abs() < f32::EPSILON);
    }
}

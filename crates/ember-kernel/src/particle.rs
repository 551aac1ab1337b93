//! Per-particle simulation: randomized emission, physics integration, and
//! lifetime interpolation.
//!
//! A particle is owned and recycled by an external pool. The pool calls
//! [`Particle::initialize`] to (re)emit it, [`Particle::step`] once per frame
//! with the elapsed milliseconds, and discards or re-emits the particle once
//! [`Particle::is_alive`] reports false. Within a frame a particle must be
//! fully stepped before it is drawn.

use ember_common::{ParticleId, ParticleIdAllocator, Rgba};
use glam::Vec2;

use crate::emitter::EmitterConfig;
use crate::rng::UnitRng;

/// A single simulated particle.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Unique token for this particle's current life.
    pub id: ParticleId,
    /// Remaining lifetime in seconds; the particle is alive while positive.
    pub time_to_live: f32,
    /// Emission origin captured at birth.
    pub start_position: Vec2,
    /// Current position.
    pub position: Vec2,
    /// Velocity vector, in units per second.
    pub direction: Vec2,
    /// Current color.
    pub color: Rgba,
    /// Per-second color rate, fixed at birth.
    pub delta_color: Rgba,
    /// Current size.
    pub size: f32,
    /// Per-second size rate, fixed at birth.
    pub delta_size: f32,
    /// Current rotation in radians.
    pub rotation: f32,
    /// Per-second rotation rate. No emission path assigns a non-zero rate
    /// yet, so rotation stays inert.
    pub delta_rotation: f32,
    /// Acceleration away from the emission origin.
    pub radial_acceleration: f32,
    /// Acceleration perpendicular to the radial direction.
    pub tangential_acceleration: f32,
}

impl Particle {
    /// Creates a dead particle. Call [`Particle::initialize`] to emit it.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ParticleId::NULL,
            time_to_live: 0.0,
            start_position: Vec2::ZERO,
            position: Vec2::ZERO,
            direction: Vec2::ZERO,
            color: Rgba::TRANSPARENT,
            delta_color: Rgba::TRANSPARENT,
            size: 0.0,
            delta_size: 0.0,
            rotation: 0.0,
            delta_rotation: 0.0,
            radial_acceleration: 0.0,
            tangential_acceleration: 0.0,
        }
    }

    /// Samples a fresh birth state from `config`, fully overwriting any
    /// previous life.
    ///
    /// Every variance term consumes one independent draw from `rng`, and a
    /// fresh ID is taken from `ids`. A lifespan that floors to zero yields an
    /// immediately-dead particle with zeroed interpolation rates instead of a
    /// division by zero.
    pub fn initialize(
        &mut self,
        config: &EmitterConfig,
        rng: &mut dyn UnitRng,
        ids: &mut ParticleIdAllocator,
    ) {
        self.id = ids.allocate();

        self.time_to_live =
            (config.lifespan + config.lifespan_variance * rng.unit()).max(0.0);

        self.position =
            config.position + config.position_variance * Vec2::new(rng.unit(), rng.unit());
        self.start_position = self.position;

        // The configured angle is mirrored into the y-down screen coordinate
        // system; gravity gets the matching flip in `step`.
        let angle =
            (360.0 - config.angle + config.angle_variance * rng.unit()).to_radians();

        let start_color = sample_color(config.start_color, config.start_color_variance, rng);
        let end_color = sample_color(config.end_color, config.end_color_variance, rng);
        self.color = start_color;

        let start_size = (config.start_size + config.start_size_variance * rng.unit()).max(0.0);
        let end_size = (config.end_size + config.end_size_variance * rng.unit()).max(0.0);
        self.size = start_size;

        if self.time_to_live > 0.0 {
            self.delta_color = (end_color - start_color) / self.time_to_live;
            self.delta_size = (end_size - start_size) / self.time_to_live;
        } else {
            self.delta_color = Rgba::TRANSPARENT;
            self.delta_size = 0.0;
        }

        let unit = Vec2::new(angle.cos(), angle.sin());
        self.direction = unit * (config.speed + config.speed_variance * rng.unit());

        self.radial_acceleration =
            config.radial_acceleration + config.radial_acceleration_variance * rng.unit();
        self.tangential_acceleration =
            config.tangential_acceleration + config.tangential_acceleration_variance * rng.unit();

        self.rotation = 0.0;
        self.delta_rotation = 0.0;
    }

    /// Advances the particle by `delta_ms` milliseconds.
    ///
    /// Physics runs in emission-relative space so the radial and tangential
    /// components stay anchored to the birth point, then integrates with
    /// semi-implicit Euler before interpolating color, size, and rotation.
    pub fn step(&mut self, delta_ms: f32, config: &EmitterConfig) {
        let dt = delta_ms / 1000.0;

        self.time_to_live -= dt;

        // Translate into emission-relative space: radial points outward from
        // the birth point even while the emitter itself moves.
        let diff = self.start_position;
        self.position -= diff;

        let mut radial = self.position.normalize_or_zero();
        let tangential = Vec2::new(-radial.y, radial.x) * -self.tangential_acceleration;
        radial *= self.radial_acceleration;

        // Gravity y is mirrored to match the screen-space convention the
        // emission angle was sampled in.
        let gravity = Vec2::new(config.gravity.x, -config.gravity.y);

        let acceleration = radial + tangential + gravity;
        self.direction += acceleration * dt;
        self.position += self.direction * dt;
        self.position += diff;

        self.color += self.delta_color * dt;
        self.size = (self.size + self.delta_size * dt).max(0.0);
        self.rotation += self.delta_rotation * dt;
    }

    /// Whether the particle still has lifetime left.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.time_to_live > 0.0
    }

    /// Kills the particle immediately.
    ///
    /// Idempotent; the only effect is making the particle eligible for
    /// removal on the owner's next pass.
    pub fn kill(&mut self) {
        self.time_to_live = 0.0;
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::new()
    }
}

/// Samples one color endpoint; each channel is clamped into [0, 1] at birth.
fn sample_color(base: Rgba, variance: Rgba, rng: &mut dyn UnitRng) -> Rgba {
    Rgba::new(
        (base.r + variance.r * rng.unit()).clamp(0.0, 1.0),
        (base.g + variance.g * rng.unit()).clamp(0.0, 1.0),
        (base.b + variance.b * rng.unit()).clamp(0.0, 1.0),
        (base.a + variance.a * rng.unit()).clamp(0.0, 1.0),
    )
}

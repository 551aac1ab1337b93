//! Render strategies: turn simulated particle state into draw calls.
//!
//! Each [`ParticleRenderer`] draws one [`RenderStyle`], selected at creation.
//! Every style reads the particle's current position, size, and color and
//! paints through the [`Surface`] abstraction; none of them mutate particle
//! state.

use ember_common::PixelRgba;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;
use crate::sprite::{SpriteImage, SpriteSlot};
use crate::surface::{Paint, Surface};

/// Fixed star outline in its native coordinates; a particle of size
/// [`STAR_NATIVE_SIZE`] draws it unscaled.
const STAR_OUTLINE: [Vec2; 10] = [
    Vec2::new(-26.0, -5.5),
    Vec2::new(-7.5, -7.5),
    Vec2::new(-1.5, -26.0),
    Vec2::new(5.6, -9.0),
    Vec2::new(25.0, -10.0),
    Vec2::new(10.0, 3.5),
    Vec2::new(17.0, 22.0),
    Vec2::new(0.5, 12.0),
    Vec2::new(-14.0, 24.0),
    Vec2::new(-10.5, 4.5),
];

/// Particle size at which the star outline renders at native scale.
const STAR_NATIVE_SIZE: f32 = 50.0;

/// How a particle is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderStyle {
    /// Radial gradient disc: opaque center fading to transparent at the rim.
    #[default]
    DiscGradient,
    /// Bright core with a thin glowing rim: the gradient stays opaque out to
    /// 80% of the radius.
    SunGradient,
    /// Solid-color ten-vertex star.
    Star,
    /// Sprite recolored per-pixel with the particle color.
    TintedSprite,
    /// Plain scaled sprite blit, no tint and no visibility cutoff.
    Sprite,
}

/// Reused scratch pixel buffer for the tinted-sprite path.
///
/// One buffer serves every particle a renderer draws in a frame: each draw
/// acquires it at the particle's size, writes, and reads it back before the
/// next draw resizes it. Exclusive access through `&mut` keeps that
/// write/read pair whole.
#[derive(Debug, Default)]
pub struct ScratchBuffer {
    width: u32,
    height: u32,
    pixels: Vec<PixelRgba>,
}

impl ScratchBuffer {
    /// Creates an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resizes to exactly `width x height` and clears to transparent.
    pub fn acquire(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize((width as usize) * (height as usize), PixelRgba::transparent());
    }

    /// Current width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Current height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[PixelRgba] {
        &self.pixels
    }

    /// Mutable pixels in row-major order.
    pub fn pixels_mut(&mut self) -> &mut [PixelRgba] {
        &mut self.pixels
    }

    /// Rasterizes `image` to cover the whole buffer, nearest neighbour.
    pub fn blit_scaled(&mut self, image: &SpriteImage) {
        for y in 0..self.height {
            let src_y = y * image.height() / self.height;
            for x in 0..self.width {
                let src_x = x * image.width() / self.width;
                self.pixels[(y * self.width + x) as usize] = image.pixel(src_x, src_y);
            }
        }
    }
}

/// Draws particles of one style onto a [`Surface`].
///
/// Bitmap styles hold the sprite slot and the scratch buffer; vector styles
/// leave both untouched.
#[derive(Debug, Default)]
pub struct ParticleRenderer {
    style: RenderStyle,
    sprite: SpriteSlot,
    scratch: ScratchBuffer,
}

impl ParticleRenderer {
    /// Creates a renderer for a vector style.
    #[must_use]
    pub fn new(style: RenderStyle) -> Self {
        Self {
            style,
            sprite: SpriteSlot::empty(),
            scratch: ScratchBuffer::new(),
        }
    }

    /// Creates a renderer whose bitmap styles draw from `sprite`.
    #[must_use]
    pub fn with_sprite(style: RenderStyle, sprite: SpriteSlot) -> Self {
        Self {
            style,
            sprite,
            scratch: ScratchBuffer::new(),
        }
    }

    /// The style this renderer draws.
    #[must_use]
    pub const fn style(&self) -> RenderStyle {
        self.style
    }

    /// Installs the sprite once its asset finishes loading.
    pub fn install_sprite(&mut self, image: SpriteImage) {
        self.sprite.install(image);
    }

    /// Paints `particle` in its current state.
    ///
    /// Silently skips particles that fail the visibility cutoff, and bitmap
    /// styles whose sprite has not finished loading.
    pub fn draw(&mut self, particle: &Particle, surface: &mut dyn Surface) {
        if self.style != RenderStyle::Sprite && !is_visible(particle) {
            return;
        }

        match self.style {
            RenderStyle::DiscGradient => draw_gradient_disc(particle, 0.0, surface),
            RenderStyle::SunGradient => draw_gradient_disc(particle, 0.8, surface),
            RenderStyle::Star => draw_star(particle, surface),
            RenderStyle::TintedSprite => {
                if let Some(image) = self.sprite.get() {
                    draw_tinted(particle, image, &mut self.scratch, surface);
                }
            }
            RenderStyle::Sprite => {
                if let Some(image) = self.sprite.get() {
                    surface.draw_image(
                        image,
                        particle.position,
                        Vec2::splat(particle.size),
                    );
                }
            }
        }
    }
}

/// Cheap visibility heuristic: particles smaller than a pixel or within one
/// radius of the left/top edge are skipped. Asymmetric on purpose; the
/// right/bottom edges are left to surface clipping.
fn is_visible(particle: &Particle) -> bool {
    particle.size >= 1.0
        && particle.position.x >= particle.size
        && particle.position.y >= particle.size
}

fn draw_gradient_disc(particle: &Particle, opaque_stop: f32, surface: &mut dyn Surface) {
    let color = particle.color;
    let paint = Paint::Radial {
        stops: [(opaque_stop, color.opaque()), (1.0, color.faded())],
    };
    surface.fill_circle(particle.position, particle.size, &paint);
}

fn draw_star(particle: &Particle, surface: &mut dyn Surface) {
    surface.save();
    surface.translate(particle.position);
    surface.scale(Vec2::splat(particle.size / STAR_NATIVE_SIZE));
    surface.fill_polygon(&STAR_OUTLINE, particle.color);
    surface.restore();
}

/// The O(size²) path: rasterize the sprite at the particle's size, recolor
/// every covered pixel, and write the result raw.
fn draw_tinted(
    particle: &Particle,
    image: &SpriteImage,
    scratch: &mut ScratchBuffer,
    surface: &mut dyn Surface,
) {
    let side = particle.size as u32;
    scratch.acquire(side, side);
    scratch.blit_scaled(image);

    let tint = particle.color.to_pixel();
    let alpha = particle.color.a.clamp(0.0, 1.0);
    for pixel in scratch.pixels_mut() {
        if pixel.is_transparent() {
            continue;
        }
        let a = (f32::from(pixel.a) * alpha).round() as u8;
        *pixel = PixelRgba::new(tint.r, tint.g, tint.b, a);
    }

    surface.put_pixels(particle.position, side, side, scratch.pixels());
}

#[cfg(test)]
mod tests {
    use ember_common::{ParticleIdAllocator, Rgba};

    use super::*;
    use crate::emitter::EmitterConfig;
    use crate::rng::FixedRng;

    /// Surface that records calls instead of rasterizing.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        calls: Vec<String>,
        put_pixels: Vec<(Vec2, u32, u32, Vec<PixelRgba>)>,
        polygons: Vec<Vec<Vec2>>,
        scales: Vec<Vec2>,
    }

    impl Surface for RecordingSurface {
        fn save(&mut self) {
            self.calls.push("save".into());
        }
        fn restore(&mut self) {
            self.calls.push("restore".into());
        }
        fn translate(&mut self, _offset: Vec2) {
            self.calls.push("translate".into());
        }
        fn scale(&mut self, factor: Vec2) {
            self.calls.push("scale".into());
            self.scales.push(factor);
        }
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _paint: &Paint) {
            self.calls.push("fill_circle".into());
        }
        fn fill_polygon(&mut self, points: &[Vec2], _color: Rgba) {
            self.calls.push("fill_polygon".into());
            self.polygons.push(points.to_vec());
        }
        fn draw_image(&mut self, _image: &SpriteImage, _pos: Vec2, _size: Vec2) {
            self.calls.push("draw_image".into());
        }
        fn put_pixels(&mut self, pos: Vec2, width: u32, height: u32, pixels: &[PixelRgba]) {
            self.calls.push("put_pixels".into());
            self.put_pixels.push((pos, width, height, pixels.to_vec()));
        }
    }

    fn particle_at(position: Vec2, size: f32) -> Particle {
        let config = EmitterConfig {
            position,
            start_size: size,
            start_size_variance: 0.0,
            end_size: size,
            end_size_variance: 0.0,
            ..EmitterConfig::default()
        };
        let mut particle = Particle::new();
        particle.initialize(
            &config,
            &mut FixedRng(0.0),
            &mut ParticleIdAllocator::new(),
        );
        particle
    }

    fn checker_sprite() -> SpriteImage {
        // 2x2: opaque white, transparent, half-alpha white, opaque black.
        SpriteImage::from_pixels(
            2,
            2,
            vec![
                PixelRgba::new(255, 255, 255, 255),
                PixelRgba::transparent(),
                PixelRgba::new(255, 255, 255, 128),
                PixelRgba::new(0, 0, 0, 255),
            ],
        )
        .expect("valid sprite")
    }

    #[test]
    fn subpixel_particles_never_draw() {
        let mut surface = RecordingSurface::default();
        for position in [
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(-50.0, 400.0),
        ] {
            let particle = particle_at(position, 0.5);
            for style in [
                RenderStyle::DiscGradient,
                RenderStyle::SunGradient,
                RenderStyle::Star,
                RenderStyle::TintedSprite,
            ] {
                let mut renderer =
                    ParticleRenderer::with_sprite(style, SpriteSlot::loaded(checker_sprite()));
                renderer.draw(&particle, &mut surface);
            }
        }
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn cutoff_skips_particles_near_the_top_left_edge() {
        let mut surface = RecordingSurface::default();
        let mut renderer = ParticleRenderer::new(RenderStyle::DiscGradient);

        // Inside the cutoff margin on x.
        renderer.draw(&particle_at(Vec2::new(5.0, 100.0), 10.0), &mut surface);
        assert!(surface.calls.is_empty());

        // Clear of the margin on both axes.
        renderer.draw(&particle_at(Vec2::new(100.0, 100.0), 10.0), &mut surface);
        assert_eq!(surface.calls, ["fill_circle"]);
    }

    #[test]
    fn direct_sprite_ignores_the_cutoff() {
        let mut surface = RecordingSurface::default();
        let mut renderer =
            ParticleRenderer::with_sprite(RenderStyle::Sprite, SpriteSlot::loaded(checker_sprite()));

        renderer.draw(&particle_at(Vec2::new(0.0, 0.0), 0.5), &mut surface);
        assert_eq!(surface.calls, ["draw_image"]);
    }

    #[test]
    fn unloaded_sprite_is_a_silent_no_op() {
        let mut surface = RecordingSurface::default();
        let particle = particle_at(Vec2::new(100.0, 100.0), 10.0);

        let mut tinted = ParticleRenderer::new(RenderStyle::TintedSprite);
        tinted.draw(&particle, &mut surface);
        let mut direct = ParticleRenderer::new(RenderStyle::Sprite);
        direct.draw(&particle, &mut surface);

        assert!(surface.calls.is_empty());
    }

    #[test]
    fn star_draws_through_the_transform_stack() {
        let mut surface = RecordingSurface::default();
        let mut renderer = ParticleRenderer::new(RenderStyle::Star);
        renderer.draw(&particle_at(Vec2::new(100.0, 100.0), 25.0), &mut surface);

        assert_eq!(
            surface.calls,
            ["save", "translate", "scale", "fill_polygon", "restore"]
        );
        // Size 25 on a native-50 outline halves it.
        assert_eq!(surface.scales[0], Vec2::splat(0.5));
        assert_eq!(surface.polygons[0].len(), 10);
    }

    #[test]
    fn tint_overwrites_rgb_and_scales_alpha() {
        let mut surface = RecordingSurface::default();
        let mut renderer = ParticleRenderer::with_sprite(
            RenderStyle::TintedSprite,
            SpriteSlot::loaded(checker_sprite()),
        );

        let mut particle = particle_at(Vec2::new(100.0, 100.0), 2.0);
        particle.color = Rgba::new(1.0, 0.0, 0.0, 0.5);
        renderer.draw(&particle, &mut surface);

        let (pos, width, height, pixels) = &surface.put_pixels[0];
        assert_eq!(*pos, Vec2::new(100.0, 100.0));
        assert_eq!((*width, *height), (2, 2));
        // Opaque source pixel: tint at half alpha.
        assert_eq!(pixels[0], PixelRgba::new(255, 0, 0, 128));
        // Transparent source pixel: untouched.
        assert!(pixels[1].is_transparent());
        // Half-alpha source pixel: alpha scaled again by the particle alpha.
        assert_eq!(pixels[2], PixelRgba::new(255, 0, 0, 64));
        // Opaque black source pixel still takes the tint color.
        assert_eq!(pixels[3], PixelRgba::new(255, 0, 0, 128));
    }

    #[test]
    fn scratch_buffer_resizes_and_clears_between_draws() {
        let mut scratch = ScratchBuffer::new();
        scratch.acquire(4, 4);
        scratch.pixels_mut()[0] = PixelRgba::rgb(1, 2, 3);
        assert_eq!(scratch.pixels().len(), 16);

        scratch.acquire(2, 2);
        assert_eq!((scratch.width(), scratch.height()), (2, 2));
        assert_eq!(scratch.pixels().len(), 4);
        assert!(scratch.pixels().iter().all(PixelRgba::is_transparent));
    }

    #[test]
    fn scratch_blit_scales_nearest_neighbour() {
        let mut scratch = ScratchBuffer::new();
        scratch.acquire(4, 4);
        scratch.blit_scaled(&checker_sprite());

        // Each source pixel covers a 2x2 block.
        assert_eq!(scratch.pixels()[0], PixelRgba::new(255, 255, 255, 255));
        assert_eq!(scratch.pixels()[1], PixelRgba::new(255, 255, 255, 255));
        assert!(scratch.pixels()[2].is_transparent());
        assert_eq!(scratch.pixels()[15], PixelRgba::new(0, 0, 0, 255));
    }
}

//! Software raster surface: a CPU pixel buffer implementing [`Surface`].
//!
//! Lets the whole emission/step/draw pipeline run and be tested without a
//! windowing system. The buffer is plain RGBA8888 in row-major order;
//! [`SoftwareCanvas::as_bytes`] exposes it for upload or encoding.

use ember_common::{PixelRgba, Rgba};
use glam::Vec2;

use crate::sprite::SpriteImage;
use crate::surface::{Paint, Surface};

/// Compositing mode for fills and blits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard source-over alpha blending.
    #[default]
    Alpha,
    /// Additive: destination channels saturate toward white.
    Additive,
}

/// Affine transform restricted to translation and non-uniform scale.
#[derive(Debug, Clone, Copy)]
struct Transform {
    offset: Vec2,
    scale: Vec2,
}

impl Transform {
    const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        scale: Vec2::ONE,
    };

    fn apply(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }
}

/// Fast integer approximation of `(src * alpha + dst * (255 - alpha)) / 255`.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = u16::from(src) * alpha + u16::from(dst) * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// RGBA8888 software canvas with a translate/scale transform stack.
#[derive(Debug, Clone)]
pub struct SoftwareCanvas {
    width: u32,
    height: u32,
    pixels: Vec<PixelRgba>,
    transform: Transform,
    stack: Vec<Transform>,
    blend: BlendMode,
}

impl SoftwareCanvas {
    /// Creates a canvas cleared to transparent.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![PixelRgba::transparent(); (width as usize) * (height as usize)],
            transform: Transform::IDENTITY,
            stack: Vec::new(),
            blend: BlendMode::Alpha,
        }
    }

    /// Canvas width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Selects the blend mode for subsequent fills and blits.
    pub fn set_blend_mode(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    /// Fills every pixel with `color`, without blending.
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color.to_pixel());
    }

    /// Reads one pixel; `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<PixelRgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Raw pixel bytes in RGBA order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn blend_pixel(&mut self, x: i64, y: i64, src: PixelRgba) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let index = (y as usize) * (self.width as usize) + x as usize;
        let dst = self.pixels[index];
        let alpha = u16::from(src.a);

        self.pixels[index] = match self.blend {
            BlendMode::Alpha => PixelRgba::new(
                blend_channel(src.r, dst.r, alpha),
                blend_channel(src.g, dst.g, alpha),
                blend_channel(src.b, dst.b, alpha),
                blend_channel(255, dst.a, alpha),
            ),
            BlendMode::Additive => {
                let add = |s: u8, d: u8| {
                    let scaled = (u16::from(s) * alpha) / 255;
                    d.saturating_add(scaled as u8)
                };
                PixelRgba::new(
                    add(src.r, dst.r),
                    add(src.g, dst.g),
                    add(src.b, dst.b),
                    blend_channel(255, dst.a, alpha),
                )
            }
        };
    }
}

/// Piecewise-linear sample of a two-stop gradient at `t` in [0, 1].
///
/// Holds the first stop's color before its offset and the last stop's color
/// beyond it.
fn sample_stops(stops: &[(f32, Rgba); 2], t: f32) -> Rgba {
    let (t0, c0) = stops[0];
    let (t1, c1) = stops[1];
    if t <= t0 {
        return c0;
    }
    if t >= t1 {
        return c1;
    }
    let span = t1 - t0;
    if span <= f32::EPSILON {
        return c1;
    }
    c0 + (c1 - c0) * ((t - t0) / span)
}

impl Surface for SoftwareCanvas {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform.offset += offset * self.transform.scale;
    }

    fn scale(&mut self, factor: Vec2) {
        self.transform.scale *= factor;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        let center = self.transform.apply(center);
        // Circles stay circles: the render paths only ever scale uniformly.
        let radius = radius * self.transform.scale.x;
        if radius <= 0.0 {
            return;
        }

        let min_x = (center.x - radius).floor() as i64;
        let max_x = (center.x + radius).ceil() as i64;
        let min_y = (center.y - radius).floor() as i64;
        let max_y = (center.y + radius).ceil() as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let sample = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = sample.distance(center);
                if distance > radius {
                    continue;
                }
                let color = match paint {
                    Paint::Solid(color) => *color,
                    Paint::Radial { stops } => sample_stops(stops, distance / radius),
                };
                self.blend_pixel(x, y, color.to_pixel());
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let mapped: Vec<Vec2> = points.iter().map(|p| self.transform.apply(*p)).collect();
        let src = color.to_pixel();

        let min_y = mapped
            .iter()
            .map(|p| p.y)
            .fold(f32::INFINITY, f32::min)
            .floor() as i64;
        let max_y = mapped
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max)
            .ceil() as i64;

        // Even-odd scanline fill; the star outline is concave, so crossing
        // pairs are required rather than a convex span.
        let mut crossings: Vec<f32> = Vec::new();
        for y in min_y..=max_y {
            let scan = y as f32 + 0.5;
            crossings.clear();
            for (i, a) in mapped.iter().enumerate() {
                let b = mapped[(i + 1) % mapped.len()];
                if (a.y <= scan) != (b.y <= scan) {
                    crossings.push(a.x + (scan - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let start = (pair[0] - 0.5).ceil() as i64;
                let end = (pair[1] - 0.5).floor() as i64;
                for x in start..=end {
                    self.blend_pixel(x, y, src);
                }
            }
        }
    }

    fn draw_image(&mut self, image: &SpriteImage, pos: Vec2, size: Vec2) {
        let pos = self.transform.apply(pos);
        let size = size * self.transform.scale;
        let dst_w = size.x.round() as i64;
        let dst_h = size.y.round() as i64;
        if dst_w <= 0 || dst_h <= 0 {
            return;
        }

        let x0 = pos.x.floor() as i64;
        let y0 = pos.y.floor() as i64;
        for dy in 0..dst_h {
            let src_y = (dy * i64::from(image.height()) / dst_h) as u32;
            for dx in 0..dst_w {
                let src_x = (dx * i64::from(image.width()) / dst_w) as u32;
                self.blend_pixel(x0 + dx, y0 + dy, image.pixel(src_x, src_y));
            }
        }
    }

    fn put_pixels(&mut self, pos: Vec2, width: u32, height: u32, pixels: &[PixelRgba]) {
        if pixels.len() < (width as usize) * (height as usize) {
            return;
        }
        let x0 = pos.x.floor() as i64;
        let y0 = pos.y.floor() as i64;

        for row in 0..i64::from(height) {
            let y = y0 + row;
            if y < 0 || y >= i64::from(self.height) {
                continue;
            }
            for col in 0..i64::from(width) {
                let x = x0 + col;
                if x < 0 || x >= i64::from(self.width) {
                    continue;
                }
                let src = pixels[(row * i64::from(width) + col) as usize];
                let index = (y as usize) * (self.width as usize) + x as usize;
                self.pixels[index] = src;
            }
        }
    }
}

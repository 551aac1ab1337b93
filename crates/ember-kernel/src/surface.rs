//! The drawing-surface contract consumed by the render strategies.

use ember_common::{PixelRgba, Rgba};
use glam::Vec2;

use crate::sprite::SpriteImage;

/// Fill paint for circle primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Uniform color.
    Solid(Rgba),
    /// Two-stop radial gradient from the circle center to its rim.
    ///
    /// Stops are `(offset, color)` pairs ordered by offset in [0, 1]. The
    /// fill holds the first stop's color inside its offset and the last
    /// stop's color beyond it.
    Radial {
        /// Gradient stops ordered by offset.
        stops: [(f32, Rgba); 2],
    },
}

/// A 2D raster surface the particle renderers paint on.
///
/// Implementations provide filled circles and polygons, a translate/scale
/// transform stack with save/restore semantics, scaled image blits, and raw
/// pixel writes for pre-rasterized buffers.
pub trait Surface {
    /// Pushes a copy of the current transform onto the stack.
    fn save(&mut self);

    /// Pops the transform stack, restoring the previous transform.
    fn restore(&mut self);

    /// Translates subsequent drawing by `offset`, in current local units.
    fn translate(&mut self, offset: Vec2);

    /// Scales subsequent drawing by `factor`, component-wise.
    fn scale(&mut self, factor: Vec2);

    /// Fills a circle at `center` with `radius` using `paint`.
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);

    /// Fills the closed polygon outlined by `points` with a solid color.
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);

    /// Blits `image` scaled to `size`, top-left corner at `pos`.
    fn draw_image(&mut self, image: &SpriteImage, pos: Vec2, size: Vec2);

    /// Writes raw pixels with their top-left corner at `pos`, replacing the
    /// destination. No blending and no transform, matching raw image-data
    /// semantics.
    fn put_pixels(&mut self, pos: Vec2, width: u32, height: u32, pixels: &[PixelRgba]);
}

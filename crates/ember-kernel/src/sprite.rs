//! Sprite bitmaps for the image-backed render styles.

use ember_common::{AssetError, PixelRgba};
use tracing::debug;

/// Decoded RGBA sprite image.
#[derive(Debug, Clone)]
pub struct SpriteImage {
    width: u32,
    height: u32,
    pixels: Vec<PixelRgba>,
}

impl SpriteImage {
    /// Wraps pre-decoded RGBA pixels in row-major order.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<PixelRgba>) -> Result<Self, AssetError> {
        if width == 0 || height == 0 {
            return Err(AssetError::EmptyImage { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(AssetError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decodes a PNG from raw bytes.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|err| AssetError::Decode(err.to_string()))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        let pixels = decoded
            .pixels()
            .map(|p| PixelRgba::new(p[0], p[1], p[2], p[3]))
            .collect();

        debug!("decoded sprite image {}x{}", width, height);
        Self::from_pixels(width, height, pixels)
    }

    /// Image width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the pixel at (x, y); transparent outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> PixelRgba {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize]
        } else {
            PixelRgba::transparent()
        }
    }

    /// All pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[PixelRgba] {
        &self.pixels
    }
}

/// A sprite asset slot that may still be waiting on its image.
///
/// Drawing from an empty slot is a silent per-frame no-op: renderers tolerate
/// partially-loaded assets without failing the frame.
#[derive(Debug, Clone, Default)]
pub struct SpriteSlot {
    image: Option<SpriteImage>,
}

impl SpriteSlot {
    /// A slot with no image yet.
    #[must_use]
    pub const fn empty() -> Self {
        Self { image: None }
    }

    /// A slot that already holds its image.
    #[must_use]
    pub const fn loaded(image: SpriteImage) -> Self {
        Self { image: Some(image) }
    }

    /// Installs the image once loading completes.
    pub fn install(&mut self, image: SpriteImage) {
        self.image = Some(image);
    }

    /// The image, if it has finished loading.
    #[must_use]
    pub fn get(&self) -> Option<&SpriteImage> {
        self.image.as_ref()
    }

    /// Whether the image has finished loading.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.image.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn from_pixels_validates_dimensions() {
        let pixels = vec![PixelRgba::transparent(); 4];
        assert!(SpriteImage::from_pixels(2, 2, pixels.clone()).is_ok());

        match SpriteImage::from_pixels(3, 2, pixels.clone()) {
            Err(AssetError::DimensionMismatch { len, .. }) => assert_eq!(len, 4),
            other => panic!("expected dimension mismatch, got {other:?}"),
        }

        assert!(matches!(
            SpriteImage::from_pixels(0, 2, Vec::new()),
            Err(AssetError::EmptyImage { .. })
        ));
    }

    #[test]
    fn out_of_bounds_reads_are_transparent() {
        let sprite = SpriteImage::from_pixels(1, 1, vec![PixelRgba::rgb(9, 9, 9)])
            .expect("valid sprite");
        assert_eq!(sprite.pixel(0, 0), PixelRgba::rgb(9, 9, 9));
        assert!(sprite.pixel(1, 0).is_transparent());
        assert!(sprite.pixel(0, 5).is_transparent());
    }

    #[test]
    fn png_round_trip() {
        let mut source = RgbaImage::new(3, 2);
        source.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        source.put_pixel(2, 1, image::Rgba([0, 0, 255, 128]));

        let mut bytes = Vec::new();
        source
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png encode");

        let sprite = SpriteImage::from_png_bytes(&bytes).expect("png decode");
        assert_eq!(sprite.width(), 3);
        assert_eq!(sprite.height(), 2);
        assert_eq!(sprite.pixel(0, 0), PixelRgba::new(255, 0, 0, 255));
        assert_eq!(sprite.pixel(2, 1), PixelRgba::new(0, 0, 255, 128));
    }

    #[test]
    fn invalid_bytes_are_a_decode_error() {
        assert!(matches!(
            SpriteImage::from_png_bytes(&[1, 2, 3, 4]),
            Err(AssetError::Decode(_))
        ));
    }

    #[test]
    fn slot_loading_lifecycle() {
        let mut slot = SpriteSlot::empty();
        assert!(!slot.is_loaded());
        assert!(slot.get().is_none());

        let sprite = SpriteImage::from_pixels(1, 1, vec![PixelRgba::rgb(1, 2, 3)])
            .expect("valid sprite");
        slot.install(sprite);
        assert!(slot.is_loaded());
        assert_eq!(
            slot.get().map(|image| image.pixel(0, 0)),
            Some(PixelRgba::rgb(1, 2, 3))
        );
    }
}

//! Error types for Ember.
//!
//! The simulation core itself raises no errors: degenerate lifetimes, missing
//! assets, and off-screen particles all degrade to a visually-absent particle.
//! Errors exist only at the asset-loading boundary.

use thiserror::Error;

/// Top-level error type for Ember operations.
#[derive(Debug, Error)]
pub enum EmberError {
    /// Sprite asset errors
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sprite asset loading and decoding errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Image decode error
    #[error("failed to decode sprite image: {0}")]
    Decode(String),

    /// Image has zero width or height
    #[error("sprite image is empty: {width}x{height}")]
    EmptyImage {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
    },

    /// Pixel payload does not match the declared dimensions
    #[error("pixel data length {len} does not match {width}x{height}")]
    DimensionMismatch {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Actual pixel count supplied
        len: usize,
    },
}

/// Result type alias for Ember operations.
pub type EmberResult<T> = Result<T, EmberError>;

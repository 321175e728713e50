use thiserror::Error;

#[derive(Debug, Error)]
pub enum BaldifyError {
    #[error("failed to decode image: {0}")]
    DecodeError(String),

    #[error("failed to encode image: {0}")]
    EncodeError(String),

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("mask is {mask_width}x{mask_height} but image is {width}x{height}")]
    MaskDimensionMismatch {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Mask width in pixels.
        mask_width: u32,
        /// Mask height in pixels.
        mask_height: u32,
    },

    #[error("mask buffer holds {actual} values but {width}x{height} needs {expected}")]
    MaskLengthMismatch {
        /// Declared mask width in pixels.
        width: u32,
        /// Declared mask height in pixels.
        height: u32,
        /// Expected buffer length (`width * height`).
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    #[error("no segmenter or precomputed mask supplied")]
    MissingSegmenter,

    #[error("blend mix must be between 0.0 and 1.0, got {0}")]
    InvalidBlendMix(f32),
}

//! Head-region skin fill for person photos: locate the head of a segmented
//! person and replace it with a smoothed skin-tone fill, so the subject
//! appears bald.
//!
//! The approach is a geometric heuristic over a binary person mask — no
//! face landmarks, no hair classification. Results vary by photo; this is a
//! deliberate quality trade-off, not a defect.
//!
//! # Example
//!
//! ```no_run
//! use baldify::{Baldifier, PersonMask, PersonSegmenter};
//!
//! struct MySegmenter;
//! impl PersonSegmenter for MySegmenter {
//!     fn segment(&self, _rgba: &[u8], width: u32, height: u32) -> PersonMask {
//!         // Run your segmentation model here.
//!         PersonMask::new(width, height, vec![1; (width * height) as usize]).unwrap()
//!     }
//! }
//!
//! let bytes = std::fs::read("portrait.jpg").unwrap();
//! let result = Baldifier::new(bytes)
//!     .unwrap()
//!     .segmenter(Box::new(MySegmenter))
//!     .baldify()
//!     .unwrap();
//! std::fs::write("bald.png", &result.data).unwrap();
//! ```
#![warn(missing_docs)]

mod codec;
mod error;
/// Skin-tone sampling and the windowed-average fill loop.
pub mod fill;
mod integral;
/// Person mask type and the segmentation collaborator trait.
pub mod mask;
/// Head-region estimation from a person mask.
pub mod region;

/// Error type returned by baldify operations.
pub use error::BaldifyError;
/// Fill settings, report, and the fill operations.
pub use fill::{apply_fill, sample_skin_tone, FillReport, FillSettings};
/// Person mask and pluggable segmentation backend.
pub use mask::{PersonMask, PersonSegmenter};
/// Head-region band and estimator.
pub use region::{estimate_head_region, estimate_head_region_with, HeadRegion};

use image::RgbaImage;

/// Output image format.
#[derive(Debug, Clone, Default)]
pub enum OutputFormat {
    /// Lossless PNG — preserves the fill exactly.
    #[default]
    Png,

    /// JPEG encoding, alpha flattened over white.
    Jpeg,
}

/// Result of a single baldify operation.
#[derive(Debug, Clone)]
pub struct BaldifiedPhoto {
    /// The encoded output image bytes.
    pub data: Vec<u8>,

    /// The output format used.
    pub format: OutputFormat,

    /// Width of the output image in pixels.
    pub width: u32,

    /// Height of the output image in pixels.
    pub height: u32,

    /// What the fill pass did: region, sampled tone, radius, pixel count.
    pub report: FillReport,
}

/// Builder for baldifying person photos.
///
/// Decodes the input on construction, then runs segmentation, head-region
/// estimation, and the skin fill with configurable parameters.
pub struct Baldifier {
    input: Vec<u8>,
    settings: FillSettings,
    format: OutputFormat,
    /// Injected segmentation collaborator. The model is externally owned;
    /// this crate holds it only for the single call producing the mask.
    segmenter: Option<Box<dyn PersonSegmenter>>,
    /// Precomputed mask; takes precedence over the segmenter when set.
    mask: Option<PersonMask>,
}

impl Baldifier {
    /// Create a new baldifier from raw image bytes (JPEG, PNG, or WebP).
    pub fn new(input: Vec<u8>) -> Result<Self, BaldifyError> {
        // Validate that the input can be decoded
        codec::detect_format(&input)?;

        Ok(Self {
            input,
            settings: FillSettings::default(),
            format: OutputFormat::default(),
            segmenter: None,
            mask: None,
        })
    }

    /// Provide the person-segmentation backend.
    pub fn segmenter(mut self, segmenter: Box<dyn PersonSegmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    /// Provide a precomputed person mask instead of a segmenter.
    ///
    /// Must match the decoded image dimensions exactly; a mismatch fails
    /// the whole operation.
    pub fn mask(mut self, mask: PersonMask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Set the head-region vertical extent ratio (default: 0.6).
    pub fn extent_ratio(mut self, ratio: f64) -> Self {
        self.settings.extent_ratio = ratio;
        self
    }

    /// Set the head-region margin in pixels (default: 60).
    pub fn head_margin(mut self, margin_px: u32) -> Self {
        self.settings.margin_px = margin_px;
        self
    }

    /// Set the neighborhood-average blend weight, 0.0–1.0 (default: 0.6).
    pub fn blend_mix(mut self, mix: f32) -> Self {
        self.settings.blend_mix = mix;
        self
    }

    /// Set the smoothing-radius width divisor (default: 150).
    pub fn radius_divisor(mut self, divisor: u32) -> Self {
        self.settings.radius_divisor = divisor;
        self
    }

    /// Set the minimum smoothing radius in pixels (default: 8).
    pub fn min_radius(mut self, radius: u32) -> Self {
        self.settings.min_radius = radius;
        self
    }

    /// Set the skin-sample offset above the region bottom (default: 5).
    pub fn sample_offset(mut self, offset_px: u32) -> Self {
        self.settings.sample_offset_px = offset_px;
        self
    }

    /// Set the output format (default: `OutputFormat::Png`).
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Run the pipeline: decode → segment → estimate region → fill → encode.
    pub fn baldify(self) -> Result<BaldifiedPhoto, BaldifyError> {
        self.settings.validate()?;
        if self.mask.is_none() && self.segmenter.is_none() {
            return Err(BaldifyError::MissingSegmenter);
        }

        let decoded = codec::decode_image(&self.input)?;
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(BaldifyError::ZeroDimensions);
        }
        let mut rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mask = match (self.mask, self.segmenter) {
            (Some(mask), _) => mask,
            (None, Some(segmenter)) => segmenter.segment(rgba.as_raw(), width, height),
            (None, None) => return Err(BaldifyError::MissingSegmenter),
        };

        let report = baldify_in_place(&mut rgba, &mask, &self.settings)?;
        let data = codec::encode_image(&rgba, &self.format)?;

        Ok(BaldifiedPhoto {
            data,
            format: self.format,
            width,
            height,
            report,
        })
    }
}

/// Baldify a decoded buffer in place.
///
/// For callers that already own an `RgbaImage` and an aligned mask. The
/// buffer keeps its dimensions; only in-region, in-mask pixels change. An
/// empty mask (no person detected) is a successful no-op with
/// `filled_pixels == 0`.
pub fn baldify_in_place(
    image: &mut RgbaImage,
    mask: &PersonMask,
    settings: &FillSettings,
) -> Result<FillReport, BaldifyError> {
    settings.validate()?;
    let (width, height) = image.dimensions();
    if mask.width() != width || mask.height() != height {
        return Err(BaldifyError::MaskDimensionMismatch {
            width,
            height,
            mask_width: mask.width(),
            mask_height: mask.height(),
        });
    }

    let region = estimate_head_region_with(mask, settings.extent_ratio, settings.margin_px);
    if region.is_empty() {
        log::debug!("no person rows in mask, skipping fill");
        return Ok(FillReport {
            region,
            skin_tone: [0, 0, 0],
            radius: 0,
            filled_pixels: 0,
        });
    }

    let skin_tone = sample_skin_tone(image, region, settings.sample_offset_px);
    let radius = settings.smoothing_radius(width);
    log::debug!(
        "filling rows {}..{} with tone {:?}, radius {}",
        region.top,
        region.bottom,
        skin_tone,
        radius
    );
    let filled_pixels = apply_fill(image, mask, region, skin_tone, radius, settings.blend_mix)?;

    Ok(FillReport {
        region,
        skin_tone,
        radius,
        filled_pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_png(width: u32, height: u32) -> Vec<u8> {
        use image::codecs::png::PngEncoder;
        use image::ImageEncoder;

        let img = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                128,
                255,
            ])
        });
        let mut buffer = Vec::new();
        let encoder = PngEncoder::new(&mut buffer);
        encoder
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
            .unwrap();
        buffer
    }

    struct FullSegmenter;

    impl PersonSegmenter for FullSegmenter {
        fn segment(&self, _rgba: &[u8], width: u32, height: u32) -> PersonMask {
            PersonMask::from_fn(width, height, |_, _| true)
        }
    }

    #[test]
    fn builder_requires_segmenter_or_mask() {
        let png = make_test_png(20, 20);
        let result = Baldifier::new(png).unwrap().baldify();
        assert!(matches!(result, Err(BaldifyError::MissingSegmenter)));
    }

    #[test]
    fn builder_invalid_input() {
        let result = Baldifier::new(b"not an image".to_vec());
        assert!(result.is_err());
    }

    #[test]
    fn builder_invalid_blend_mix() {
        let png = make_test_png(20, 20);
        let result = Baldifier::new(png)
            .unwrap()
            .segmenter(Box::new(FullSegmenter))
            .blend_mix(-0.1)
            .baldify();
        assert!(matches!(result, Err(BaldifyError::InvalidBlendMix(_))));
    }

    #[test]
    fn builder_produces_png_by_default() {
        let png = make_test_png(40, 60);
        let result = Baldifier::new(png)
            .unwrap()
            .segmenter(Box::new(FullSegmenter))
            .baldify()
            .unwrap();
        assert_eq!(&result.data[1..4], b"PNG");
        assert_eq!(result.width, 40);
        assert_eq!(result.height, 60);
        assert!(result.report.filled_pixels > 0);
    }

    #[test]
    fn precomputed_mask_wins_over_segmenter() {
        struct PanickingSegmenter;
        impl PersonSegmenter for PanickingSegmenter {
            fn segment(&self, _rgba: &[u8], _width: u32, _height: u32) -> PersonMask {
                panic!("segmenter should not run when a mask is supplied");
            }
        }

        let png = make_test_png(20, 20);
        let mask = PersonMask::from_fn(20, 20, |_, _| false);
        let result = Baldifier::new(png)
            .unwrap()
            .segmenter(Box::new(PanickingSegmenter))
            .mask(mask)
            .baldify()
            .unwrap();
        assert_eq!(result.report.filled_pixels, 0);
    }

    #[test]
    fn mismatched_precomputed_mask_is_rejected() {
        let png = make_test_png(20, 20);
        let mask = PersonMask::from_fn(10, 10, |_, _| true);
        let result = Baldifier::new(png).unwrap().mask(mask).baldify();
        assert!(matches!(
            result,
            Err(BaldifyError::MaskDimensionMismatch { .. })
        ));
    }

    #[test]
    fn uniform_image_full_mask_is_identity() {
        // 10x10 uniform (200,150,100,255), all-ones mask.
        // Region covers the whole image, the sample is the uniform color,
        // every window mean is the uniform color, and blending identical
        // values changes nothing.
        let mut image = RgbaImage::from_pixel(10, 10, image::Rgba([200, 150, 100, 255]));
        let before = image.clone();
        let mask = PersonMask::from_fn(10, 10, |_, _| true);
        let report = baldify_in_place(&mut image, &mask, &FillSettings::default()).unwrap();

        assert_eq!(report.region, HeadRegion { top: 0, bottom: 10 });
        assert_eq!(report.skin_tone, [200, 150, 100]);
        assert_eq!(report.filled_pixels, 100);
        assert_eq!(image.as_raw(), before.as_raw());
    }

    #[test]
    fn empty_mask_in_place_is_noop() {
        let mut image = RgbaImage::from_fn(30, 30, |x, y| {
            image::Rgba([x as u8, y as u8, 99, 180])
        });
        let before = image.clone();
        let mask = PersonMask::from_fn(30, 30, |_, _| false);
        let report = baldify_in_place(&mut image, &mask, &FillSettings::default()).unwrap();

        assert!(report.region.is_empty());
        assert_eq!(report.filled_pixels, 0);
        assert_eq!(image.as_raw(), before.as_raw());
    }
}

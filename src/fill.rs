use image::RgbaImage;
use rayon::prelude::*;

use crate::error::BaldifyError;
use crate::integral::IntegralImage;
use crate::mask::PersonMask;
use crate::region::{HeadRegion, HEAD_EXTENT_RATIO, HEAD_MARGIN_PX};

/// Weight of the local neighborhood average in the blend; the remainder
/// anchors to the sampled skin tone. Tuning constant.
pub const BLEND_MIX: f32 = 0.6;

/// Image width is divided by this to scale the smoothing radius with
/// resolution. Tuning constant.
pub const RADIUS_DIVISOR: u32 = 150;

/// Smallest smoothing radius in pixels, avoiding visible blockiness on
/// small images.
pub const MIN_RADIUS: u32 = 8;

/// Rows above the bottom of the head region where the reference skin tone
/// is sampled; expected to land on lower-face/chin skin.
pub const SKIN_SAMPLE_OFFSET_PX: u32 = 5;

/// Tuning knobs for head-region estimation and the skin fill.
///
/// Defaults preserve the reference heuristic's constants verbatim; none of
/// them derive from a measurement.
#[derive(Debug, Clone, Copy)]
pub struct FillSettings {
    /// Fraction of the mask's vertical extent treated as head region.
    pub extent_ratio: f64,
    /// Fixed margin in pixels added below the scaled extent.
    pub margin_px: u32,
    /// Neighborhood-average weight in the blend, in `[0, 1]`.
    pub blend_mix: f32,
    /// Image width divisor for the smoothing radius.
    pub radius_divisor: u32,
    /// Lower bound on the smoothing radius in pixels.
    pub min_radius: u32,
    /// Skin-sample offset above the region bottom in pixels.
    pub sample_offset_px: u32,
}

impl Default for FillSettings {
    fn default() -> Self {
        Self {
            extent_ratio: HEAD_EXTENT_RATIO,
            margin_px: HEAD_MARGIN_PX,
            blend_mix: BLEND_MIX,
            radius_divisor: RADIUS_DIVISOR,
            min_radius: MIN_RADIUS,
            sample_offset_px: SKIN_SAMPLE_OFFSET_PX,
        }
    }
}

impl FillSettings {
    /// Smoothing radius for an image of the given width.
    ///
    /// A zero divisor is treated as 1.
    pub fn smoothing_radius(&self, width: u32) -> u32 {
        (width / self.radius_divisor.max(1)).max(self.min_radius)
    }

    pub(crate) fn validate(&self) -> Result<(), BaldifyError> {
        if !(0.0..=1.0).contains(&self.blend_mix) {
            return Err(BaldifyError::InvalidBlendMix(self.blend_mix));
        }
        Ok(())
    }
}

/// Outcome of one fill pass.
#[derive(Debug, Clone, Copy)]
pub struct FillReport {
    /// The estimated head region.
    pub region: HeadRegion,
    /// The sampled reference skin tone. `[0, 0, 0]` when nothing was filled.
    pub skin_tone: [u8; 3],
    /// The smoothing radius used. Zero when nothing was filled.
    pub radius: u32,
    /// Number of pixels replaced.
    pub filled_pixels: u64,
}

/// Read the reference skin tone: one raw RGB triple from `offset_px` rows
/// above the region bottom, horizontally centered. No averaging.
///
/// The row index saturates at 0 and clamps to the last row. The image must
/// have non-zero dimensions.
pub fn sample_skin_tone(image: &RgbaImage, region: HeadRegion, offset_px: u32) -> [u8; 3] {
    let (width, height) = image.dimensions();
    let sample_y = region.bottom.saturating_sub(offset_px).min(height - 1);
    let sample_x = width / 2;
    let px = image.get_pixel(sample_x, sample_y).0;
    [px[0], px[1], px[2]]
}

/// Replace every in-region, in-mask pixel with the skin blend, in place.
///
/// Each replaced channel is `skin * (1 - mix) + window_mean * mix`, rounded,
/// where the window mean is taken over the clamped square of `radius` around
/// the pixel — always read from a snapshot of the original buffer, so writes
/// never feed later reads. Alpha is forced to 255 on replaced pixels; all
/// other pixels are left untouched. Returns the number of pixels replaced.
///
/// Rows are processed in parallel; every worker reads the same immutable
/// snapshot and writes disjoint rows, so output is deterministic.
pub fn apply_fill(
    image: &mut RgbaImage,
    mask: &PersonMask,
    region: HeadRegion,
    skin: [u8; 3],
    radius: u32,
    mix: f32,
) -> Result<u64, BaldifyError> {
    let (width, height) = image.dimensions();
    if mask.width() != width || mask.height() != height {
        return Err(BaldifyError::MaskDimensionMismatch {
            width,
            height,
            mask_width: mask.width(),
            mask_height: mask.height(),
        });
    }
    if !(0.0..=1.0).contains(&mix) {
        return Err(BaldifyError::InvalidBlendMix(mix));
    }

    let bottom = region.bottom.min(height);
    let top = region.top.min(bottom);
    if top == bottom || width == 0 {
        return Ok(0);
    }

    let snapshot = image.as_raw().clone();
    let integral = IntegralImage::new(&snapshot, width, height);

    let inv_mix = 1.0 - mix;
    let w = width as usize;
    let row_bytes = w * 4;
    let mask_data = mask.as_raw();

    let buf: &mut [u8] = image;
    let filled = buf[top as usize * row_bytes..bottom as usize * row_bytes]
        .par_chunks_exact_mut(row_bytes)
        .enumerate()
        .map(|(dy, row)| {
            let y = top + dy as u32;
            let mask_row = &mask_data[y as usize * w..(y as usize + 1) * w];
            let mut count = 0u64;
            for x in 0..w {
                if mask_row[x] == 0 {
                    continue;
                }
                let avg = integral.window_mean(x as u32, y, radius);
                let px = &mut row[x * 4..x * 4 + 4];
                for c in 0..3 {
                    px[c] = (skin[c] as f32 * inv_mix + avg[c] as f32 * mix).round() as u8;
                }
                px[3] = 255;
                count += 1;
            }
            count
        })
        .sum();

    Ok(filled)
}

use crate::mask::PersonMask;

/// Fraction of the mask's vertical extent treated as head region.
///
/// The bounding-box top of a person mask is assumed to coincide with the top
/// of the head; scalp and upper forehead sit in roughly the top 60% of the
/// extent. Tuning constant, not a physical measurement.
pub const HEAD_EXTENT_RATIO: f64 = 0.6;

/// Fixed margin in pixels added below the scaled extent, absorbing hair
/// volume above the literal mask boundary. Tuning constant.
pub const HEAD_MARGIN_PX: u32 = 60;

/// Vertical pixel band `[top, bottom)` holding the estimated head region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadRegion {
    /// First row of the region (inclusive).
    pub top: u32,
    /// Row past the end of the region (exclusive).
    pub bottom: u32,
}

impl HeadRegion {
    /// Whether the region covers no rows.
    pub fn is_empty(&self) -> bool {
        self.top >= self.bottom
    }

    /// Number of rows in the region.
    pub fn rows(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Estimate the head region with the default ratio and margin.
pub fn estimate_head_region(mask: &PersonMask) -> HeadRegion {
    estimate_head_region_with(mask, HEAD_EXTENT_RATIO, HEAD_MARGIN_PX)
}

/// Estimate the head region of a person mask as a vertical band.
///
/// Scans for the minimum and maximum mask-positive row, then takes the top
/// `ratio` of that extent plus `margin_px` rows. A mask with no positive
/// pixels yields an empty region, never an error.
pub fn estimate_head_region_with(mask: &PersonMask, ratio: f64, margin_px: u32) -> HeadRegion {
    let width = mask.width() as usize;
    let height = mask.height();

    let mut min_y: Option<u32> = None;
    let mut max_y: u32 = 0;
    if width > 0 {
        for (y, row) in mask.as_raw().chunks_exact(width).enumerate() {
            if row.iter().any(|&v| v != 0) {
                let y = y as u32;
                if min_y.is_none() {
                    min_y = Some(y);
                }
                max_y = y;
            }
        }
    }

    let Some(min_y) = min_y else {
        // No person detected: degenerate band at the bottom edge.
        return HeadRegion {
            top: height,
            bottom: height,
        };
    };

    let extent = ((max_y - min_y) as f64 * ratio).floor() as u32;
    let bottom = min_y.saturating_add(extent).saturating_add(margin_px);

    HeadRegion {
        top: min_y,
        bottom: bottom.min(height),
    }
}

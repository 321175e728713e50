/// Summed-area table over the RGB channels of a row-major RGBA buffer.
///
/// Lets the fill loop take the exact mean of any clamped square window in
/// constant time instead of rescanning the window per pixel. Sums are exact
/// integers, so the result is identical to a naive window scan.
pub(crate) struct IntegralImage {
    width: u32,
    height: u32,
    /// One plane per channel, `(width + 1) * (height + 1)` entries with a
    /// zero border row and column, row stride `width + 1`.
    planes: [Vec<u64>; 3],
}

impl IntegralImage {
    pub(crate) fn new(rgba: &[u8], width: u32, height: u32) -> Self {
        let w = width as usize;
        let h = height as usize;
        let stride = w + 1;
        let mut planes = [
            vec![0u64; stride * (h + 1)],
            vec![0u64; stride * (h + 1)],
            vec![0u64; stride * (h + 1)],
        ];

        for y in 0..h {
            let mut row_sums = [0u64; 3];
            for x in 0..w {
                let px = (y * w + x) * 4;
                let out = (y + 1) * stride + x + 1;
                for c in 0..3 {
                    row_sums[c] += rgba[px + c] as u64;
                    planes[c][out] = planes[c][out - stride] + row_sums[c];
                }
            }
        }

        Self {
            width,
            height,
            planes,
        }
    }

    /// Mean RGB over the square window of `radius` around `(x, y)`,
    /// intersected with the buffer bounds, rounded to the nearest integer.
    pub(crate) fn window_mean(&self, x: u32, y: u32, radius: u32) -> [u8; 3] {
        let x0 = x.saturating_sub(radius) as usize;
        let y0 = y.saturating_sub(radius) as usize;
        let x1 = x.saturating_add(radius).min(self.width - 1) as usize;
        let y1 = y.saturating_add(radius).min(self.height - 1) as usize;

        let stride = self.width as usize + 1;
        let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;

        let mut mean = [0u8; 3];
        for c in 0..3 {
            let plane = &self.planes[c];
            let sum = plane[(y1 + 1) * stride + x1 + 1] + plane[y0 * stride + x0]
                - plane[y0 * stride + x1 + 1]
                - plane[(y1 + 1) * stride + x0];
            mean[c] = (sum as f64 / count).round() as u8;
        }
        mean
    }
}

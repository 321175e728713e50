use crate::error::BaldifyError;

/// Binary person mask aligned 1:1 with an RGBA pixel buffer.
///
/// Stored row-major, one byte per pixel. A non-zero value marks a
/// person pixel, zero marks background.
#[derive(Debug, Clone)]
pub struct PersonMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PersonMask {
    /// Create a mask from a row-major buffer of `width * height` values.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BaldifyError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(BaldifyError::MaskLengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> bool,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(u8::from(f(x, y)));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at `(x, y)` belongs to the person.
    pub fn is_person(&self, x: u32, y: u32) -> bool {
        self.data[y as usize * self.width as usize + x as usize] != 0
    }

    /// The raw row-major mask buffer.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }
}

/// Pluggable person-segmentation backend.
///
/// The segmentation model is externally owned; this crate only depends on
/// the mask contract (non-zero = person pixel, zero = background). Implement
/// this trait to plug in any model and pass it to
/// [`crate::Baldifier::segmenter`].
pub trait PersonSegmenter: Send + Sync {
    /// Segment a row-major RGBA buffer of `width` × `height` pixels into a
    /// person mask of the same dimensions.
    fn segment(&self, rgba: &[u8], width: u32, height: u32) -> PersonMask;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_matching_length() {
        let mask = PersonMask::new(4, 3, vec![0; 12]).unwrap();
        assert_eq!(mask.width(), 4);
        assert_eq!(mask.height(), 3);
    }

    #[test]
    fn new_rejects_wrong_length() {
        let err = PersonMask::new(4, 3, vec![0; 11]).unwrap_err();
        match err {
            BaldifyError::MaskLengthMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 11);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn is_person_reads_row_major() {
        let mut data = vec![0u8; 6];
        data[1 * 3 + 2] = 1; // (x=2, y=1) in a 3x2 mask
        let mask = PersonMask::new(3, 2, data).unwrap();
        assert!(mask.is_person(2, 1));
        assert!(!mask.is_person(2, 0));
        assert!(!mask.is_person(0, 1));
    }

    #[test]
    fn from_fn_matches_predicate() {
        let mask = PersonMask::from_fn(5, 5, |x, y| x == y);
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(mask.is_person(x, y), x == y);
            }
        }
    }
}

use crate::error::{RejigError, RjResult};

/// Decoded raster image: tightly packed RGB samples, row-major.
///
/// The solver core works on this buffer only; codecs and file handling
/// live in the CLI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<[u8; 3]>,
}

impl Raster {
    pub fn from_rgb(width: usize, height: usize, bytes: &[u8]) -> RjResult<Self> {
        if width == 0 || height == 0 {
            return Err(RejigError::InvalidImageDimensions(format!(
                "{}x{} image is empty",
                width, height
            )));
        }
        if bytes.len() != width * height * 3 {
            return Err(RejigError::InvalidImageDimensions(format!(
                "expected {} bytes for {}x{} RGB, got {}",
                width * height * 3,
                width,
                height,
                bytes.len()
            )));
        }
        let data = bytes
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Assembles a raster from pre-built pixel rows. Callers guarantee
    /// `data.len() == width * height`.
    pub(crate) fn from_pixels(width: usize, height: usize, data: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.data[y * self.width + x]
    }

    /// Flattens back to tightly packed RGB bytes for encoding.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 3);
        for px in &self.data {
            bytes.extend_from_slice(px);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb_roundtrip() {
        let bytes: Vec<u8> = (0..2 * 3 * 3).map(|i| i as u8).collect();
        let raster = Raster::from_rgb(2, 3, &bytes).expect("valid buffer rejected");
        assert_eq!(raster.width(), 2);
        assert_eq!(raster.height(), 3);
        assert_eq!(raster.pixel(0, 0), [0, 1, 2]);
        assert_eq!(raster.pixel(1, 2), [15, 16, 17]);
        assert_eq!(raster.to_rgb_bytes(), bytes);
    }

    #[test]
    fn test_from_rgb_rejects_bad_length() {
        let err = Raster::from_rgb(4, 4, &[0u8; 10]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::RejigError::InvalidImageDimensions(_)
        ));
    }

    #[test]
    fn test_from_rgb_rejects_empty() {
        let err = Raster::from_rgb(0, 8, &[]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::RejigError::InvalidImageDimensions(_)
        ));
    }
}

//! In-memory image arrays
//!
//! Images are row-major `ndarray` arrays indexed `[row, col]` or
//! `[row, col, channel]`, i.e. (height, width) and (height, width, channels).

use ndarray::{Array2, Array3, Axis};

use crate::error::{Result, WorkshopError};

/// Numeric type of the samples held by an [`ImageArray`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    /// 8-bit unsigned samples in [0, 255]
    U8,
    /// Floating-point samples, normally in [0, 1]
    F32,
}

/// A decoded image, either single-channel or multi-channel
#[derive(Debug, Clone, PartialEq)]
pub enum ImageArray {
    /// Single-channel 8-bit image, shape (height, width)
    Gray(Array2<u8>),
    /// Multi-channel 8-bit image, shape (height, width, channels)
    Color(Array3<u8>),
    /// Multi-channel floating-point image, shape (height, width, channels)
    Float(Array3<f32>),
}

impl ImageArray {
    pub fn shape(&self) -> &[usize] {
        match self {
            ImageArray::Gray(a) => a.shape(),
            ImageArray::Color(a) => a.shape(),
            ImageArray::Float(a) => a.shape(),
        }
    }

    pub fn height(&self) -> usize {
        self.shape()[0]
    }

    pub fn width(&self) -> usize {
        self.shape()[1]
    }

    /// Number of channels; 1 for grayscale
    pub fn channels(&self) -> usize {
        self.shape().get(2).copied().unwrap_or(1)
    }

    pub fn sample_type(&self) -> SampleType {
        match self {
            ImageArray::Gray(_) | ImageArray::Color(_) => SampleType::U8,
            ImageArray::Float(_) => SampleType::F32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shape().iter().any(|&d| d == 0)
    }

    /// Promote a three-channel image to f32 samples, keeping the value range
    ///
    /// # Errors
    ///
    /// Returns `InvalidShape` for grayscale images and for any channel
    /// count other than three.
    pub fn color_planes(&self) -> Result<Array3<f32>> {
        match self {
            ImageArray::Color(a) if a.len_of(Axis(2)) == 3 => Ok(a.mapv(f32::from)),
            ImageArray::Float(a) if a.len_of(Axis(2)) == 3 => Ok(a.clone()),
            other => Err(WorkshopError::shape(
                "(height, width, 3)",
                other.shape(),
            )),
        }
    }
}

impl From<Array2<u8>> for ImageArray {
    fn from(array: Array2<u8>) -> Self {
        ImageArray::Gray(array)
    }
}

impl From<Array3<u8>> for ImageArray {
    fn from(array: Array3<u8>) -> Self {
        ImageArray::Color(array)
    }
}

impl From<Array3<f32>> for ImageArray {
    fn from(array: Array3<f32>) -> Self {
        ImageArray::Float(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let gray = ImageArray::from(Array2::<u8>::zeros((4, 6)));
        assert_eq!(gray.height(), 4);
        assert_eq!(gray.width(), 6);
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.sample_type(), SampleType::U8);

        let color = ImageArray::from(Array3::<f32>::zeros((2, 3, 3)));
        assert_eq!(color.shape(), &[2, 3, 3]);
        assert_eq!(color.channels(), 3);
        assert_eq!(color.sample_type(), SampleType::F32);
    }

    #[test]
    fn test_color_planes_promotes_u8() {
        let mut array = Array3::<u8>::zeros((1, 1, 3));
        array[[0, 0, 0]] = 200;
        array[[0, 0, 2]] = 7;

        let planes = ImageArray::Color(array).color_planes().unwrap();
        assert_eq!(planes[[0, 0, 0]], 200.0);
        assert_eq!(planes[[0, 0, 1]], 0.0);
        assert_eq!(planes[[0, 0, 2]], 7.0);
    }

    #[test]
    fn test_color_planes_rejects_other_layouts() {
        let gray = ImageArray::Gray(Array2::zeros((2, 2)));
        assert!(matches!(
            gray.color_planes(),
            Err(WorkshopError::InvalidShape { .. })
        ));

        let rgba = ImageArray::Color(Array3::zeros((2, 2, 4)));
        assert!(rgba.color_planes().is_err());
    }

    #[test]
    fn test_is_empty() {
        assert!(ImageArray::Color(Array3::zeros((0, 5, 3))).is_empty());
        assert!(!ImageArray::Color(Array3::zeros((1, 5, 3))).is_empty());
    }
}

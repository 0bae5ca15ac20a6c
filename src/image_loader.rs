//! Image loading in a requested color representation
//!
//! Files are decoded with the `image` crate (format guessed from the file
//! contents), reduced to 8-bit RGB, and then converted into the layout
//! selected by [`LoadMode`].
//!
//! ## Modes
//!
//! | mode | output |
//! |---|---|
//! | `color` | (h, w, 3) u8, R G B |
//! | `standard-color` | (h, w, 3) f32 in [0, 1] |
//! | `grayscale` (`greyscale`, `gray`, `grey`, `gris`) | (h, w) u8 luma |
//! | `yuv` | (h, w, 3) u8, Y U V |
//! | `hsv` | (h, w, 3) u8, H S V |
//! | `hls` | (h, w, 3) u8, H L S |
//! | `lab` | (h, w, 3) u8, L a b |

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::{DynamicImage, ImageReader, RgbImage};
use log::debug;
use ndarray::{Array2, Array3};

use crate::array::ImageArray;
use crate::color::conversion::map_rgb_pixels;
use crate::color::ColorConverter;
use crate::constants::MAX_SAMPLE;
use crate::error::{Result, WorkshopError};

/// Target representation for [`image_read`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadMode {
    /// 8-bit R, G, B
    Color,
    /// R, G, B scaled to [0, 1]
    StandardColor,
    /// Single-channel 8-bit luminance
    Grayscale,
    Yuv,
    Hsv,
    /// Hue, lightness, saturation in that order
    Hls,
    Lab,
}

/// Quote and join mode names as `"a", "b" or "c"`
pub(crate) fn describe_choices(names: &[&str]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("\"{}\"", n)).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}

impl LoadMode {
    pub const ALL: [LoadMode; 7] = [
        LoadMode::Color,
        LoadMode::StandardColor,
        LoadMode::Grayscale,
        LoadMode::Yuv,
        LoadMode::Hsv,
        LoadMode::Hls,
        LoadMode::Lab,
    ];

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadMode::Color => "color",
            LoadMode::StandardColor => "standard-color",
            LoadMode::Grayscale => "grayscale",
            LoadMode::Yuv => "yuv",
            LoadMode::Hsv => "hsv",
            LoadMode::Hls => "hls",
            LoadMode::Lab => "lab",
        }
    }

    /// Every string that parses to this mode, canonical name first
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            LoadMode::Color => &["color"],
            LoadMode::StandardColor => &["standard-color"],
            LoadMode::Grayscale => &["grayscale", "greyscale", "gray", "grey", "gris"],
            LoadMode::Yuv => &["yuv"],
            LoadMode::Hsv => &["hsv"],
            LoadMode::Hls => &["hls"],
            LoadMode::Lab => &["lab"],
        }
    }

    /// Every string accepted by `LoadMode::from_str`, in declaration order
    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().flat_map(|mode| mode.names().iter().copied()).collect()
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadMode {
    type Err = WorkshopError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.names().contains(&s))
            .ok_or_else(|| WorkshopError::InvalidMode {
                kind: "load",
                value: s.to_string(),
                expected: describe_choices(&Self::all_names()),
            })
    }
}

/// Load an image from disk in the requested representation
///
/// # Arguments
///
/// * `path` - Path to the image file; the format is detected from its contents
/// * `mode` - Target representation
///
/// # Errors
///
/// Returns `WorkshopError::ImageLoadError` if the file cannot be opened or
/// decoded.
///
/// # Example
///
/// ```rust,no_run
/// use colorspace_workshop::{image_read, LoadMode};
///
/// let image = image_read("parrot.jpg", LoadMode::Hsv)?;
/// println!("Loaded {:?}", image.shape());
/// # Ok::<(), colorspace_workshop::WorkshopError>(())
/// ```
pub fn image_read(path: impl AsRef<Path>, mode: LoadMode) -> Result<ImageArray> {
    let path = path.as_ref();
    let decoded = decode(path)?;
    let rgb = decoded.to_rgb8();
    debug!(
        "decoded {} ({}x{}) as {}",
        path.display(),
        rgb.width(),
        rgb.height(),
        mode
    );
    Ok(convert_rgb(&rgb, mode))
}

/// Convert an already decoded 8-bit RGB image into `mode`
pub fn convert_rgb(rgb: &RgbImage, mode: LoadMode) -> ImageArray {
    let converter = ColorConverter::new();

    match mode {
        LoadMode::Grayscale => ImageArray::Gray(luma_array(rgb, &converter)),
        LoadMode::Color => ImageArray::Color(rgb_array(rgb)),
        LoadMode::StandardColor => {
            ImageArray::Float(rgb_array(rgb).mapv(|v| f32::from(v) / MAX_SAMPLE))
        }
        LoadMode::Yuv => {
            ImageArray::Color(map_rgb_pixels(&rgb_array(rgb), |r, g, b| {
                converter.rgb_to_yuv(r, g, b)
            }))
        }
        LoadMode::Hsv => {
            ImageArray::Color(map_rgb_pixels(&rgb_array(rgb), |r, g, b| {
                converter.rgb_to_hsv(r, g, b)
            }))
        }
        LoadMode::Hls => {
            ImageArray::Color(map_rgb_pixels(&rgb_array(rgb), |r, g, b| {
                converter.rgb_to_hls(r, g, b)
            }))
        }
        LoadMode::Lab => {
            ImageArray::Color(map_rgb_pixels(&rgb_array(rgb), |r, g, b| {
                converter.rgb_to_lab(r, g, b)
            }))
        }
    }
}

fn decode(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path).map_err(|e| {
        WorkshopError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let reader = reader.with_guessed_format().map_err(|e| {
        WorkshopError::image_load(format!("Failed to read image file: {}", path.display()), e)
    })?;

    reader.decode().map_err(|e| {
        WorkshopError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })
}

/// Copy an `RgbImage` into a (height, width, 3) array
fn rgb_array(rgb: &RgbImage) -> Array3<u8> {
    let (width, height) = rgb.dimensions();
    Array3::from_shape_fn((height as usize, width as usize, 3), |(y, x, c)| {
        rgb.get_pixel(x as u32, y as u32)[c]
    })
}

fn luma_array(rgb: &RgbImage, converter: &ColorConverter) -> Array2<u8> {
    let (width, height) = rgb.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        let px = rgb.get_pixel(x as u32, y as u32);
        converter.rgb_to_luma(px[0], px[1], px[2])
    })
}

/// File extensions `image_read` can decode, lowercase
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "pbm", "pgm",
        "ppm", "pnm", "qoi",
    ]
}

/// Check if `path` has a decodable image extension, ignoring case
pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| supported_extensions().contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

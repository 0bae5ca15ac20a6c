//! Color space conversion utilities
//!
//! Per-pixel transforms used by the loader and the channel plotter:
//! - RGB to 8-bit YUV, HSV, HLS and CIE Lab encodings
//! - RGB to YIQ
//! - The workshop HSL transform (chroma as saturation, see [`ColorConverter::rgb_to_hsl`])

use ndarray::{Array3, Axis, Zip};
use palette::{FromColor, Hsl, Hsv, Lab, Srgb};

use crate::constants::{encoding, luma, yiq, yuv, MAX_SAMPLE};

/// Stateless converter between RGB samples and other color spaces
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

/// Round and saturate to the 8-bit range
fn saturate_u8(value: f32) -> u8 {
    value.round().clamp(0.0, MAX_SAMPLE) as u8
}

/// Halve hue degrees into [0, 180)
fn encode_hue(degrees: f32) -> u8 {
    let hue = (degrees / encoding::HUE_DIVISOR).round() as u32;
    (hue % u32::from(encoding::HUE_RANGE)) as u8
}

fn to_srgb(r: u8, g: u8, b: u8) -> Srgb {
    Srgb::new(
        r as f32 / MAX_SAMPLE,
        g as f32 / MAX_SAMPLE,
        b as f32 / MAX_SAMPLE,
    )
}

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Weighted luminance of an 8-bit RGB pixel
    pub fn rgb_to_luma(&self, r: u8, g: u8, b: u8) -> u8 {
        saturate_u8(luma::RED * r as f32 + luma::GREEN * g as f32 + luma::BLUE * b as f32)
    }

    /// Convert RGB (0-255) to 8-bit Y, U, V with chroma centred on 128
    pub fn rgb_to_yuv(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        let (rf, gf, bf) = (r as f32, g as f32, b as f32);
        let y = luma::RED * rf + luma::GREEN * gf + luma::BLUE * bf;
        let u = (bf - y) * yuv::U_SCALE + yuv::CHROMA_OFFSET;
        let v = (rf - y) * yuv::V_SCALE + yuv::CHROMA_OFFSET;
        [saturate_u8(y), saturate_u8(u), saturate_u8(v)]
    }

    /// Convert RGB (0-255) to 8-bit H, S, V
    ///
    /// Hue is stored as degrees / 2 so it spans 0..180; saturation and value
    /// are scaled to 0..255.
    pub fn rgb_to_hsv(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        let hsv: Hsv = Hsv::from_color(to_srgb(r, g, b));
        [
            encode_hue(hsv.hue.into_positive_degrees()),
            saturate_u8(hsv.saturation * MAX_SAMPLE),
            saturate_u8(hsv.value * MAX_SAMPLE),
        ]
    }

    /// Convert RGB (0-255) to 8-bit H, L, S (note the L-before-S order)
    pub fn rgb_to_hls(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        let hsl: Hsl = Hsl::from_color(to_srgb(r, g, b));
        [
            encode_hue(hsl.hue.into_positive_degrees()),
            saturate_u8(hsl.lightness * MAX_SAMPLE),
            saturate_u8(hsl.saturation * MAX_SAMPLE),
        ]
    }

    /// Convert RGB (0-255) to 8-bit L, a, b
    ///
    /// L* is stretched from [0, 100] to [0, 255]; a* and b* are offset by 128.
    pub fn rgb_to_lab(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        let lab: Lab = Lab::from_color(to_srgb(r, g, b));
        [
            saturate_u8(lab.l * encoding::LAB_L_SCALE),
            saturate_u8(lab.a + encoding::LAB_AB_OFFSET),
            saturate_u8(lab.b + encoding::LAB_AB_OFFSET),
        ]
    }

    /// Convert RGB samples to Y, I, Q using the fixed NTSC matrix
    pub fn rgb_to_yiq(&self, r: f32, g: f32, b: f32) -> [f32; 3] {
        let row = |m: [f32; 3]| m[0] * r + m[1] * g + m[2] * b;
        [row(yiq::Y), row(yiq::I), row(yiq::Q)]
    }

    /// Workshop HSL transform of one pixel
    ///
    /// S is the chroma (max - min) and L is S / 2. A negative hue is mapped
    /// to `360 - H`, not wrapped; both formulas are kept as the workshop
    /// material defines them.
    pub fn rgb_to_hsl(&self, red: f32, green: f32, blue: f32) -> [f32; 3] {
        let max_value = red.max(green).max(blue);
        let min_value = red.min(green).min(blue);

        let s = max_value - min_value;
        let l = s / 2.0;

        if max_value == min_value {
            return [0.0, s, l];
        }

        let delta = max_value - min_value;
        let h = if max_value == red {
            (green - blue) * 60.0 / delta
        } else if max_value == green {
            (blue - red) * 60.0 / delta + 120.0
        } else {
            (red - green) * 60.0 / delta + 240.0
        };

        let h = if h >= 0.0 { h } else { 360.0 - h };
        [h, s, l]
    }
}

/// Apply the workshop HSL transform to every pixel of an (h, w, 3) array
///
/// Pixels are independent, so the output is identical to a row-by-row walk.
pub fn rgb_to_hsl_image(rgb: &Array3<f32>) -> Array3<f32> {
    let converter = ColorConverter::new();
    let mut out = Array3::<f32>::zeros(rgb.raw_dim());

    Zip::from(out.lanes_mut(Axis(2)))
        .and(rgb.lanes(Axis(2)))
        .for_each(|mut dst, src| {
            let hsl = converter.rgb_to_hsl(src[0], src[1], src[2]);
            dst[0] = hsl[0];
            dst[1] = hsl[1];
            dst[2] = hsl[2];
        });

    out
}

/// Map every RGB pixel of an 8-bit (h, w, 3) array through `convert`
pub fn map_rgb_pixels<F>(rgb: &Array3<u8>, convert: F) -> Array3<u8>
where
    F: Fn(u8, u8, u8) -> [u8; 3],
{
    let mut out = Array3::<u8>::zeros(rgb.raw_dim());

    Zip::from(out.lanes_mut(Axis(2)))
        .and(rgb.lanes(Axis(2)))
        .for_each(|mut dst, src| {
            let px = convert(src[0], src[1], src[2]);
            dst[0] = px[0];
            dst[1] = px[1];
            dst[2] = px[2];
        });

    out
}

//! Conversion coefficients and rendering defaults
//!
//! Compile-time constants shared by the loader, the channel plotter and the
//! figure rasterizer.

/// Luma weights used for grayscale decoding, YUV and YIQ
pub mod luma {
    pub const RED: f32 = 0.299;
    pub const GREEN: f32 = 0.587;
    pub const BLUE: f32 = 0.114;
}

/// 8-bit YUV chroma encoding (offset chroma around 128)
pub mod yuv {
    /// U = (B - Y) * U_SCALE + CHROMA_OFFSET
    pub const U_SCALE: f32 = 0.492;
    /// V = (R - Y) * V_SCALE + CHROMA_OFFSET
    pub const V_SCALE: f32 = 0.877;
    pub const CHROMA_OFFSET: f32 = 128.0;
}

/// YIQ analog television transform rows, applied to R, G, B
pub mod yiq {
    pub const Y: [f32; 3] = [0.299, 0.587, 0.114];
    pub const I: [f32; 3] = [0.596, -0.274, -0.322];
    pub const Q: [f32; 3] = [0.211, -0.523, 0.312];
}

/// 8-bit encodings for hue-based and CIE Lab outputs
pub mod encoding {
    /// Hue degrees are halved so a full turn fits in a byte
    pub const HUE_DIVISOR: f32 = 2.0;
    /// Number of distinct 8-bit hue values
    pub const HUE_RANGE: u8 = 180;
    /// L* in [0, 100] is stretched to [0, 255]
    pub const LAB_L_SCALE: f32 = 255.0 / 100.0;
    pub const LAB_AB_OFFSET: f32 = 128.0;
}

/// Largest 8-bit sample, used for complements and normalization
pub const MAX_SAMPLE: f32 = 255.0;

/// Figure layout, expressed as fractions of the figure extent
pub mod layout {
    /// Dots per inch when no configuration overrides it
    pub const DEFAULT_DPI: f32 = 100.0;

    /// Viewer figure size in inches when the caller gives none
    pub const DEFAULT_FIGURE_SIZE: (f32, f32) = (6.4, 4.8);

    /// Channel plot figure size in inches
    pub const CHANNEL_FIGURE_SIZE: (f32, f32) = (30.0, 7.0);

    pub const LEFT: f32 = 0.125;
    pub const RIGHT: f32 = 0.9;
    pub const BOTTOM: f32 = 0.11;
    pub const TOP: f32 = 0.88;

    /// Horizontal gap between panels as a fraction of one panel width
    pub const WSPACE: f32 = 0.2;

    /// Largest canvas side in pixels
    pub const MAX_PIXELS_PER_SIDE: u32 = 1 << 16;

    /// Largest canvas area in pixels
    pub const MAX_CANVAS_AREA: usize = 1 << 28;

    pub const BACKGROUND: [u8; 3] = [255, 255, 255];
    pub const FRAME: [u8; 3] = [0, 0, 0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_weights_sum_to_one() {
        assert!((luma::RED + luma::GREEN + luma::BLUE - 1.0).abs() < 1e-6);
        assert!((yiq::Y.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_chroma_rows_cancel_for_gray() {
        // I and Q carry no signal for neutral pixels
        assert!(yiq::I.iter().sum::<f32>().abs() < 1e-6);
        assert!(yiq::Q.iter().sum::<f32>().abs() < 1e-6);
    }

    #[test]
    fn test_layout_fractions() {
        assert!(layout::LEFT < layout::RIGHT);
        assert!(layout::BOTTOM < layout::TOP);
        assert!(layout::DEFAULT_DPI > 0.0);
    }
}

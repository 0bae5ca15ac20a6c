//! Color conversion and colormap module
//!
//! This module handles the per-pixel color space transforms used by the
//! loader and the channel plotter, and the colormaps used to display single
//! channels.

pub mod colormap;
pub mod conversion;

pub use colormap::{Colormap, ColormapKind};
pub use conversion::{rgb_to_hsl_image, ColorConverter};

//! # Colorspace Workshop
//!
//! Helpers for a color-space workshop: load an image in a chosen color
//! representation, show it, and plot its three channels side by side.
//!
//! - [`image_read`] decodes a file as RGB, float RGB, grayscale, YUV, HSV, HLS or Lab
//! - [`image_show`] renders an image with a title, never failing
//! - [`plot_channels`] splits an image by [`PlotMode`] (RGB, BGR, CMY, YIQ,
//!   YUV, HSL, HSV, Lab or custom) and renders the three channels
//!
//! Figures are handed to a [`FigureSink`]; [`PngSink`] writes them to disk.
//!
//! ## Example
//!
//! ```rust,no_run
//! use colorspace_workshop::{image_read, image_show, plot_channels};
//! use colorspace_workshop::{ChannelPlotOptions, LoadMode, PlotMode, PngSink};
//!
//! let mut sink = PngSink::new("figures");
//!
//! let rgb = image_read("parrot.jpg", LoadMode::Color)?;
//! image_show(&mut sink, &rgb, Some("Parrot"), None);
//! let options = ChannelPlotOptions::default().with_title("HSL");
//! plot_channels(&mut sink, &rgb, PlotMode::Hsl, &options)?;
//!
//! let hsv = image_read("parrot.jpg", "hsv".parse()?)?;
//! let options = ChannelPlotOptions::default().with_title("HSV");
//! plot_channels(&mut sink, &hsv, PlotMode::Hsv, &options)?;
//! # Ok::<(), colorspace_workshop::WorkshopError>(())
//! ```

pub mod array;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod plot;

pub use array::{ImageArray, SampleType};
pub use color::{ColorConverter, Colormap, ColormapKind};
pub use config::RenderConfig;
pub use error::{Result, WorkshopError};
pub use image_loader::{image_read, LoadMode};
pub use plot::{
    derive_channels, image_show, plot_channels, ChannelPlotOptions, ChannelSet, Figure,
    FigureSink, FigureSize, MemorySink, PlotMode, PngSink,
};

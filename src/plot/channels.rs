//! Channel decomposition plots
//!
//! Splits a three-channel image into three named scalar planes according to a
//! [`PlotMode`] and shows them side by side, each with its own colormap.
//!
//! | mode | planes | names / colormaps |
//! |---|---|---|
//! | `rgb` | 0, 1, 2 | from options |
//! | `bgr` | 2, 1, 0 | options, reversed |
//! | `cmy` | 255 - (0, 1, 2) | fixed, GnBu / RdPu / YlOrBr |
//! | `yiq` | fixed linear combinations | fixed, gray |
//! | `yuv`, `hsv`, `lab` | 0, 1, 2 (already converted by the loader) | fixed, gray |
//! | `hsl` | workshop HSL transform of RGB input | fixed, gray |
//! | `custom` | 0, 1, 2 | from options, verbatim |

use std::fmt;
use std::str::FromStr;

use log::debug;
use ndarray::{s, Array2, Array3, Axis, Zip};

use super::{Aspect, Figure, FigureSink, FigureSize, Panel, PanelRaster};
use crate::array::ImageArray;
use crate::color::{rgb_to_hsl_image, ColorConverter, Colormap};
use crate::constants::{layout, MAX_SAMPLE};
use crate::error::{Result, WorkshopError};
use crate::image_loader::{describe_choices, LoadMode};

/// How an image is split into channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotMode {
    Rgb,
    Bgr,
    Cmy,
    Yiq,
    Yuv,
    Hsl,
    Hsv,
    Lab,
    /// Channels as stored, with caller names and colormaps
    Custom,
}

impl PlotMode {
    pub const ALL: [PlotMode; 9] = [
        PlotMode::Rgb,
        PlotMode::Bgr,
        PlotMode::Cmy,
        PlotMode::Yiq,
        PlotMode::Yuv,
        PlotMode::Hsl,
        PlotMode::Hsv,
        PlotMode::Lab,
        PlotMode::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlotMode::Rgb => "rgb",
            PlotMode::Bgr => "bgr",
            PlotMode::Cmy => "cmy",
            PlotMode::Yiq => "yiq",
            PlotMode::Yuv => "yuv",
            PlotMode::Hsl => "hsl",
            PlotMode::Hsv => "hsv",
            PlotMode::Lab => "lab",
            PlotMode::Custom => "custom",
        }
    }

    /// Loader mode producing the input this plot mode expects
    pub fn input_mode(&self) -> LoadMode {
        match self {
            PlotMode::Yuv => LoadMode::Yuv,
            PlotMode::Hsv => LoadMode::Hsv,
            PlotMode::Lab => LoadMode::Lab,
            _ => LoadMode::Color,
        }
    }

    /// Fixed names and colormaps, for modes that ignore the caller's
    fn fixed_labels(&self) -> Option<([&'static str; 3], [Colormap; 3])> {
        let gray = [Colormap::GRAY; 3];
        match self {
            PlotMode::Rgb | PlotMode::Bgr | PlotMode::Custom => None,
            PlotMode::Cmy => Some((
                ["Channel C", "Channel M", "Channel Y"],
                [Colormap::GNBU, Colormap::RDPU, Colormap::YLORBR],
            )),
            PlotMode::Yiq => Some((["Channel Y", "Channel I", "Channel Q"], gray)),
            PlotMode::Yuv => Some((["Channel Y", "Channel U", "Channel V"], gray)),
            PlotMode::Hsl => Some((["Channel H", "Channel S", "Channel L"], gray)),
            PlotMode::Hsv => Some((["Channel H", "Channel S", "Channel V"], gray)),
            PlotMode::Lab => Some((["Channel L", "Channel A", "Channel B"], gray)),
        }
    }
}

impl fmt::Display for PlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlotMode {
    type Err = WorkshopError;

    fn from_str(s: &str) -> Result<Self> {
        PlotMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = PlotMode::ALL.iter().map(|m| m.as_str()).collect();
                WorkshopError::InvalidMode {
                    kind: "plot",
                    value: s.to_string(),
                    expected: describe_choices(&names),
                }
            })
    }
}

/// Per-call presentation settings for [`plot_channels`]
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPlotOptions {
    pub title: String,
    pub channel_names: [String; 3],
    pub cmaps: [Colormap; 3],
    pub figsize: FigureSize,
}

impl Default for ChannelPlotOptions {
    fn default() -> Self {
        let (w, h) = layout::CHANNEL_FIGURE_SIZE;
        Self {
            title: "RGB channels".to_string(),
            channel_names: [
                "Channel R".to_string(),
                "Channel G".to_string(),
                "Channel B".to_string(),
            ],
            cmaps: [Colormap::REDS, Colormap::GREENS, Colormap::BLUES],
            figsize: FigureSize::new(w, h),
        }
    }
}

impl ChannelPlotOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_channel_names(mut self, names: [&str; 3]) -> Self {
        self.channel_names = names.map(str::to_string);
        self
    }

    pub fn with_cmaps(mut self, cmaps: [Colormap; 3]) -> Self {
        self.cmaps = cmaps;
        self
    }

    pub fn with_figsize(mut self, figsize: impl Into<FigureSize>) -> Self {
        self.figsize = figsize.into();
        self
    }
}

/// Three derived planes with their display names and colormaps
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSet {
    pub planes: [Array2<f32>; 3],
    pub names: [String; 3],
    pub cmaps: [Colormap; 3],
}

fn plane(rgb: &Array3<f32>, channel: usize) -> Array2<f32> {
    rgb.index_axis(Axis(2), channel).to_owned()
}

fn planes_in_order(rgb: &Array3<f32>, order: [usize; 3]) -> [Array2<f32>; 3] {
    order.map(|c| plane(rgb, c))
}

fn yiq_planes(rgb: &Array3<f32>) -> [Array2<f32>; 3] {
    let converter = ColorConverter::new();
    let (h, w, _) = rgb.dim();
    let mut out = [
        Array2::<f32>::zeros((h, w)),
        Array2::<f32>::zeros((h, w)),
        Array2::<f32>::zeros((h, w)),
    ];
    let [y_plane, i_plane, q_plane] = &mut out;

    Zip::from(y_plane)
        .and(i_plane)
        .and(q_plane)
        .and(rgb.lanes(Axis(2)))
        .for_each(|y, i, q, px| {
            let [yv, iv, qv] = converter.rgb_to_yiq(px[0], px[1], px[2]);
            *y = yv;
            *i = iv;
            *q = qv;
        });

    out
}

/// Split `image` into the three planes selected by `mode`
///
/// # Errors
///
/// Returns `InvalidShape` unless `image` is (height, width, 3).
pub fn derive_channels(
    image: &ImageArray,
    mode: PlotMode,
    options: &ChannelPlotOptions,
) -> Result<ChannelSet> {
    let rgb = image.color_planes()?;

    let planes = match mode {
        PlotMode::Rgb | PlotMode::Custom | PlotMode::Yuv | PlotMode::Hsv | PlotMode::Lab => {
            planes_in_order(&rgb, [0, 1, 2])
        }
        PlotMode::Bgr => planes_in_order(&rgb, [2, 1, 0]),
        PlotMode::Cmy => planes_in_order(&rgb, [0, 1, 2]).map(|p| p.mapv(|v| MAX_SAMPLE - v)),
        PlotMode::Yiq => yiq_planes(&rgb),
        PlotMode::Hsl => {
            let hsl = rgb_to_hsl_image(&rgb);
            [
                hsl.slice(s![.., .., 0]).to_owned(),
                hsl.slice(s![.., .., 1]).to_owned(),
                hsl.slice(s![.., .., 2]).to_owned(),
            ]
        }
    };

    let (names, cmaps) = match (mode, mode.fixed_labels()) {
        (_, Some((names, cmaps))) => (names.map(str::to_string), cmaps),
        (PlotMode::Bgr, None) => {
            let [a, b, c] = options.channel_names.clone();
            let [x, y, z] = options.cmaps;
            ([c, b, a], [z, y, x])
        }
        (_, None) => (options.channel_names.clone(), options.cmaps),
    };

    debug!(
        "derived {} channels {:?} from {:?} image",
        mode,
        names,
        image.shape()
    );

    Ok(ChannelSet {
        planes,
        names,
        cmaps,
    })
}

/// Build the three-panel figure for a channel set
pub fn channel_figure(channels: ChannelSet, title: &str, figsize: FigureSize) -> Figure {
    let ChannelSet {
        planes,
        names,
        cmaps,
    } = channels;

    let panels = planes
        .into_iter()
        .zip(names)
        .zip(cmaps)
        .map(|((data, title), cmap)| Panel {
            title,
            aspect: Aspect::Auto,
            raster: PanelRaster::Scalar { data, cmap },
        })
        .collect();

    Figure {
        suptitle: Some(title.to_string()),
        size: figsize,
        panels,
    }
}

/// Decompose `image` by `mode` and present the three channels side by side
///
/// The rendered raster holds only the channel planes. The figure title,
/// channel names and colormap names stay on the [`Figure`] given to the
/// sink; [`PngSink`](super::PngSink) records them in its JSON sidecar.
///
/// # Errors
///
/// Propagates shape errors from [`derive_channels`] and any failure of the
/// sink.
///
/// # Example
///
/// ```rust,no_run
/// use colorspace_workshop::{image_read, plot_channels};
/// use colorspace_workshop::{ChannelPlotOptions, LoadMode, PlotMode, PngSink};
///
/// let mut sink = PngSink::new("figures");
/// let image = image_read("parrot.jpg", LoadMode::Color)?;
/// let options = ChannelPlotOptions::default().with_title("CMY channels");
/// plot_channels(&mut sink, &image, PlotMode::Cmy, &options)?;
/// # Ok::<(), colorspace_workshop::WorkshopError>(())
/// ```
pub fn plot_channels(
    sink: &mut dyn FigureSink,
    image: &ImageArray,
    mode: PlotMode,
    options: &ChannelPlotOptions,
) -> Result<()> {
    let channels = derive_channels(image, mode, options)?;
    let figure = channel_figure(channels, &options.title, options.figsize);
    sink.present(&figure)
}

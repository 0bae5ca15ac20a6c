//! Figure model and rasterization
//!
//! A [`Figure`] is a row of [`Panel`]s with titles, laid out with fixed
//! subplot margins and rendered to an `RgbImage`. Presentation is delegated
//! to a [`FigureSink`].

pub mod channels;
pub mod sink;
pub mod viewer;

use image::{Rgb, RgbImage};
use ndarray::{Array2, Array3, Axis};
use serde::Serialize;

use crate::array::ImageArray;
use crate::color::Colormap;
use crate::constants::{layout, MAX_SAMPLE};
use crate::error::{Result, WorkshopError};

pub use channels::{derive_channels, plot_channels, ChannelPlotOptions, ChannelSet, PlotMode};
pub use sink::{FigureSink, MemorySink, PngSink, RenderedFigure};
pub use viewer::image_show;

/// Figure extent in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FigureSize {
    pub width: f32,
    pub height: f32,
}

impl FigureSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions at `dpi`
    pub fn pixels(&self, dpi: f32) -> (u32, u32) {
        let w = (self.width * dpi).round().max(0.0) as u32;
        let h = (self.height * dpi).round().max(0.0) as u32;
        (w, h)
    }

    /// Pixel dimensions at `dpi`, rejecting canvases that are empty or too
    /// large to allocate
    ///
    /// # Errors
    ///
    /// Returns `RenderError` when either side is not finite, rounds to zero,
    /// exceeds [`layout::MAX_PIXELS_PER_SIDE`], or the area exceeds
    /// [`layout::MAX_CANVAS_AREA`].
    pub fn checked_pixels(&self, dpi: f32) -> Result<(u32, u32)> {
        let (w, h) = ((self.width * dpi).round(), (self.height * dpi).round());
        let limit = layout::MAX_PIXELS_PER_SIDE as f32;
        if !w.is_finite() || !h.is_finite() || w > limit || h > limit {
            return Err(WorkshopError::render(format!(
                "Image size of {}x{} pixels is too large, limit is {} per side",
                w,
                h,
                layout::MAX_PIXELS_PER_SIDE
            )));
        }

        let (width, height) = self.pixels(dpi);
        if width == 0 || height == 0 {
            return Err(WorkshopError::render(format!(
                "figure size {}x{} in at {} dpi has no pixels",
                self.width, self.height, dpi
            )));
        }

        let samples = (width as usize)
            .checked_mul(height as usize)
            .filter(|&area| area <= layout::MAX_CANVAS_AREA)
            .and_then(|area| area.checked_mul(3));
        match samples {
            Some(_) => Ok((width, height)),
            None => Err(WorkshopError::render(format!(
                "Image size of {}x{} pixels is too large",
                width, height
            ))),
        }
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        let (w, h) = layout::DEFAULT_FIGURE_SIZE;
        Self::new(w, h)
    }
}

impl From<(f32, f32)> for FigureSize {
    fn from((width, height): (f32, f32)) -> Self {
        Self::new(width, height)
    }
}

/// How a raster fills its axes box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    /// Keep square pixels, centred in the box
    Equal,
    /// Stretch to fill the box
    Auto,
}

/// Pixel content of a panel
#[derive(Debug, Clone, PartialEq)]
pub enum PanelRaster {
    /// RGB or RGBA samples; u8 taken as-is, f32 clipped to [0, 1]
    Rgb(ImageArray),
    /// Single scalar plane shown through a colormap, normalized to its range
    Scalar { data: Array2<f32>, cmap: Colormap },
}

/// One axes box of a figure
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub aspect: Aspect,
    pub raster: PanelRaster,
}

impl Panel {
    /// Colormap used by the panel, if it shows a scalar plane
    pub fn cmap(&self) -> Option<Colormap> {
        match &self.raster {
            PanelRaster::Scalar { cmap, .. } => Some(*cmap),
            PanelRaster::Rgb(_) => None,
        }
    }
}

/// A titled row of panels
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub suptitle: Option<String>,
    pub size: FigureSize,
    pub panels: Vec<Panel>,
}

/// Axes box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl Figure {
    /// Title used to name output files: the suptitle or the first panel title
    pub fn label(&self) -> &str {
        self.suptitle
            .as_deref()
            .or_else(|| self.panels.first().map(|p| p.title.as_str()))
            .unwrap_or("figure")
    }

    /// Rasterize the figure
    ///
    /// # Errors
    ///
    /// Returns `RenderError` for a figure without panels or whose pixel size
    /// is empty or too large (see [`FigureSize::checked_pixels`]), and
    /// `InvalidShape` for panel rasters that cannot be displayed.
    pub fn render(&self, dpi: f32, draw_frames: bool) -> Result<RgbImage> {
        if self.panels.is_empty() {
            return Err(WorkshopError::render("figure has no panels"));
        }
        let (width, height) = self.size.checked_pixels(dpi)?;

        let mut canvas = RgbImage::from_pixel(width, height, Rgb(layout::BACKGROUND));
        let boxes = axes_boxes(width, height, self.panels.len());

        for (panel, rect) in self.panels.iter().zip(boxes) {
            let pixels = panel_pixels(&panel.raster)?;
            let target = match panel.aspect {
                Aspect::Auto => rect,
                Aspect::Equal => fit_equal(rect, pixels.len_of(Axis(1)), pixels.len_of(Axis(0))),
            };
            blit_nearest(&mut canvas, &pixels, target);
            if draw_frames {
                draw_frame(&mut canvas, target);
            }
        }

        Ok(canvas)
    }
}

/// Lay out `n` equal axes boxes in one row
fn axes_boxes(width: u32, height: u32, n: usize) -> Vec<Rect> {
    let (wf, hf) = (width as f32, height as f32);
    let left = layout::LEFT * wf;
    let right = layout::RIGHT * wf;
    let top = (1.0 - layout::TOP) * hf;
    let bottom = (1.0 - layout::BOTTOM) * hf;

    let n_f = n as f32;
    let cell = (right - left) / (n_f + layout::WSPACE * (n_f - 1.0));
    let step = cell * (1.0 + layout::WSPACE);

    (0..n)
        .map(|i| {
            let x0 = (left + step * i as f32).round();
            let x1 = (left + step * i as f32 + cell).round();
            Rect {
                x: x0 as u32,
                y: top.round() as u32,
                w: (x1 - x0).max(1.0) as u32,
                h: (bottom.round() - top.round()).max(1.0) as u32,
            }
        })
        .collect()
}

/// Largest box with the source aspect ratio that fits in `rect`, centred
fn fit_equal(rect: Rect, src_w: usize, src_h: usize) -> Rect {
    let scale = (rect.w as f32 / src_w as f32).min(rect.h as f32 / src_h as f32);
    let w = ((src_w as f32 * scale).round() as u32).clamp(1, rect.w);
    let h = ((src_h as f32 * scale).round() as u32).clamp(1, rect.h);
    Rect {
        x: rect.x + (rect.w - w) / 2,
        y: rect.y + (rect.h - h) / 2,
        w,
        h,
    }
}

/// Resolve a panel raster to (h, w, 3) display pixels; `None` marks NaN
fn panel_pixels(raster: &PanelRaster) -> Result<Array3<Option<u8>>> {
    let pixels = match raster {
        PanelRaster::Scalar { data, cmap } => {
            if data.is_empty() {
                return Err(WorkshopError::shape("non-empty (height, width)", data.shape()));
            }
            let (lo, hi) = finite_range(data.iter().copied());
            let span = hi - lo;
            let (h, w) = data.dim();
            let mut out = Array3::from_elem((h, w, 3), None);
            for ((y, x), &v) in data.indexed_iter() {
                if v.is_nan() {
                    continue;
                }
                let t = if span > 0.0 { (v - lo) / span } else { 0.0 };
                let rgb = cmap.map(t);
                for c in 0..3 {
                    out[[y, x, c]] = Some(rgb[c]);
                }
            }
            out
        }
        PanelRaster::Rgb(image) => {
            if image.is_empty() {
                return Err(WorkshopError::shape("non-empty image", image.shape()));
            }
            match image {
                ImageArray::Gray(a) => {
                    return panel_pixels(&PanelRaster::Scalar {
                        data: a.mapv(f32::from),
                        cmap: Colormap::VIRIDIS,
                    })
                }
                ImageArray::Color(a) => {
                    check_display_channels(image)?;
                    let (h, w, _) = a.dim();
                    Array3::from_shape_fn((h, w, 3), |(y, x, c)| Some(a[[y, x, c]]))
                }
                ImageArray::Float(a) => {
                    check_display_channels(image)?;
                    let (h, w, _) = a.dim();
                    Array3::from_shape_fn((h, w, 3), |(y, x, c)| {
                        let v = a[[y, x, c]];
                        if v.is_nan() {
                            None
                        } else {
                            Some((v.clamp(0.0, 1.0) * MAX_SAMPLE).round() as u8)
                        }
                    })
                }
            }
        }
    };
    Ok(pixels)
}

fn check_display_channels(image: &ImageArray) -> Result<()> {
    match image.channels() {
        3 | 4 => Ok(()),
        _ => Err(WorkshopError::shape(
            "(height, width), (height, width, 3) or (height, width, 4)",
            image.shape(),
        )),
    }
}

/// Minimum and maximum of the finite values; (0, 0) when there are none
fn finite_range(values: impl Iterator<Item = f32>) -> (f32, f32) {
    let mut range: Option<(f32, f32)> = None;
    for v in values.filter(|v| v.is_finite()) {
        range = Some(match range {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }
    range.unwrap_or((0.0, 0.0))
}

fn blit_nearest(canvas: &mut RgbImage, pixels: &Array3<Option<u8>>, target: Rect) {
    let (src_h, src_w, _) = pixels.dim();
    for dy in 0..target.h {
        let sy = ((dy as usize * src_h) / target.h as usize).min(src_h - 1);
        for dx in 0..target.w {
            let sx = ((dx as usize * src_w) / target.w as usize).min(src_w - 1);
            let (px, py) = (target.x + dx, target.y + dy);
            if px >= canvas.width() || py >= canvas.height() {
                continue;
            }
            if let (Some(r), Some(g), Some(b)) = (
                pixels[[sy, sx, 0]],
                pixels[[sy, sx, 1]],
                pixels[[sy, sx, 2]],
            ) {
                canvas.put_pixel(px, py, Rgb([r, g, b]));
            }
        }
    }
}

fn draw_frame(canvas: &mut RgbImage, rect: Rect) {
    let frame = Rgb(layout::FRAME);
    let x_end = (rect.x + rect.w).min(canvas.width());
    let y_end = (rect.y + rect.h).min(canvas.height());
    if rect.x >= x_end || rect.y >= y_end {
        return;
    }
    for x in rect.x..x_end {
        canvas.put_pixel(x, rect.y, frame);
        canvas.put_pixel(x, y_end - 1, frame);
    }
    for y in rect.y..y_end {
        canvas.put_pixel(rect.x, y, frame);
        canvas.put_pixel(x_end - 1, y, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_panel(data: Array2<f32>, cmap: Colormap) -> Panel {
        Panel {
            title: "panel".to_string(),
            aspect: Aspect::Auto,
            raster: PanelRaster::Scalar { data, cmap },
        }
    }

    #[test]
    fn test_figure_pixels() {
        assert_eq!(FigureSize::new(6.4, 4.8).pixels(100.0), (640, 480));
        assert_eq!(FigureSize::from((30.0, 7.0)).pixels(10.0), (300, 70));
    }

    #[test]
    fn test_axes_boxes_row() {
        let boxes = axes_boxes(1000, 100, 3);
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].x, 125);
        assert!(boxes[0].x + boxes[0].w < boxes[1].x);
        assert!(boxes[2].x + boxes[2].w <= 900);
        assert_eq!(boxes[0].w, boxes[2].w);
    }

    #[test]
    fn test_fit_equal_centres() {
        let rect = Rect {
            x: 0,
            y: 0,
            w: 100,
            h: 50,
        };
        let fitted = fit_equal(rect, 10, 10);
        assert_eq!((fitted.w, fitted.h), (50, 50));
        assert_eq!((fitted.x, fitted.y), (25, 0));
    }

    #[test]
    fn test_render_scalar_panel_uses_range() {
        let data = Array2::from_shape_vec((1, 2), vec![10.0, 20.0]).unwrap();
        let figure = Figure {
            suptitle: Some("t".to_string()),
            size: FigureSize::new(10.0, 10.0),
            panels: vec![scalar_panel(data, Colormap::GRAY)],
        };
        let canvas = figure.render(10.0, false).unwrap();
        assert_eq!(canvas.dimensions(), (100, 100));

        let rect = axes_boxes(100, 100, 1)[0];
        let left = canvas.get_pixel(rect.x + 1, rect.y + 1);
        let right = canvas.get_pixel(rect.x + rect.w - 2, rect.y + 1);
        assert_eq!(left.0, [0, 0, 0]);
        assert_eq!(right.0, [255, 255, 255]);
    }

    #[test]
    fn test_render_constant_plane_maps_to_low_end() {
        let data = Array2::from_elem((2, 2), 42.0);
        let figure = Figure {
            suptitle: None,
            size: FigureSize::new(5.0, 5.0),
            panels: vec![scalar_panel(data, Colormap::REDS)],
        };
        let canvas = figure.render(10.0, false).unwrap();
        let rect = axes_boxes(50, 50, 1)[0];
        assert_eq!(canvas.get_pixel(rect.x + 2, rect.y + 2).0, Colormap::REDS.map(0.0));
    }

    #[test]
    fn test_render_rejects_zero_size() {
        let figure = Figure {
            suptitle: None,
            size: FigureSize::new(0.0, 3.0),
            panels: vec![scalar_panel(Array2::zeros((1, 1)), Colormap::GRAY)],
        };
        assert!(matches!(
            figure.render(100.0, true),
            Err(WorkshopError::RenderError { .. })
        ));
    }

    #[test]
    fn test_checked_pixels_limits() {
        assert_eq!(FigureSize::new(6.4, 4.8).checked_pixels(100.0).unwrap(), (640, 480));

        let too_large = [
            FigureSize::new(f32::INFINITY, f32::INFINITY),
            FigureSize::new(f32::NAN, 4.0),
            FigureSize::new(1e6, 1e6),
            FigureSize::new(700.0, 1.0),
            FigureSize::new(600.0, 600.0),
        ];
        for size in too_large {
            assert!(
                matches!(size.checked_pixels(100.0), Err(WorkshopError::RenderError { .. })),
                "{:?} should be rejected",
                size
            );
        }
        assert!(FigureSize::new(4.0, 4.0).checked_pixels(f32::INFINITY).is_err());
        assert!(FigureSize::new(-2.0, 4.0).checked_pixels(100.0).is_err());
    }

    #[test]
    fn test_render_rejects_oversized_figure() {
        let figure = Figure {
            suptitle: None,
            size: FigureSize::new(f32::INFINITY, f32::INFINITY),
            panels: vec![scalar_panel(Array2::zeros((1, 1)), Colormap::GRAY)],
        };
        assert!(matches!(
            figure.render(100.0, true),
            Err(WorkshopError::RenderError { .. })
        ));
    }

    #[test]
    fn test_render_rejects_two_channel_image() {
        let figure = Figure {
            suptitle: None,
            size: FigureSize::default(),
            panels: vec![Panel {
                title: "bad".to_string(),
                aspect: Aspect::Equal,
                raster: PanelRaster::Rgb(ImageArray::Color(Array3::zeros((2, 2, 2)))),
            }],
        };
        assert!(matches!(
            figure.render(10.0, true),
            Err(WorkshopError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_label_prefers_suptitle() {
        let mut figure = Figure {
            suptitle: Some("Channels".to_string()),
            size: FigureSize::default(),
            panels: vec![scalar_panel(Array2::zeros((1, 1)), Colormap::GRAY)],
        };
        assert_eq!(figure.label(), "Channels");
        figure.suptitle = None;
        assert_eq!(figure.label(), "panel");
    }

    #[test]
    fn test_finite_range_skips_nan() {
        let (lo, hi) = finite_range([f32::NAN, 3.0, -1.0].into_iter());
        assert_eq!((lo, hi), (-1.0, 3.0));
        assert_eq!(finite_range(std::iter::empty()), (0.0, 0.0));
    }
}

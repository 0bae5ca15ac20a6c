//! Single-image viewer

use log::warn;

use super::{Aspect, Figure, FigureSink, FigureSize, Panel, PanelRaster};
use crate::array::ImageArray;

/// Title used when the caller gives none
pub const DEFAULT_TITLE: &str = "Image";

/// Show `image` with a title on `sink`
///
/// Two-dimensional images are shown through the `viridis` colormap, RGB
/// images as-is. Rendering or presentation failures never escape: they are
/// printed as `Error: <message>` and the call returns normally. This covers
/// incompatible arrays and figure sizes that are empty or too large.
///
/// The raster carries no text. The title is kept on the [`Figure`] handed
/// to the sink, and [`PngSink`](super::PngSink) writes it to the JSON
/// sidecar next to the PNG.
///
/// # Arguments
///
/// * `sink` - Display backend
/// * `image` - Image to show
/// * `title` - Axes title, [`DEFAULT_TITLE`] when `None`
/// * `figsize` - Figure size in inches, 6.4 x 4.8 when `None`
pub fn image_show(
    sink: &mut dyn FigureSink,
    image: &ImageArray,
    title: Option<&str>,
    figsize: Option<FigureSize>,
) {
    let figure = Figure {
        suptitle: None,
        size: figsize.unwrap_or_default(),
        panels: vec![Panel {
            title: title.unwrap_or(DEFAULT_TITLE).to_string(),
            aspect: Aspect::Equal,
            raster: PanelRaster::Rgb(image.clone()),
        }],
    };

    if let Err(e) = sink.present(&figure) {
        warn!("image_show failed for {:?} image: {}", image.shape(), e);
        eprintln!("Error: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, WorkshopError};
    use crate::plot::MemorySink;
    use ndarray::{Array2, Array3};

    struct FailingSink;

    impl FigureSink for FailingSink {
        fn present(&mut self, _figure: &Figure) -> Result<()> {
            Err(WorkshopError::render("backend unavailable"))
        }
    }

    #[test]
    fn test_default_title_and_size() {
        let mut sink = MemorySink::new().with_dpi(10.0);
        let image = ImageArray::Color(Array3::from_elem((8, 8, 3), 200));
        image_show(&mut sink, &image, None, None);

        let rendered = sink.last().unwrap();
        assert_eq!(rendered.figure.panels[0].title, "Image");
        assert_eq!(rendered.canvas.dimensions(), (64, 48));
    }

    #[test]
    fn test_custom_title() {
        let mut sink = MemorySink::new().with_dpi(10.0);
        let image = ImageArray::Gray(Array2::from_shape_fn((3, 3), |(y, x)| (y * 3 + x) as u8));
        image_show(&mut sink, &image, Some("Gray"), Some(FigureSize::new(2.0, 2.0)));

        let rendered = sink.last().unwrap();
        assert_eq!(rendered.figure.panels[0].title, "Gray");
        assert_eq!(rendered.canvas.dimensions(), (20, 20));
    }

    #[test]
    fn test_incompatible_array_is_contained() {
        let mut sink = MemorySink::new().with_dpi(10.0);
        let image = ImageArray::Color(Array3::zeros((4, 4, 5)));
        image_show(&mut sink, &image, Some("broken"), None);
        assert!(sink.figures().is_empty());
    }

    #[test]
    fn test_oversized_figure_is_contained() {
        let mut sink = MemorySink::new();
        let image = ImageArray::Color(Array3::zeros((2, 2, 3)));

        image_show(
            &mut sink,
            &image,
            None,
            Some(FigureSize::new(f32::INFINITY, f32::INFINITY)),
        );
        image_show(&mut sink, &image, None, Some(FigureSize::new(1e6, 1e6)));
        image_show(&mut sink, &image, None, Some(FigureSize::new(f32::NAN, 2.0)));
        assert!(sink.figures().is_empty());

        image_show(&mut sink, &image, None, None);
        assert_eq!(sink.figures().len(), 1);
    }

    #[test]
    fn test_backend_failure_is_contained() {
        let image = ImageArray::Color(Array3::zeros((2, 2, 3)));
        image_show(&mut FailingSink, &image, None, None);
    }
}

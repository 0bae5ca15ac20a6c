//! Display backends for rendered figures
//!
//! - [`PngSink`]: write each figure as a PNG plus a JSON sidecar describing
//!   its titles and colormaps
//! - [`MemorySink`]: keep rendered figures in memory

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use log::debug;
use serde::Serialize;

use super::{Figure, FigureSize};
use crate::config::RenderConfig;
use crate::error::{Result, WorkshopError};

/// Somewhere a figure can be shown
pub trait FigureSink {
    /// Render and present `figure`
    fn present(&mut self, figure: &Figure) -> Result<()>;
}

/// Serializable description of a presented figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureMetadata {
    pub suptitle: Option<String>,
    pub size: FigureSize,
    pub dpi: f32,
    pub panels: Vec<PanelMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelMetadata {
    pub title: String,
    pub cmap: Option<String>,
}

impl FigureMetadata {
    pub fn describe(figure: &Figure, dpi: f32) -> Self {
        Self {
            suptitle: figure.suptitle.clone(),
            size: figure.size,
            dpi,
            panels: figure
                .panels
                .iter()
                .map(|p| PanelMetadata {
                    title: p.title.clone(),
                    cmap: p.cmap().map(|c| c.to_string()),
                })
                .collect(),
        }
    }
}

/// Lowercase a title into a file-name stem
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_').to_string();
    if slug.is_empty() {
        "figure".to_string()
    } else {
        slug
    }
}

/// Writes figures into a directory as `NN_<title>.png` (+ `.json`)
#[derive(Debug, Clone)]
pub struct PngSink {
    config: RenderConfig,
    written: Vec<PathBuf>,
}

impl PngSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(RenderConfig {
            output_dir: output_dir.into(),
            ..RenderConfig::default()
        })
    }

    pub fn from_config(config: RenderConfig) -> Self {
        Self {
            config,
            written: Vec::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// PNG files written so far, in presentation order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn next_stem(&self, figure: &Figure) -> String {
        format!("{:02}_{}", self.written.len() + 1, slugify(figure.label()))
    }
}

impl FigureSink for PngSink {
    fn present(&mut self, figure: &Figure) -> Result<()> {
        let canvas = figure.render(self.config.dpi, self.config.draw_frames)?;

        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|e| {
            WorkshopError::io(format!("Failed to create {}", dir.display()), e)
        })?;

        let stem = self.next_stem(figure);
        let png_path = dir.join(format!("{}.png", stem));
        canvas.save(&png_path).map_err(|e| {
            WorkshopError::io(format!("Failed to save {}", png_path.display()), e)
        })?;

        if self.config.write_metadata {
            let json_path = dir.join(format!("{}.json", stem));
            let metadata = FigureMetadata::describe(figure, self.config.dpi);
            let json = serde_json::to_string_pretty(&metadata).map_err(|e| {
                WorkshopError::io(format!("Failed to serialize {}", json_path.display()), e)
            })?;
            fs::write(&json_path, json).map_err(|e| {
                WorkshopError::io(format!("Failed to write {}", json_path.display()), e)
            })?;
        }

        debug!("wrote figure '{}' to {}", figure.label(), png_path.display());
        self.written.push(png_path);
        Ok(())
    }
}

/// A figure kept by [`MemorySink`]
#[derive(Debug, Clone)]
pub struct RenderedFigure {
    pub figure: Figure,
    pub canvas: RgbImage,
}

/// Renders figures and keeps them for later inspection
#[derive(Debug, Clone)]
pub struct MemorySink {
    dpi: f32,
    draw_frames: bool,
    figures: Vec<RenderedFigure>,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            dpi: config.dpi,
            draw_frames: config.draw_frames,
            figures: Vec::new(),
        }
    }

    /// Override the resolution, e.g. to keep test figures small
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn figures(&self) -> &[RenderedFigure] {
        &self.figures
    }

    pub fn last(&self) -> Option<&RenderedFigure> {
        self.figures.last()
    }
}

impl FigureSink for MemorySink {
    fn present(&mut self, figure: &Figure) -> Result<()> {
        let canvas = figure.render(self.dpi, self.draw_frames)?;
        self.figures.push(RenderedFigure {
            figure: figure.clone(),
            canvas,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Colormap;
    use crate::plot::{Aspect, Panel, PanelRaster};
    use ndarray::Array2;

    fn figure(title: &str) -> Figure {
        Figure {
            suptitle: Some(title.to_string()),
            size: FigureSize::new(3.0, 2.0),
            panels: vec![Panel {
                title: "Channel H".to_string(),
                aspect: Aspect::Auto,
                raster: PanelRaster::Scalar {
                    data: Array2::from_shape_fn((4, 4), |(y, x)| (y * 4 + x) as f32),
                    cmap: Colormap::GRAY,
                },
            }],
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "colorspace_workshop_sink_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("RGB channels"), "rgb_channels");
        assert_eq!(slugify("  HSL -- view! "), "hsl_view");
        assert_eq!(slugify("***"), "figure");
    }

    #[test]
    fn test_memory_sink_keeps_figures() {
        let mut sink = MemorySink::new().with_dpi(10.0);
        sink.present(&figure("one")).unwrap();
        sink.present(&figure("two")).unwrap();

        assert_eq!(sink.figures().len(), 2);
        let last = sink.last().unwrap();
        assert_eq!(last.figure.suptitle.as_deref(), Some("two"));
        assert_eq!(last.canvas.dimensions(), (30, 20));
    }

    #[test]
    fn test_metadata_describes_panels() {
        let metadata = FigureMetadata::describe(&figure("HSL"), 72.0);
        assert_eq!(metadata.panels[0].title, "Channel H");
        assert_eq!(metadata.panels[0].cmap.as_deref(), Some("gray"));

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["suptitle"], "HSL");
        assert_eq!(json["dpi"], 72.0);
    }

    #[test]
    fn test_png_sink_writes_numbered_files() {
        let dir = scratch_dir("numbered");
        let mut sink = PngSink::from_config(RenderConfig {
            output_dir: dir.clone(),
            dpi: 10.0,
            ..RenderConfig::default()
        });

        sink.present(&figure("RGB channels")).unwrap();
        sink.present(&figure("RGB channels")).unwrap();

        assert_eq!(sink.written().len(), 2);
        assert!(dir.join("01_rgb_channels.png").exists());
        assert!(dir.join("01_rgb_channels.json").exists());
        assert!(dir.join("02_rgb_channels.png").exists());

        let decoded = image::open(dir.join("01_rgb_channels.png")).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (30, 20));

        let _ = fs::remove_dir_all(&dir);
    }
}

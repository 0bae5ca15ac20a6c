//! Error types for the colorspace_workshop library

use thiserror::Error;

/// Result type alias for colorspace_workshop operations
pub type Result<T> = std::result::Result<T, WorkshopError>;

/// Error types for loading, decomposing and rendering images
#[derive(Error, Debug)]
pub enum WorkshopError {
    /// Image file could not be opened or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Unknown loader or plotter mode string
    #[error("Invalid {kind} mode \"{value}\". Use {expected}.")]
    InvalidMode {
        kind: &'static str,
        value: String,
        expected: String,
    },

    /// Unknown colormap identifier
    #[error("Unknown colormap: {name}")]
    InvalidColormap { name: String },

    /// Array dimensions do not match what the operation needs
    #[error("Invalid image shape {actual:?}: expected {expected}")]
    InvalidShape {
        expected: String,
        actual: Vec<usize>,
    },

    /// Figure could not be rasterized
    #[error("Render error: {message}")]
    RenderError { message: String },

    /// Writing figure output failed
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file could not be read or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl WorkshopError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an output error with context
    pub fn io<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::IoError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    /// Shape mismatch against a human-readable expectation
    pub fn shape(expected: impl Into<String>, actual: &[usize]) -> Self {
        Self::InvalidShape {
            expected: expected.into(),
            actual: actual.to_vec(),
        }
    }

    /// Get user-friendly error description for workshop display
    pub fn user_message(&self) -> String {
        match self {
            WorkshopError::ImageLoadError { .. } => {
                "Could not load the image. Please check the path and file format.".to_string()
            }
            WorkshopError::InvalidMode { expected, .. } => {
                format!("That mode is not available. Use {}.", expected)
            }
            WorkshopError::InvalidColormap { name } => {
                format!("Colormap '{}' is not available.", name)
            }
            WorkshopError::InvalidShape { expected, .. } => {
                format!("The image does not have the right layout ({}).", expected)
            }
            _ => "Could not produce the figure. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_message_lists_options() {
        let err = WorkshopError::InvalidMode {
            kind: "plot",
            value: "rbg".to_string(),
            expected: "\"rgb\" or \"bgr\"".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("rbg"));
        assert!(text.contains("\"rgb\" or \"bgr\""));
    }

    #[test]
    fn test_image_load_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = WorkshopError::image_load("photo.png", io);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("photo.png"));
    }

    #[test]
    fn test_shape_error_reports_dimensions() {
        let err = WorkshopError::shape("(height, width, 3)", &[4, 4]);
        assert!(err.to_string().contains("[4, 4]"));
        assert!(err.user_message().contains("(height, width, 3)"));
    }
}

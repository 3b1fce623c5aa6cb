//! Error types for the cube_scan library

use crate::color::FaceLabel;
use thiserror::Error;

/// Result type alias for cube_scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Comprehensive error types for scanning, assembly and solving
#[derive(Error, Debug)]
pub enum ScanError {
    /// Calibration or scan attempted before the capture source produced a frame
    #[error("No camera frame available")]
    CaptureUnavailable,

    /// Scan submitted before a successful calibration
    #[error("Scanner is not calibrated")]
    NotCalibrated,

    /// Scan submitted after all six faces were recorded
    #[error("All faces have already been scanned")]
    SessionComplete,

    /// Center cell did not classify to one of the six face labels
    #[error("Center facelet could not be recognized")]
    UnrecognizedCenter,

    /// A non-center cell of a stored face is unrecognized
    #[error("Unrecognized facelet on face {face} at row {row}, column {col}")]
    UnrecognizedFacelet { face: FaceLabel, row: usize, col: usize },

    /// Assembly attempted without one scan per face
    #[error("Cube state incomplete, missing face(s): {}", format_faces(.faces))]
    MissingFace { faces: Vec<FaceLabel> },

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Frame does not cover the sampling grid
    #[error("Frame {width}x{height} is smaller than the scan grid ({required}x{required})")]
    FrameTooSmall { width: u32, height: u32, required: u32 },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Configuration file could not be read or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Transport failure or non-success HTTP status from the solver service
    #[error("Solver request failed: {message}")]
    SolverRequestFailed {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Solver service answered with an `error` field
    #[error("Solver rejected cube state: {message}")]
    SolverRejected { message: String },
}

fn format_faces(faces: &[FaceLabel]) -> String {
    faces
        .iter()
        .map(|face| face.as_char().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ScanError {
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

    /// Create a solver transport error with context
    pub fn solver(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::SolverRequestFailed {
            message: message.into(),
            status: source.status().map(|status| status.as_u16()),
            source: Some(source),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if the user can simply retry the same action
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScanError::CaptureUnavailable
                | ScanError::UnrecognizedCenter
                | ScanError::SolverRequestFailed { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            ScanError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            ScanError::CaptureUnavailable => {
                "The camera is not ready yet. Wait for the preview and try again.".to_string()
            }
            ScanError::NotCalibrated => {
                "Calibrate first: hold the white center facing the camera and press calibrate."
                    .to_string()
            }
            ScanError::SessionComplete => {
                "All six faces are scanned. Solve the cube or restart the session.".to_string()
            }
            ScanError::UnrecognizedCenter => {
                "Could not recognize the center color. Adjust the lighting and scan again."
                    .to_string()
            }
            ScanError::MissingFace { faces } => {
                format!("Scan the remaining face(s) first: {}.", format_faces(faces))
            }
            ScanError::SolverRequestFailed { .. } | ScanError::SolverRejected { .. } => {
                "The solver could not process this cube. Check the scans and try again."
                    .to_string()
            }
            _ => "Scanning failed. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_face_message_names_faces() {
        let err = ScanError::MissingFace {
            faces: vec![FaceLabel::L, FaceLabel::B],
        };
        assert_eq!(
            err.to_string(),
            "Cube state incomplete, missing face(s): L, B"
        );
        assert!(err.user_message().contains("L, B"));
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(ScanError::UnrecognizedCenter.is_recoverable());
        assert!(ScanError::CaptureUnavailable.is_recoverable());
        assert!(!ScanError::SessionComplete.is_recoverable());
        assert!(!ScanError::MissingFace { faces: vec![FaceLabel::U] }.is_recoverable());
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = ScanError::invalid("cell_size", 0);
        assert_eq!(err.to_string(), "Invalid parameter: cell_size = 0");
    }
}

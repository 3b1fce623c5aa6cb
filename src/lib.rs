//! # Cube Scan
//!
//! A Rust crate for reading the state of a Rubik's cube from camera frames.
//!
//! This library turns a live video feed into a cube state string by:
//! - Sampling a fixed 3×3 grid overlay on each frame
//! - Converting the samples to HSL and matching them against reference sticker colors
//! - Correcting the references from a white-facelet calibration sample
//! - Tracking six face scans keyed by their center color
//! - Assembling the 54-character state in U, R, F, D, L, B order for a solver
//!
//! ## Example
//!
//! ```rust
//! use cube_scan::{FaceLabel, FaceScan, HslColor, ScanSession};
//!
//! let mut session = ScanSession::default();
//! session.calibrate(HslColor::white());
//! for face in FaceLabel::ALL {
//!     session.submit_scan(FaceScan::uniform(face))?;
//! }
//! let state = session.assemble()?;
//! assert_eq!(&state.as_str()[..9], "UUUUUUUUU");
//! # Ok::<(), cube_scan::ScanError>(())
//! ```

pub mod error;
pub mod constants;
pub mod config;
pub mod color;
pub mod calibration;
pub mod sampling;
pub mod scan;
pub mod pipeline;
pub mod capture;
pub mod image_loader;
pub mod preview;
pub mod solver;
pub mod controller;

pub use calibration::{Calibrator, CorrectionVector};
pub use capture::{FrameSource, Renderer, SharedFrame};
pub use color::{
    ClassificationPolicy, ColorClassifier, ColorConverter, FaceLabel, HslColor, ReferenceTable,
    RgbSample,
};
pub use config::ScannerConfig;
pub use controller::{ControlEvent, ControlHandle, ControlReport, ScanController, SubmissionGuard};
pub use error::{Result, ScanError};
pub use pipeline::FaceScanner;
pub use preview::{spawn_preview, PreviewHandle};
pub use sampling::{FaceSampler, GridGeometry};
pub use scan::{CubeState, CubeStateAssembler, FaceScan, ScanOutcome, ScanSession, SessionState};
pub use solver::{Solver, SolverClient};

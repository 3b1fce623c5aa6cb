//! Frame sampling module
//!
//! This module defines the 3×3 overlay geometry and reads one averaged color
//! sample per cell from a captured frame.

pub mod grid;

pub use grid::{CellRect, FaceSampler, FaceSamples, GridGeometry, GridLine};

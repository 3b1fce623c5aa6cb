//! Color conversion and classification module
//!
//! This module handles RGB to HSL conversion, the six canonical face labels,
//! the reference sticker table and nearest-reference classification.

pub mod conversion;
pub mod label;
pub mod reference;
pub mod classifier;

pub use classifier::{classify, ClassificationPolicy, ColorClassifier};
pub use conversion::{ColorConverter, HslColor, RgbSample};
pub use label::FaceLabel;
pub use reference::{ReferenceColor, ReferenceTable};

//! Capture and rendering collaborators
//!
//! The camera and the display live outside this crate. They are reached
//! through two seams: [`FrameSource`] answers whether a frame is available
//! and hands out the current frame, [`Renderer`] draws a frame with the grid
//! overlay and never feeds anything back.

use crate::sampling::GridGeometry;
use image::RgbImage;
use std::sync::{Arc, RwLock};

/// Supplier of the most recent camera frame
pub trait FrameSource: Send + Sync {
    /// Whether a decodable frame exists yet
    fn frame_available(&self) -> bool;

    /// Copy of the current frame, `None` until the camera delivers one
    fn current_frame(&self) -> Option<RgbImage>;
}

/// Display sink for the live preview
pub trait Renderer: Send {
    fn render(&mut self, frame: &RgbImage, grid: &GridGeometry);
}

/// Latest-frame slot shared between a capture thread and the scanner
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct SharedFrame {
    slot: Arc<RwLock<Option<RgbImage>>>,
}

impl SharedFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current frame
    pub fn publish(&self, frame: RgbImage) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(frame);
    }

    /// Forget the current frame, e.g. when the camera stops
    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }
}

impl FrameSource for SharedFrame {
    fn frame_available(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    fn current_frame(&self) -> Option<RgbImage> {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

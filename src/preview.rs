//! Live preview loop
//!
//! A repeating tokio task renders the current frame and the grid overlay at a
//! fixed interval. It runs independently of calibration and scanning and
//! stops when its [`PreviewHandle`] is stopped or dropped.

use crate::capture::{FrameSource, Renderer};
use crate::sampling::GridGeometry;
use log::{debug, warn};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to a running preview task
pub struct PreviewHandle {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<u64>>,
}

impl PreviewHandle {
    /// Stop the loop and wait for it; returns the number of rendered frames
    pub async fn stop(mut self) -> u64 {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        match self.task.take() {
            Some(task) => match task.await {
                Ok(rendered) => rendered,
                Err(e) => {
                    warn!("preview task ended abnormally: {e}");
                    0
                }
            },
            None => 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Spawn the preview loop on the current tokio runtime
///
/// Ticks without an available frame render nothing.
pub fn spawn_preview<S, R>(
    source: S,
    mut renderer: R,
    geometry: GridGeometry,
    interval: Duration,
) -> PreviewHandle
where
    S: FrameSource + 'static,
    R: Renderer + 'static,
{
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut rendered = 0u64;

        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                _ = ticker.tick() => {
                    if let Some(frame) = source.current_frame() {
                        renderer.render(&frame, &geometry);
                        rendered += 1;
                    }
                }
            }
        }

        debug!("preview stopped after {rendered} frame(s)");
        rendered
    });

    PreviewHandle {
        stop: Some(stop_tx),
        task: Some(task),
    }
}

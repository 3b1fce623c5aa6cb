//! Event handler owning the scan session
//!
//! User actions arrive as [`ControlEvent`]s and are processed one at a time by
//! a single task, which is the only owner of the [`ScanSession`]. Results
//! flow back as [`ControlReport`]s.
//!
//! Scan triggers are gated by a [`SubmissionGuard`]: a trigger only produces
//! an event if no other scan is in flight, and the flag clears when the
//! controller drops the ticket, whatever the outcome.
//!
//! Solve requests run as separate tasks so the handler keeps serving events.
//! Each request gets an id and only the response to the most recent request
//! is reported.

use crate::calibration::{Calibrator, CorrectionVector};
use crate::capture::FrameSource;
use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::pipeline::FaceScanner;
use crate::scan::{CubeState, FaceScan, ScanOutcome, ScanSession};
use crate::solver::Solver;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const EVENT_QUEUE_DEPTH: usize = 16;

/// In-progress flag for scan submissions
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    busy: Arc<AtomicBool>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the flag; `None` while another submission holds it
    pub fn try_acquire(&self) -> Option<SubmissionTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionTicket {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof that a submission holds the guard; releases it on drop
#[derive(Debug)]
pub struct SubmissionTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for SubmissionTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// User actions handled by the controller
#[derive(Debug)]
pub enum ControlEvent {
    Calibrate,
    Scan(SubmissionTicket),
    Solve,
    Restart,
    Shutdown,
}

/// Results reported back to the UI
#[derive(Debug)]
pub enum ControlReport {
    Calibrated(CorrectionVector),
    FaceStored { outcome: ScanOutcome, scan: FaceScan },
    Completed(CubeState),
    Solved { state: CubeState, solution: String },
    Restarted,
    Failed(ScanError),
}

/// Owns the session, the frame source and the solver
pub struct ScanController<S, V> {
    session: ScanSession,
    scanner: FaceScanner,
    source: S,
    solver: V,
    guard: SubmissionGuard,
    latest_request: u64,
}

impl<S, V> ScanController<S, V>
where
    S: FrameSource + 'static,
    V: Solver + Clone + 'static,
{
    pub fn new(config: &ScannerConfig, source: S, solver: V) -> Self {
        Self {
            session: ScanSession::new(Calibrator::from_config(&config.calibration)),
            scanner: FaceScanner::from_config(config),
            source,
            solver,
            guard: SubmissionGuard::new(),
            latest_request: 0,
        }
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn scanner(&self) -> &FaceScanner {
        &self.scanner
    }

    /// Guard to hand to whatever triggers scans
    pub fn submission_guard(&self) -> SubmissionGuard {
        self.guard.clone()
    }

    fn frame(&self) -> Result<image::RgbImage> {
        if !self.source.frame_available() {
            return Err(ScanError::CaptureUnavailable);
        }
        self.source.current_frame().ok_or(ScanError::CaptureUnavailable)
    }

    /// Calibrate from the center cell of the current frame
    pub fn calibrate(&mut self) -> Result<CorrectionVector> {
        let frame = self.frame()?;
        let white = self.scanner.white_sample(&frame)?;
        Ok(self.session.calibrate(white))
    }

    /// Classify the current frame and submit it to the session
    ///
    /// The guard is released when `ticket` goes out of scope at the end of
    /// this call, so a rejected scan can be retried immediately.
    pub fn scan(&mut self, ticket: SubmissionTicket) -> Result<(ScanOutcome, FaceScan)> {
        let _ticket = ticket;
        if !self.session.is_calibrated() {
            return Err(ScanError::NotCalibrated);
        }
        if self.session.is_complete() {
            return Err(ScanError::SessionComplete);
        }
        let frame = self.frame()?;
        let scan = self.scanner.scan(&frame, self.session.reference_table())?;
        let outcome = self.session.submit_scan(scan)?;
        Ok((outcome, scan))
    }

    /// Clear the session; solve requests still in flight become stale
    pub fn restart(&mut self) {
        self.session.restart();
        self.latest_request += 1;
    }

    /// Assemble and solve in place, without the event loop
    pub async fn solve_now(&self) -> Result<(CubeState, String)> {
        let state = self.session.assemble()?;
        let solution = self.solver.solve(&state).await?;
        Ok((state, solution))
    }

    /// Run the handler on its own task
    pub fn spawn(self) -> (ControlHandle, mpsc::Receiver<ControlReport>, JoinHandle<()>) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let (report_tx, report_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let handle = ControlHandle {
            events: event_tx,
            guard: self.submission_guard(),
        };
        let task = tokio::spawn(self.run(event_rx, report_tx));
        (handle, report_rx, task)
    }

    /// Process events until `Shutdown`, or until either channel closes
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<ControlEvent>,
        reports: mpsc::Sender<ControlReport>,
    ) {
        let (solved_tx, mut solved_rx) = mpsc::unbounded_channel::<(u64, CubeState, Result<String>)>();

        loop {
            let report = tokio::select! {
                event = events.recv() => match event {
                    None | Some(ControlEvent::Shutdown) => break,
                    Some(event) => self.handle(event, &solved_tx),
                },
                Some((id, state, result)) = solved_rx.recv() => {
                    if id != self.latest_request {
                        debug!("discarding stale solver response #{id}");
                        continue;
                    }
                    match result {
                        Ok(solution) => {
                            info!("solver request #{id} succeeded");
                            Some(ControlReport::Solved { state, solution })
                        }
                        Err(e) => {
                            warn!("solver request #{id} failed: {e}");
                            Some(ControlReport::Failed(e))
                        }
                    }
                }
            };

            if let Some(report) = report {
                if reports.send(report).await.is_err() {
                    break;
                }
            }
        }
        debug!("scan controller stopped");
    }

    fn handle(
        &mut self,
        event: ControlEvent,
        solved_tx: &mpsc::UnboundedSender<(u64, CubeState, Result<String>)>,
    ) -> Option<ControlReport> {
        let report = match event {
            ControlEvent::Calibrate => match self.calibrate() {
                Ok(vector) => ControlReport::Calibrated(vector),
                Err(e) => ControlReport::Failed(e),
            },
            ControlEvent::Scan(ticket) => match self.scan(ticket) {
                Ok((outcome, _)) if self.session.is_complete() => match self.session.assemble() {
                    Ok(state) => {
                        info!("all faces scanned: {state}");
                        ControlReport::Completed(state)
                    }
                    Err(e) => {
                        warn!("session complete after face {} but cannot assemble: {e}", outcome.face);
                        ControlReport::Failed(e)
                    }
                },
                Ok((outcome, scan)) => ControlReport::FaceStored { outcome, scan },
                Err(e) => {
                    warn!("scan failed: {e}");
                    ControlReport::Failed(e)
                }
            },
            ControlEvent::Solve => match self.session.assemble() {
                Ok(state) => {
                    self.latest_request += 1;
                    let id = self.latest_request;
                    let solver = self.solver.clone();
                    let solved_tx = solved_tx.clone();
                    tokio::spawn(async move {
                        let result = solver.solve(&state).await;
                        let _ = solved_tx.send((id, state, result));
                    });
                    return None;
                }
                Err(e) => ControlReport::Failed(e),
            },
            ControlEvent::Restart => {
                self.restart();
                ControlReport::Restarted
            }
            ControlEvent::Shutdown => return None,
        };
        Some(report)
    }
}

/// Sending side of a spawned controller
#[derive(Debug, Clone)]
pub struct ControlHandle {
    events: mpsc::Sender<ControlEvent>,
    guard: SubmissionGuard,
}

impl ControlHandle {
    pub async fn calibrate(&self) -> bool {
        self.events.send(ControlEvent::Calibrate).await.is_ok()
    }

    /// Request a scan; a no-op returning `false` while one is in flight
    pub async fn trigger_scan(&self) -> bool {
        match self.guard.try_acquire() {
            Some(ticket) => self.events.send(ControlEvent::Scan(ticket)).await.is_ok(),
            None => {
                debug!("scan already in progress, trigger ignored");
                false
            }
        }
    }

    pub async fn solve(&self) -> bool {
        self.events.send(ControlEvent::Solve).await.is_ok()
    }

    pub async fn restart(&self) -> bool {
        self.events.send(ControlEvent::Restart).await.is_ok()
    }

    pub async fn shutdown(&self) -> bool {
        self.events.send(ControlEvent::Shutdown).await.is_ok()
    }

    pub fn is_scan_in_progress(&self) -> bool {
        self.guard.is_busy()
    }
}

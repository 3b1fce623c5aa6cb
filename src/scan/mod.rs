//! Face scanning module
//!
//! This module holds the classified face matrix, the scan session state
//! machine and the cube state assembler.

pub mod face;
pub mod session;
pub mod assembler;

pub use assembler::{CubeState, CubeStateAssembler, CUBE_STATE_LEN};
pub use face::{FaceScan, Facelet};
pub use session::{ScanOutcome, ScanSession, SessionState, FACE_COUNT};

//! Cube state string assembly
//!
//! Faces are concatenated in the canonical order U, R, F, D, L, B, each
//! contributing its nine labels row by row.

use super::face::FaceScan;
use crate::color::FaceLabel;
use crate::error::{Result, ScanError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Length of a complete cube state string
pub const CUBE_STATE_LEN: usize = 54;

/// 54-character cube state in solver notation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CubeState(String);

impl CubeState {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the cube state string from stored face scans
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeStateAssembler;

impl CubeStateAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Concatenate all six faces
    ///
    /// # Errors
    ///
    /// - `ScanError::MissingFace` listing every absent face
    /// - `ScanError::UnrecognizedFacelet` for the first unrecognized cell
    pub fn assemble(&self, results: &BTreeMap<FaceLabel, FaceScan>) -> Result<CubeState> {
        let missing: Vec<FaceLabel> = FaceLabel::ALL
            .into_iter()
            .filter(|face| !results.contains_key(face))
            .collect();
        if !missing.is_empty() {
            return Err(ScanError::MissingFace { faces: missing });
        }

        let mut state = String::with_capacity(CUBE_STATE_LEN);
        for face in FaceLabel::ALL {
            let Some(scan) = results.get(&face) else {
                return Err(ScanError::MissingFace { faces: vec![face] });
            };
            for (row, col, facelet) in scan.iter() {
                let label = facelet.ok_or(ScanError::UnrecognizedFacelet { face, row, col })?;
                state.push(label.as_char());
            }
        }
        Ok(CubeState(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved_results() -> BTreeMap<FaceLabel, FaceScan> {
        FaceLabel::ALL
            .into_iter()
            .map(|face| (face, FaceScan::uniform(face)))
            .collect()
    }

    #[test]
    fn test_solved_cube() {
        let state = CubeStateAssembler::new().assemble(&solved_results()).unwrap();
        assert_eq!(
            state.as_str(),
            "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"
        );
        assert_eq!(state.as_str().len(), CUBE_STATE_LEN);
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let mut results = solved_results();
        results.insert(FaceLabel::F, FaceScan::from_chars("RUBFFFDLU").unwrap());
        let assembler = CubeStateAssembler::new();
        let first = assembler.assemble(&results).unwrap();
        let second = assembler.assemble(&results).unwrap();
        assert_eq!(first, second);
        assert_eq!(&first.as_str()[18..27], "RUBFFFDLU");
    }

    #[test]
    fn test_missing_back_face() {
        let mut results = solved_results();
        results.remove(&FaceLabel::B);
        let err = CubeStateAssembler::new().assemble(&results).unwrap_err();
        match &err {
            ScanError::MissingFace { faces } => assert_eq!(faces, &vec![FaceLabel::B]),
            other => panic!("expected MissingFace, got {other:?}"),
        }
        assert!(err.to_string().contains('B'));
    }

    #[test]
    fn test_every_missing_face_is_named() {
        let mut results = BTreeMap::new();
        results.insert(FaceLabel::R, FaceScan::uniform(FaceLabel::R));
        let err = CubeStateAssembler::new().assemble(&results).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cube state incomplete, missing face(s): U, F, D, L, B"
        );
    }

    #[test]
    fn test_unrecognized_facelet() {
        let mut results = solved_results();
        results.insert(FaceLabel::D, FaceScan::from_chars("DDDDDDDD?").unwrap());
        let err = CubeStateAssembler::new().assemble(&results).unwrap_err();
        assert!(matches!(
            err,
            ScanError::UnrecognizedFacelet { face: FaceLabel::D, row: 2, col: 2 }
        ));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let state = CubeStateAssembler::new().assemble(&solved_results()).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, format!("\"{}\"", state));
    }
}

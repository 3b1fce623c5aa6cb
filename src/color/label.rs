//! Canonical face-color labels in solver notation

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six cube faces, named by the solver's face notation
///
/// Declaration order is the canonical face order of the cube state string and
/// the tie-break order of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FaceLabel {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl FaceLabel {
    /// All labels in canonical order
    pub const ALL: [FaceLabel; 6] = [
        FaceLabel::U,
        FaceLabel::R,
        FaceLabel::F,
        FaceLabel::D,
        FaceLabel::L,
        FaceLabel::B,
    ];

    /// Position in canonical order
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_char(self) -> char {
        match self {
            FaceLabel::U => 'U',
            FaceLabel::R => 'R',
            FaceLabel::F => 'F',
            FaceLabel::D => 'D',
            FaceLabel::L => 'L',
            FaceLabel::B => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        FaceLabel::ALL.into_iter().find(|label| label.as_char() == c)
    }
}

impl fmt::Display for FaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let order: String = FaceLabel::ALL.iter().map(|l| l.as_char()).collect();
        assert_eq!(order, "URFDLB");
        for (i, label) in FaceLabel::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
        }
    }

    #[test]
    fn test_from_char() {
        assert_eq!(FaceLabel::from_char('F'), Some(FaceLabel::F));
        assert_eq!(FaceLabel::from_char('x'), None);
        assert_eq!(FaceLabel::from_char('u'), None);
    }
}

//! Classified 3×3 face matrices

use crate::color::{FaceLabel, ReferenceTable};
use crate::constants::grid::GRID_SIZE;

/// One classified facelet; `None` marks an unrecognized color
pub type Facelet = Option<FaceLabel>;

/// Classified labels of one face, indexed `[row][col]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceScan {
    cells: [[Facelet; GRID_SIZE]; GRID_SIZE],
}

impl FaceScan {
    pub fn new(cells: [[Facelet; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// Face with all nine facelets set to `label`
    pub fn uniform(label: FaceLabel) -> Self {
        Self::new([[Some(label); GRID_SIZE]; GRID_SIZE])
    }

    /// Face read from nine label characters, row-major
    ///
    /// Characters outside `URFDLB` become unrecognized facelets. Returns
    /// `None` unless exactly nine characters are given.
    pub fn from_chars(chars: &str) -> Option<Self> {
        let facelets: Vec<Facelet> = chars.chars().map(FaceLabel::from_char).collect();
        if facelets.len() != GRID_SIZE * GRID_SIZE {
            return None;
        }
        let mut cells = [[None; GRID_SIZE]; GRID_SIZE];
        for (i, facelet) in facelets.into_iter().enumerate() {
            cells[i / GRID_SIZE][i % GRID_SIZE] = facelet;
        }
        Some(Self::new(cells))
    }

    pub fn cells(&self) -> &[[Facelet; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Facelet {
        self.cells[row][col]
    }

    /// Label of the center facelet, which identifies the face
    pub fn center(&self) -> Facelet {
        self.cells[GRID_SIZE / 2][GRID_SIZE / 2]
    }

    /// Facelets in row-major order with their positions
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Facelet)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, facelet)| (row, col, *facelet))
        })
    }

    /// Human-readable readout: one line per row of color names
    pub fn readout(&self, table: &ReferenceTable) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|facelet| match facelet {
                        Some(label) => table.get(*label).display_name,
                        None => "unknown",
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! The last-layer orientation pattern and its quarter-turn rotations.
//!
//! A pattern is two bit strings: eight bits for the non-center top facelets
//! (row by row, center skipped) and twelve for the facelets surrounding the
//! top layer (north row, west column, east column, south row). Both embed
//! into one 5×5 grid so a single generic matrix rotation turns the whole
//! pattern at once; the four grid corners stay unused.

use std::fmt;

use thiserror::Error;

const SIZE: usize = 5;

/// Grid homes of the eight top bits, in bit order.
const TOP_CELLS: [(usize, usize); 8] = [
    (1, 1),
    (1, 2),
    (1, 3),
    (2, 1),
    (2, 3),
    (3, 1),
    (3, 2),
    (3, 3),
];

/// Grid homes of the twelve ring bits, in bit order.
const RING_CELLS: [(usize, usize); 12] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 0),
    (2, 0),
    (3, 0),
    (1, 4),
    (2, 4),
    (3, 4),
    (4, 1),
    (4, 2),
    (4, 3),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternParseError {
    #[error("expected {expected} pattern bits, got {got}")]
    BadLength { expected: usize, got: usize },
    #[error("pattern bits must be '0' or '1', got `{0}`")]
    BadBit(char),
}

/// Which facelets currently show the orientation color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OllPattern {
    top: [bool; 8],
    ring: [bool; 12],
}

impl OllPattern {
    pub fn new(top: [bool; 8], ring: [bool; 12]) -> OllPattern {
        OllPattern { top, ring }
    }

    /// Parses the 0/1 strings used by the case files.
    pub fn from_strings(top: &str, ring: &str) -> Result<OllPattern, PatternParseError> {
        Ok(OllPattern {
            top: parse_bits(top)?,
            ring: parse_bits(ring)?,
        })
    }

    pub fn top(&self) -> &[bool; 8] {
        &self.top
    }

    pub fn ring(&self) -> &[bool; 12] {
        &self.ring
    }

    /// The pattern as seen after `turns` clockwise quarter turns of the
    /// whole grid.
    pub fn rotated(&self, turns: u8) -> OllPattern {
        let mut grid = self.to_grid();
        for _ in 0..turns % 4 {
            grid = rotate_cw(&grid);
        }
        OllPattern::from_grid(&grid)
    }

    fn to_grid(&self) -> [[Option<bool>; SIZE]; SIZE] {
        let mut grid = [[None; SIZE]; SIZE];
        // The center is always the orientation color; it never varies.
        grid[2][2] = Some(true);
        for (bit, (row, col)) in self.top.iter().zip(TOP_CELLS) {
            grid[row][col] = Some(*bit);
        }
        for (bit, (row, col)) in self.ring.iter().zip(RING_CELLS) {
            grid[row][col] = Some(*bit);
        }
        grid
    }

    fn from_grid(grid: &[[Option<bool>; SIZE]; SIZE]) -> OllPattern {
        OllPattern {
            top: TOP_CELLS.map(|(row, col)| grid[row][col] == Some(true)),
            ring: RING_CELLS.map(|(row, col)| grid[row][col] == Some(true)),
        }
    }

    fn bits(bits: &[bool]) -> String {
        bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
    }
}

impl fmt::Display for OllPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            OllPattern::bits(&self.top),
            OllPattern::bits(&self.ring)
        )
    }
}

/// Standard transpose-and-reverse quarter turn of a square matrix.
fn rotate_cw(grid: &[[Option<bool>; SIZE]; SIZE]) -> [[Option<bool>; SIZE]; SIZE] {
    let mut next = [[None; SIZE]; SIZE];
    for (row, cells) in grid.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            next[col][SIZE - 1 - row] = *cell;
        }
    }
    next
}

fn parse_bits<const N: usize>(s: &str) -> Result<[bool; N], PatternParseError> {
    if s.chars().count() != N {
        return Err(PatternParseError::BadLength {
            expected: N,
            got: s.chars().count(),
        });
    }
    let mut bits = [false; N];
    for (bit, c) in bits.iter_mut().zip(s.chars()) {
        *bit = match c {
            '0' => false,
            '1' => true,
            other => return Err(PatternParseError::BadBit(other)),
        };
    }
    Ok(bits)
}

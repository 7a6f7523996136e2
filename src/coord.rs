use std::{fmt, ops};

use itertools::Itertools;
use serde::{Deserialize, Serialize};


pub const DEFAULT_BOARD_WIDTH: i32 = 8;
pub const DEFAULT_BOARD_HEIGHT: i32 = 8;


// A lattice point. Carries no bounds invariant of its own: arithmetic is free
// to wander off the board and `BoardShape::contains` is the one bounds check.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub col: i32,
    pub row: i32,
}

impl Pos {
    pub const fn new(col: i32, row: i32) -> Self { Self { col, row } }
}

impl ops::Add<(i32, i32)> for Pos {
    type Output = Self;
    fn add(self, (d_col, d_row): (i32, i32)) -> Self::Output {
        Self { col: self.col + d_col, row: self.row + d_row }
    }
}

impl ops::Sub for Pos {
    type Output = (i32, i32);
    fn sub(self, other: Self) -> Self::Output {
        (self.col - other.col, self.row - other.row)
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BoardShape {
    pub width: i32,
    pub height: i32,
}

impl BoardShape {
    pub const fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0);
        Self { width, height }
    }

    pub fn contains(self, pos: Pos) -> bool {
        (0..self.width).contains(&pos.col) && (0..self.height).contains(&pos.row)
    }

    pub fn positions(self) -> impl Iterator<Item = Pos> {
        (0..self.width).cartesian_product(0..self.height).map(|(col, row)| Pos::new(col, row))
    }
}

impl Default for BoardShape {
    fn default() -> Self { Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT) }
}

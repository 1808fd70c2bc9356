use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// End-of-game bonus lines completed on a wall.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonuses {
    pub complete_rows: u8,
    pub complete_columns: u8,
    pub complete_color_sets: u8,
}

impl Bonuses {
    pub fn from_board(board: &Board) -> Self {
        Self {
            complete_rows: count_complete(board.cells().rows()),
            complete_columns: count_complete(board.cells().columns()),
            complete_color_sets: complete_color_sets(board),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.complete_rows == 0 && self.complete_columns == 0 && self.complete_color_sets == 0
    }
}

fn count_complete<'a>(lines: impl IntoIterator<Item = ndarray::ArrayView1<'a, Cell>>) -> u8 {
    let count = lines
        .into_iter()
        .filter(|line| line.iter().all(|cell| cell.is_placed()))
        .count();
    count.try_into().unwrap_or(u8::MAX)
}

fn complete_color_sets(board: &Board) -> u8 {
    let mut remaining: BTreeSet<TileColor> = TileColor::PALETTE.into_iter().collect();
    for (coords, cell) in board.iter() {
        if !cell.is_placed() {
            remaining.remove(&TileColor::at(coords));
        }
    }
    remaining.len().try_into().unwrap_or(u8::MAX)
}

/// Points awarded per completed bonus line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusWeights {
    pub row: i32,
    pub column: i32,
    pub color_set: i32,
}

impl BonusWeights {
    pub const STANDARD: Self = Self {
        row: 2,
        column: 7,
        color_set: 10,
    };

    pub fn points(&self, bonuses: &Bonuses) -> i32 {
        i32::from(bonuses.complete_rows) * self.row
            + i32::from(bonuses.complete_columns) * self.column
            + i32::from(bonuses.complete_color_sets) * self.color_set
    }
}

impl Default for BonusWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

use serde::{Deserialize, Serialize};

use crate::*;

/// Tile colors, in the order they run along the top row of the wall.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileColor {
    Blue,
    Yellow,
    Red,
    Black,
    Flower,
}

impl TileColor {
    pub const PALETTE: [TileColor; 5] = [
        TileColor::Blue,
        TileColor::Yellow,
        TileColor::Red,
        TileColor::Black,
        TileColor::Flower,
    ];

    /// Color printed on the wall at `coords`. Each row is the previous one shifted right by one.
    pub const fn at((row, col): Coord2) -> Self {
        let size = BOARD_SIZE as usize;
        Self::PALETTE[(col as usize + size - row as usize) % size]
    }
}

/// State of a single wall position.
///
/// `is_new` marks a tile placed during the round being edited and always implies `placed`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCell")]
pub struct Cell {
    placed: bool,
    is_new: bool,
}

impl Cell {
    pub const EMPTY: Self = Self {
        placed: false,
        is_new: false,
    };

    /// A tile carried over from an earlier round.
    pub const SETTLED: Self = Self {
        placed: true,
        is_new: false,
    };

    pub const fn is_placed(self) -> bool {
        self.placed
    }

    pub const fn is_new(self) -> bool {
        self.is_new
    }

    /// Tiles from earlier rounds cannot be picked back up.
    pub const fn is_locked(self) -> bool {
        self.placed && !self.is_new
    }

    /// Flips `placed` and `is_new` together. Locked cells are left alone.
    pub fn toggle(&mut self) -> bool {
        if self.is_locked() {
            return false;
        }
        self.placed = !self.placed;
        self.is_new = !self.is_new;
        true
    }

    pub fn settle(&mut self) {
        self.is_new = false;
    }

    pub(crate) fn mark_new(&mut self, is_new: bool) {
        self.is_new = self.placed && is_new;
    }
}

#[derive(Deserialize)]
struct RawCell {
    placed: bool,
    #[serde(default)]
    is_new: bool,
}

impl From<RawCell> for Cell {
    fn from(raw: RawCell) -> Self {
        Self {
            placed: raw.placed,
            is_new: raw.placed && raw.is_new,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_places_and_undoes_new_tile() {
        let mut cell = Cell::EMPTY;

        assert!(cell.toggle());
        assert!(cell.is_placed() && cell.is_new());

        assert!(cell.toggle());
        assert_eq!(cell, Cell::EMPTY);
    }

    #[test]
    fn toggle_leaves_settled_tile_alone() {
        let mut cell = Cell::SETTLED;

        assert!(!cell.toggle());
        assert_eq!(cell, Cell::SETTLED);
    }

    #[test]
    fn palette_shifts_one_column_per_row() {
        assert_eq!(TileColor::at((0, 0)), TileColor::Blue);
        assert_eq!(TileColor::at((1, 0)), TileColor::Flower);
        assert_eq!(TileColor::at((2, 0)), TileColor::Black);
        assert_eq!(TileColor::at((4, 0)), TileColor::Yellow);
        assert_eq!(TileColor::at((3, 4)), TileColor::Yellow);
        assert_eq!(TileColor::at((4, 4)), TileColor::Blue);
    }
}

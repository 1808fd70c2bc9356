use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The 5×5 wall of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Array2<Cell>", into = "Array2<Cell>")]
pub struct Board {
    cells: Array2<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: Array2::default((BOARD_SIZE, BOARD_SIZE).to_nd_index()),
        }
    }

    /// Board with settled tiles at `coords`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate lies outside the wall.
    pub fn from_placed(coords: &[Coord2]) -> Self {
        let mut board = Self::new();
        for &pos in coords {
            check_bounds(pos);
            board.cells[pos.to_nd_index()] = Cell::SETTLED;
        }
        board
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// # Panics
    ///
    /// Panics if `coords` lies outside the wall.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        check_bounds(coords);
        self.cells[coords.to_nd_index()]
    }

    /// # Panics
    ///
    /// Panics if `coords` lies outside the wall.
    pub fn color_of(&self, coords: Coord2) -> TileColor {
        check_bounds(coords);
        TileColor::at(coords)
    }

    pub fn is_placed(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_placed()
    }

    /// Flips the cell at `coords`, returns whether anything changed.
    ///
    /// # Panics
    ///
    /// Panics if `coords` lies outside the wall.
    pub fn toggle(&mut self, coords: Coord2) -> bool {
        check_bounds(coords);
        self.cells[coords.to_nd_index()].toggle()
    }

    /// Clears every new-tile marker, keeping the tiles.
    pub fn settle(&mut self) {
        self.cells.iter_mut().for_each(Cell::settle);
    }

    /// Recomputes new-tile markers as the tiles missing from `previous`.
    pub fn mark_new_since(&mut self, previous: Option<&Board>) {
        for ((row, col), cell) in self.cells.indexed_iter_mut() {
            let coords = (row as Coord, col as Coord);
            let was_placed = previous.is_some_and(|board| board.is_placed(coords));
            cell.mark_new(!was_placed);
        }
    }

    pub fn placed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_placed()).count()
    }

    /// All cells with their coordinates, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn new_tiles(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.is_new())
            .map(|(coords, _)| coords)
    }

    /// Number of placed cells directly following `coords` in `direction`, up to the first gap.
    pub fn run_length(&self, coords: Coord2, direction: Direction) -> u8 {
        let run = self
            .cells
            .iter_ray(coords, direction)
            .take_while(|&pos| self.cells[pos.to_nd_index()].is_placed())
            .count();
        run.try_into().unwrap_or(u8::MAX)
    }

    pub(crate) fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        check_bounds(coords);
        &self.cells[coords.to_nd_index()]
    }
}

impl TryFrom<Array2<Cell>> for Board {
    type Error = GameError;

    fn try_from(cells: Array2<Cell>) -> Result<Self> {
        let size = BOARD_SIZE as usize;
        if cells.dim() != (size, size) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }
}

impl From<Board> for Array2<Cell> {
    fn from(board: Board) -> Self {
        board.cells
    }
}

fn check_bounds(coords: Coord2) {
    assert!(
        in_bounds(coords),
        "coordinates {coords:?} outside the {BOARD_SIZE}x{BOARD_SIZE} wall"
    );
}

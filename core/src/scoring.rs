//! Adjacency scoring of newly placed tiles.
//!
//! A new tile scores along each axis where it touches at least one placed tile: one point for itself plus one for
//! every tile in the unbroken runs on either side. A tile touching nothing scores a single point. A tile touching
//! tiles on both axes collects its own point once per axis.

use crate::*;

/// Points earned by the tile at `coords`, scanned against everything placed on `board`.
pub fn tile_score(board: &Board, coords: Coord2) -> i32 {
    let horizontal = axis_score(board, coords, Direction::HORIZONTAL);
    let vertical = axis_score(board, coords, Direction::VERTICAL);

    if horizontal == 0 && vertical == 0 {
        1
    } else {
        horizontal + vertical
    }
}

fn axis_score(board: &Board, coords: Coord2, directions: [Direction; 2]) -> i32 {
    let neighbors: i32 = directions
        .into_iter()
        .map(|direction| i32::from(board.run_length(coords, direction)))
        .sum();

    if neighbors == 0 { 0 } else { neighbors + 1 }
}

/// Sum of [`tile_score`] over every new tile, before penalties.
pub fn raw_score(board: &Board) -> i32 {
    board
        .new_tiles()
        .map(|coords| tile_score(board, coords))
        .sum()
}

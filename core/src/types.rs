use ndarray::Array2;

/// Single coordinate axis used for row and column indices.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Width and height of the wall.
pub const BOARD_SIZE: Coord = 5;

/// Number of cells on the wall.
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Row-major position of `coords`, the order cells are flattened in.
pub const fn flat_index((row, col): Coord2) -> usize {
    row as usize * BOARD_SIZE as usize + col as usize
}

/// Inverse of [`flat_index`].
pub const fn coords_at(index: usize) -> Coord2 {
    let size = BOARD_SIZE as usize;
    ((index / size) as Coord, (index % size) as Coord)
}

pub const fn in_bounds((row, col): Coord2) -> bool {
    row < BOARD_SIZE && col < BOARD_SIZE
}

/// Orthogonal scan direction on the wall.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const HORIZONTAL: [Direction; 2] = [Direction::Left, Direction::Right];
    pub const VERTICAL: [Direction; 2] = [Direction::Up, Direction::Down];

    const fn delta(self) -> (i8, i8) {
        match self {
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
        }
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

pub trait RayIterExt {
    /// Coordinates walked from `start` (exclusive) towards the edge in `direction`.
    fn iter_ray(&self, start: Coord2, direction: Direction) -> RayIter;
}

impl<T> RayIterExt for Array2<T> {
    fn iter_ray(&self, start: Coord2, direction: Direction) -> RayIter {
        let (rows, cols) = self.dim();
        let bounds = (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        );
        RayIter::new(start, direction, bounds)
    }
}

#[derive(Debug)]
pub struct RayIter {
    current: Coord2,
    delta: (i8, i8),
    bounds: Coord2,
}

impl RayIter {
    fn new(start: Coord2, direction: Direction, bounds: Coord2) -> Self {
        Self {
            current: start,
            delta: direction.delta(),
            bounds,
        }
    }
}

impl Iterator for RayIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let next_item = apply_delta(self.current, self.delta, self.bounds)?;
        self.current = next_item;
        Some(next_item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn ray_stops_at_the_edge() {
        let grid: Array2<u8> = Array2::default([5, 5]);

        let left: Vec<_> = grid.iter_ray((2, 2), Direction::Left).collect();
        let down: Vec<_> = grid.iter_ray((3, 1), Direction::Down).collect();
        let up: Vec<_> = grid.iter_ray((0, 4), Direction::Up).collect();

        assert_eq!(left, [(2, 1), (2, 0)]);
        assert_eq!(down, [(4, 1)]);
        assert!(up.is_empty());
    }

    #[test]
    fn flat_index_round_trips() {
        for index in 0..CELL_COUNT {
            assert_eq!(flat_index(coords_at(index)), index);
        }
        assert_eq!(coords_at(13), (2, 3));
    }
}

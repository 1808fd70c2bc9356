use serde::{Deserialize, Serialize};

use crate::*;

/// Highest floor-line deduction a round can carry.
pub const MAX_PENALTY: u8 = 14;

/// Clamps an externally supplied penalty into `0..=MAX_PENALTY`.
pub fn clamp_penalty(value: i32) -> u8 {
    let clamped = value.clamp(0, i32::from(MAX_PENALTY));
    if clamped != value {
        log::warn!("Penalty {value} out of range, clamped to {clamped}");
    }
    u8::try_from(clamped).unwrap_or(MAX_PENALTY)
}

/// One scoring period: the wall as it stands after the round, plus its floor penalty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    board: Board,
    penalty: u8,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(board: Board, penalty: i32) -> Self {
        Self {
            board,
            penalty: clamp_penalty(penalty),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn penalty(&self) -> u8 {
        self.penalty
    }

    /// Points this round earns, which can go negative.
    pub fn score(&self) -> i32 {
        raw_score(&self.board) - i32::from(self.penalty)
    }

    /// The round that follows this one: same tiles, nothing new, no penalty.
    pub fn successor(&self) -> Self {
        let mut board = self.board.clone();
        board.settle();
        Self { board, penalty: 0 }
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn set_penalty(&mut self, penalty: u8) {
        self.penalty = penalty.min(MAX_PENALTY);
    }
}

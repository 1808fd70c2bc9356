#![no_std]

extern crate alloc;

pub use board::*;
pub use bonus::*;
pub use error::*;
pub use history::*;
pub use round::*;
pub use scoring::*;
pub use tile::*;
pub use types::*;

mod board;
mod bonus;
mod error;
mod history;
mod round;
mod scoring;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaceOutcome {
    Placed,
    Removed,
    /// The cell holds a tile from an earlier round.
    Locked,
}

impl PlaceOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Placed | Self::Removed => true,
            Self::Locked => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The only round was cleared back to an empty wall.
    Reset,
    /// The round at `index` was removed; its stored copy is stale.
    Removed { index: usize },
}

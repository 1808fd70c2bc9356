use alloc::vec::Vec;
use core::mem;
use serde::{Deserialize, Serialize};

use crate::*;

/// Scores derived from a history, refreshed after every mutation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_score: i32,
    pub bonuses: Bonuses,
}

impl Summary {
    pub fn score_with_bonuses(&self, weights: &BonusWeights) -> i32 {
        self.total_score + weights.points(&self.bonuses)
    }
}

/// Ordered rounds of one player, oldest first. Never empty: the last round is the one being edited.
///
/// The summary is written out with the rounds but recomputed when read back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredHistory")]
pub struct RoundHistory {
    archived: Vec<Round>,
    current: Round,
    summary: Summary,
}

#[derive(Deserialize)]
struct StoredHistory {
    archived: Vec<Round>,
    current: Round,
}

impl From<StoredHistory> for RoundHistory {
    fn from(stored: StoredHistory) -> Self {
        Self::from_parts(stored.archived, stored.current)
    }
}

impl Default for RoundHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), Round::new())
    }

    /// Rebuilds a history from finalized rounds, oldest first.
    ///
    /// Stored rounds carry no new-tile markers, so each round's new tiles are taken to be those missing from the
    /// round before it.
    pub fn from_rounds(rounds: Vec<Round>) -> Result<Self> {
        let mut archived = rounds;
        let mut previous: Option<Board> = None;
        for round in archived.iter_mut() {
            round.board_mut().mark_new_since(previous.as_ref());
            previous = Some(round.board().clone());
        }

        let current = archived.pop().ok_or(GameError::EmptyHistory)?;
        Ok(Self::from_parts(archived, current))
    }

    fn from_parts(archived: Vec<Round>, current: Round) -> Self {
        let mut history = Self {
            archived,
            current,
            summary: Summary::default(),
        };
        history.refresh();
        history
    }

    pub fn len(&self) -> usize {
        self.archived.len() + 1
    }

    /// Always false, a history holds at least one round.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn current(&self) -> &Round {
        &self.current
    }

    pub fn current_index(&self) -> usize {
        self.archived.len()
    }

    pub fn round(&self, index: usize) -> Option<&Round> {
        match index.cmp(&self.archived.len()) {
            core::cmp::Ordering::Less => self.archived.get(index),
            core::cmp::Ordering::Equal => Some(&self.current),
            core::cmp::Ordering::Greater => None,
        }
    }

    pub fn rounds(&self) -> impl Iterator<Item = &Round> + '_ {
        self.archived.iter().chain(core::iter::once(&self.current))
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn total_score(&self) -> i32 {
        self.summary.total_score
    }

    pub fn bonuses(&self) -> Bonuses {
        self.summary.bonuses
    }

    pub fn score_with_bonuses(&self, weights: &BonusWeights) -> i32 {
        self.summary.score_with_bonuses(weights)
    }

    /// Places a tile on the current round, or picks up one placed earlier in the same round.
    ///
    /// # Panics
    ///
    /// Panics if `coords` lies outside the wall.
    pub fn place(&mut self, coords: Coord2) -> PlaceOutcome {
        let cell = self.current.board().cell_at(coords);
        if cell.is_locked() {
            return PlaceOutcome::Locked;
        }

        self.current.board_mut().toggle(coords);
        self.refresh();
        log::debug!("Toggled {coords:?} in round {}", self.current_index());

        if cell.is_placed() {
            PlaceOutcome::Removed
        } else {
            PlaceOutcome::Placed
        }
    }

    /// Finalizes the current round and starts the next one on top of it. Returns the new round's index.
    pub fn advance_round(&mut self) -> usize {
        let next = self.current.successor();
        let finished = mem::replace(&mut self.current, next);
        self.archived.push(finished);
        self.refresh();
        log::debug!("Advanced to round {}", self.current_index());
        self.current_index()
    }

    /// Drops the current round. The only round left is reset instead of removed.
    pub fn delete_current_round(&mut self) -> DeleteOutcome {
        let index = self.current_index();
        let outcome = match self.archived.pop() {
            Some(previous) => {
                self.current = previous;
                DeleteOutcome::Removed { index }
            }
            None => {
                self.current = Round::new();
                DeleteOutcome::Reset
            }
        };
        self.refresh();
        log::debug!("Deleted round {index}: {outcome:?}");
        outcome
    }

    pub fn set_penalty(&mut self, value: i32) -> MarkOutcome {
        let penalty = clamp_penalty(value);
        if penalty == self.current.penalty() {
            return MarkOutcome::NoChange;
        }

        self.current.set_penalty(penalty);
        self.refresh();
        MarkOutcome::Changed
    }

    fn refresh(&mut self) {
        self.summary = Summary {
            total_score: self.rounds().map(Round::score).sum(),
            bonuses: Bonuses::from_board(self.current.board()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn new_history_has_one_empty_round() {
        let history = RoundHistory::new();

        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &Round::new());
        assert_eq!(history.summary(), Summary::default());
    }

    #[test]
    fn place_toggles_and_refreshes_summary() {
        let mut history = RoundHistory::new();

        assert_eq!(history.place((0, 0)), PlaceOutcome::Placed);
        assert_eq!(history.place((0, 1)), PlaceOutcome::Placed);
        assert_eq!(history.total_score(), 4);

        assert_eq!(history.place((0, 1)), PlaceOutcome::Removed);
        assert_eq!(history.total_score(), 1);
        assert!(!history.current().board().is_placed((0, 1)));
    }

    #[test]
    fn place_refuses_tiles_from_earlier_rounds() {
        let mut history = RoundHistory::new();
        history.place((2, 2));
        history.advance_round();

        assert_eq!(history.place((2, 2)), PlaceOutcome::Locked);
        assert!(history.current().board().is_placed((2, 2)));
        assert!(!PlaceOutcome::Locked.has_update());
    }

    #[test]
    fn advance_keeps_layout_and_resets_round_state() {
        let mut history = RoundHistory::new();
        history.place((0, 0));
        history.place((3, 4));
        history.set_penalty(4);

        assert_eq!(history.advance_round(), 1);

        let current = history.current();
        assert_eq!(history.len(), 2);
        assert_eq!(current.board().placed_count(), 2);
        assert_eq!(current.board().new_tiles().count(), 0);
        assert_eq!(current.penalty(), 0);
        for (coords, cell) in current.board().iter() {
            let previous = history.round(0).unwrap().board().cell_at(coords);
            assert_eq!(cell.is_placed(), previous.is_placed());
        }
    }

    #[test]
    fn total_score_accumulates_across_rounds() {
        let mut history = RoundHistory::new();
        history.place((0, 0));
        history.set_penalty(1);
        history.advance_round();
        history.place((0, 1));

        // round 0: 1 - 1, round 1: (0, 1) joins (0, 0) for 2
        assert_eq!(history.round(0).unwrap().score(), 0);
        assert_eq!(history.current().score(), 2);
        assert_eq!(history.total_score(), 2);
    }

    #[test]
    fn delete_only_round_resets() {
        let mut history = RoundHistory::new();
        history.place((1, 1));
        history.set_penalty(6);

        assert_eq!(history.delete_current_round(), DeleteOutcome::Reset);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().board().placed_count(), 0);
        assert_eq!(history.current().penalty(), 0);
        assert_eq!(history.total_score(), 0);
    }

    #[test]
    fn delete_removes_last_round_and_reports_its_index() {
        let mut history = RoundHistory::new();
        history.place((1, 1));
        history.advance_round();
        history.place((1, 2));
        history.advance_round();

        assert_eq!(
            history.delete_current_round(),
            DeleteOutcome::Removed { index: 2 }
        );
        assert_eq!(history.len(), 2);
        // the restored round is editable again
        assert_eq!(history.place((1, 2)), PlaceOutcome::Removed);
    }

    #[test]
    fn set_penalty_clamps_into_range() {
        let mut history = RoundHistory::new();

        assert_eq!(history.set_penalty(20), MarkOutcome::Changed);
        assert_eq!(history.current().penalty(), MAX_PENALTY);
        assert_eq!(history.total_score(), -14);

        assert_eq!(history.set_penalty(14), MarkOutcome::NoChange);
        assert_eq!(history.set_penalty(-1), MarkOutcome::Changed);
        assert_eq!(history.current().penalty(), 0);
    }

    #[test]
    fn bonuses_follow_the_current_round() {
        let mut history = RoundHistory::new();
        for col in 0..BOARD_SIZE {
            history.place((2, col));
        }

        assert_eq!(history.bonuses().complete_rows, 1);
        assert_eq!(history.bonuses().complete_columns, 0);
        assert_eq!(
            history.score_with_bonuses(&BonusWeights::default()),
            history.total_score() + 2
        );
    }

    #[test]
    fn from_rounds_restores_new_tile_markers() {
        let rounds = vec![
            Round::from_parts(Board::from_placed(&[(0, 0)]), 0),
            Round::from_parts(Board::from_placed(&[(0, 0), (0, 1)]), 2),
        ];

        let history = RoundHistory::from_rounds(rounds).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.round(0).unwrap().score(), 1);
        assert_eq!(history.current().score(), 0);
        assert_eq!(history.total_score(), 1);
    }

    #[test]
    fn deserialize_recomputes_a_stale_summary() {
        let mut history = RoundHistory::new();
        history.place((0, 0));
        history.advance_round();
        history.place((0, 1));

        let mut value = serde_json::to_value(&history).unwrap();
        value["summary"]["total_score"] = serde_json::Value::from(99);
        let restored: RoundHistory = serde_json::from_value(value).unwrap();

        assert_eq!(restored.total_score(), 3);
        assert_eq!(restored, history);
    }

    #[test]
    fn from_rounds_rejects_empty_input() {
        assert_eq!(
            RoundHistory::from_rounds(Vec::new()),
            Err(GameError::EmptyHistory)
        );
    }
}

use azulscore_core::{
    Coord2, DeleteOutcome, GameError, MarkOutcome, PlaceOutcome, Round, RoundHistory,
};

use crate::*;

/// A player's round history kept in step with a [`RoundStore`].
///
/// Every mutation completes locally first; the latest round is then written at its index, and a removed round is
/// deleted only after the history has been truncated.
#[derive(Debug)]
pub struct SyncedHistory<S> {
    config: SessionConfig,
    history: RoundHistory,
    store: S,
}

impl<S: RoundStore> SyncedHistory<S> {
    /// Starts a fresh history. Nothing is written until the first mutation.
    pub fn new(config: SessionConfig, store: S) -> Self {
        Self {
            config,
            history: RoundHistory::new(),
            store,
        }
    }

    /// Continues from rounds previously read back from the store.
    pub fn resume(config: SessionConfig, store: S, rounds: Vec<Round>) -> Result<Self, GameError> {
        let history = RoundHistory::from_rounds(rounds)?;
        Ok(Self {
            config,
            history,
            store,
        })
    }

    /// Continues from this session's player in `snapshot`, or starts fresh when it has nothing usable.
    ///
    /// Stored rounds are only taken over when they decode to indices `0..n`; anything else would put later writes
    /// under keys that belong to other rounds.
    pub fn resume_from_snapshot(config: SessionConfig, store: S, snapshot: &RawSnapshot) -> Self {
        let history = snapshot
            .player(&config.player)
            .map(|rounds| Player::decode(&config.player, rounds))
            .filter(|player| {
                let contiguous = player.is_contiguous();
                if !contiguous {
                    log::warn!(
                        "Stored rounds of {} have gaps or broken entries, starting fresh",
                        player.name
                    );
                }
                contiguous
            })
            .and_then(|player| player.history());

        match history {
            Some(history) => {
                log::debug!("Resumed {} rounds for {}", history.len(), config.player);
                Self {
                    config,
                    history,
                    store,
                }
            }
            None => Self::new(config, store),
        }
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_parts(self) -> (SessionConfig, RoundHistory, S) {
        (self.config, self.history, self.store)
    }

    pub fn place(&mut self, coords: Coord2) -> PlaceOutcome {
        let outcome = self.history.place(coords);
        if outcome.has_update() {
            self.write_current();
        }
        outcome
    }

    pub fn advance_round(&mut self) -> usize {
        let index = self.history.advance_round();
        self.write_current();
        index
    }

    pub fn delete_current_round(&mut self) -> DeleteOutcome {
        let outcome = self.history.delete_current_round();
        if let DeleteOutcome::Removed { index } = outcome {
            if let Err(err) = self.store.delete(index) {
                log::warn!("Failed to delete {}: {err}", self.config.round_path(index));
            }
        }
        self.write_current();
        outcome
    }

    pub fn set_penalty(&mut self, value: i32) -> MarkOutcome {
        let outcome = self.history.set_penalty(value);
        if outcome.has_update() {
            self.write_current();
        }
        outcome
    }

    fn write_current(&mut self) {
        let index = self.history.current_index();
        let encoded = encode_round(self.history.current());
        if let Err(err) = self.store.write(index, &encoded) {
            log::warn!("Failed to write {}: {err}", self.config.round_path(index));
        }
    }
}

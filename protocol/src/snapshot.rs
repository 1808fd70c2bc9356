use std::collections::BTreeMap;

use azulscore_core::{Round, RoundHistory};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::*;

/// Stored rounds of every player: name → round index (as text) → encoded round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSnapshot(BTreeMap<String, BTreeMap<String, String>>);

impl RawSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the JSON value of the namespace node.
    ///
    /// Realtime databases hand back a player's rounds as an array when the keys are `0..n`, with `null` in place of
    /// missing rounds, so both objects and arrays are accepted. Values that are not text are dropped.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        let players = match value {
            Value::Object(players) => players,
            Value::Null => return Self::default(),
            other => {
                log::warn!("Ignoring snapshot that is not an object: {other}");
                return Self::default();
            }
        };

        let mut snapshot = Self::default();
        for (name, rounds) in players {
            let entries: Vec<(String, Value)> = match rounds {
                Value::Object(rounds) => rounds.into_iter().collect(),
                Value::Array(rounds) => rounds
                    .into_iter()
                    .enumerate()
                    .filter(|(_, value)| !value.is_null())
                    .map(|(index, value)| (index.to_string(), value))
                    .collect(),
                other => {
                    log::warn!("Ignoring player {name:?} with malformed rounds: {other}");
                    continue;
                }
            };

            let rounds = entries
                .into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(text) => Some((key, text)),
                    other => {
                        log::warn!("Ignoring round {name}/{key}, not text: {other}");
                        None
                    }
                })
                .collect();
            snapshot.0.insert(name, rounds);
        }
        snapshot
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn player(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> + '_ {
        self.0.iter().map(|(name, rounds)| (name.as_str(), rounds))
    }

    pub fn set_round(&mut self, player: &str, round_index: usize, encoded: &EncodedRound) {
        self.0
            .entry(player.to_owned())
            .or_default()
            .insert(round_index.to_string(), encoded.as_str().to_owned());
    }

    /// Returns whether a round was removed. Players left without rounds disappear, as they do remotely.
    pub fn remove_round(&mut self, player: &str, round_index: usize) -> bool {
        let Some(rounds) = self.0.get_mut(player) else {
            return false;
        };
        let removed = rounds.remove(&round_index.to_string()).is_some();
        if rounds.is_empty() {
            self.0.remove(player);
        }
        removed
    }
}

/// A stored round that failed to decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRound {
    pub key: String,
    pub error: DecodeError,
}

/// One player's decoded rounds, oldest first, each with the index it is stored under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub rounds: Vec<(usize, Round)>,
    pub skipped: Vec<SkippedRound>,
}

impl Player {
    /// Decodes every round on its own; broken rounds end up in `skipped`.
    pub fn decode(name: &str, rounds: &BTreeMap<String, String>) -> Self {
        let mut decoded = Vec::with_capacity(rounds.len());
        let mut skipped = Vec::new();

        for (key, text) in rounds {
            match decode_entry(key, text) {
                Ok(entry) => decoded.push(entry),
                Err(error) => {
                    log::warn!("Skipping round {name}/{key}: {error}");
                    skipped.push(SkippedRound {
                        key: key.clone(),
                        error,
                    });
                }
            }
        }

        // keys sort as text, rounds go by number
        decoded.sort_by_key(|(index, _)| *index);

        Self {
            name: name.to_owned(),
            rounds: decoded,
            skipped,
        }
    }

    /// Whether every stored round decoded and the indices run `0..n` without gaps, so local round indices
    /// match stored keys.
    pub fn is_contiguous(&self) -> bool {
        self.skipped.is_empty()
            && self
                .rounds
                .iter()
                .enumerate()
                .all(|(position, (index, _))| position == *index)
    }

    /// `None` when no round decoded.
    pub fn history(&self) -> Option<RoundHistory> {
        let rounds = self.rounds.iter().map(|(_, round)| round.clone()).collect();
        RoundHistory::from_rounds(rounds).ok()
    }
}

fn decode_entry(key: &str, text: &str) -> Result<(usize, Round), DecodeError> {
    let index =
        parse_round_index(key).ok_or_else(|| DecodeError::InvalidRoundIndex(key.to_owned()))?;
    Ok((index, decode_round(text)?))
}

/// Only the form [`RawSnapshot::set_round`] writes; `"01"` or `"+1"` would alias `"1"`.
fn parse_round_index(key: &str) -> Option<usize> {
    key.parse::<usize>().ok().filter(|index| index.to_string() == key)
}

pub fn decode_snapshot(snapshot: &RawSnapshot) -> Vec<Player> {
    snapshot
        .iter()
        .map(|(name, rounds)| Player::decode(name, rounds))
        .collect()
}

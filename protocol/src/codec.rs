//! Compact text form of a round, as stored remotely.
//!
//! Layout, most significant bit first:
//!
//! | bits   | content                                   |
//! |--------|-------------------------------------------|
//! | 0..25  | placed flags, row-major                   |
//! | 25..28 | zero padding                              |
//! | 28..36 | penalty, big-endian (only the low nibble is read back) |
//! | 36..40 | zero padding to a whole byte              |
//!
//! The five bytes are base64 encoded and the last two characters dropped; they only ever hold the trailing zero
//! bits and the `=` pad, so they are restored as `"A="` on decode. New-tile markers are not stored.

use std::fmt;

use azulscore_core::{Board, CELL_COUNT, Coord2, MAX_PENALTY, Round, coords_at};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::DecodeError;

pub const PLACEMENT_BITS: u32 = CELL_COUNT as u32;
pub const PADDING_BITS: u32 = 3;
pub const PENALTY_BITS: u32 = 8;
pub const ENCODED_BITS: u32 = PLACEMENT_BITS + PADDING_BITS + PENALTY_BITS;

/// Bytes the bit sequence is packed into before base64.
pub const PACKED_LEN: usize = 5;

/// Characters kept after dropping the base64 tail.
pub const ENCODED_TEXT_LEN: usize = 6;

const DROPPED_TAIL: &str = "A=";
const TRAILING_BITS: u32 = PACKED_LEN as u32 * 8 - ENCODED_BITS;
const PENALTY_NIBBLE: u64 = 0x0f;

/// Stored text form of a round.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedRound(String);

impl EncodedRound {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn decode(&self) -> Result<Round, DecodeError> {
        decode_round(&self.0)
    }
}

impl fmt::Display for EncodedRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EncodedRound> for String {
    fn from(encoded: EncodedRound) -> Self {
        encoded.0
    }
}

/// Packs placements and penalty into [`PACKED_LEN`] bytes.
pub fn pack_round(round: &Round) -> [u8; PACKED_LEN] {
    let placements = round
        .board()
        .iter()
        .fold(0u64, |bits, (_, cell)| (bits << 1) | u64::from(cell.is_placed()));

    let bits = (((placements << PADDING_BITS) << PENALTY_BITS) | u64::from(round.penalty()))
        << TRAILING_BITS;

    let mut packed = [0u8; PACKED_LEN];
    packed.copy_from_slice(&bits.to_be_bytes()[8 - PACKED_LEN..]);
    packed
}

/// Inverse of [`pack_round`]. Every tile comes back settled.
pub fn unpack_round(packed: [u8; PACKED_LEN]) -> Round {
    let mut word = [0u8; 8];
    word[8 - PACKED_LEN..].copy_from_slice(&packed);
    let bits = u64::from_be_bytes(word) >> TRAILING_BITS;

    let placements = bits >> (PENALTY_BITS + PADDING_BITS);
    let placed: Vec<Coord2> = (0..CELL_COUNT)
        .filter(|&index| (placements >> (CELL_COUNT - 1 - index)) & 1 == 1)
        .map(coords_at)
        .collect();

    let penalty = i32::try_from(bits & PENALTY_NIBBLE).unwrap_or(i32::from(MAX_PENALTY));
    Round::from_parts(Board::from_placed(&placed), penalty)
}

pub fn encode_round(round: &Round) -> EncodedRound {
    let mut text = STANDARD.encode(pack_round(round));
    text.truncate(ENCODED_TEXT_LEN);
    EncodedRound(text)
}

pub fn decode_round(text: &str) -> Result<Round, DecodeError> {
    if text.len() != ENCODED_TEXT_LEN {
        return Err(DecodeError::InvalidLength { len: text.len() });
    }

    let decoded = STANDARD.decode(format!("{text}{DROPPED_TAIL}"))?;
    let packed: [u8; PACKED_LEN] = decoded
        .try_into()
        .map_err(|bytes: Vec<u8>| DecodeError::InvalidLength { len: bytes.len() })?;

    Ok(unpack_round(packed))
}

#[cfg(test)]
mod tests {
    use azulscore_core::RoundHistory;

    use super::*;

    fn sample_round() -> Round {
        Round::from_parts(Board::from_placed(&[(0, 0), (2, 3), (4, 4)]), 6)
    }

    #[test]
    fn packs_bits_most_significant_first() {
        assert_eq!(pack_round(&sample_round()), [0x80, 0x04, 0x00, 0x80, 0x60]);
    }

    #[test]
    fn encodes_to_six_characters() {
        assert_eq!(encode_round(&sample_round()).as_str(), "gAQAgG");
        assert_eq!(encode_round(&Round::new()).as_str(), "AAAAAA");
        assert_eq!(
            encode_round(&Round::from_parts(Board::new(), 14)).as_str(),
            "AAAAAO"
        );
    }

    #[test]
    fn full_wall_encoding() {
        let all: Vec<_> = Board::new().iter().map(|(coords, _)| coords).collect();
        let round = Round::from_parts(Board::from_placed(&all), 0);

        assert_eq!(encode_round(&round).as_str(), "////gA");
        assert_eq!(decode_round("////gA"), Ok(round));
    }

    #[test]
    fn round_trip() {
        let round = sample_round();

        assert_eq!(decode_round(encode_round(&round).as_str()), Ok(round));
    }

    #[test]
    fn round_trip_every_penalty() {
        for penalty in 0..=i32::from(MAX_PENALTY) {
            let round = Round::from_parts(Board::from_placed(&[(1, 2), (3, 0)]), penalty);

            assert_eq!(encode_round(&round).decode(), Ok(round));
        }
    }

    #[test]
    fn decode_drops_new_tile_markers() {
        let mut history = RoundHistory::new();
        history.place((2, 2));

        let decoded = decode_round(encode_round(history.current()).as_str()).unwrap();

        assert!(decoded.board().is_placed((2, 2)));
        assert_eq!(decoded.board().new_tiles().count(), 0);
    }

    #[test]
    fn decode_masks_high_penalty_nibble() {
        // penalty byte 0xf6
        assert_eq!(decode_round("AAAAD2").unwrap().penalty(), 6);
    }

    #[test]
    fn decode_clamps_penalty_fifteen() {
        assert_eq!(decode_round("AAAAAP").unwrap().penalty(), MAX_PENALTY);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(
            decode_round("gAQA"),
            Err(DecodeError::InvalidLength { len: 4 })
        );
        assert_eq!(
            decode_round("gAQAgGA="),
            Err(DecodeError::InvalidLength { len: 8 })
        );
    }

    #[test]
    fn decode_rejects_non_base64() {
        assert!(matches!(
            decode_round("gA*AgG"),
            Err(DecodeError::InvalidBase64(_))
        ));
    }
}

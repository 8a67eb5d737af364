//! Canonical hashing of observations.
//!
//! FNV-1a over a fixed little-endian encoding. Not cryptographic; used to
//! assert that two observations are byte-for-byte identical and to
//! compare agent input histories across runs.

use crate::observation::{Observation, SeedSupply};
use tilth_core::{Position, Terrain};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_bytes(hash: u64, bytes: &[u8]) -> u64 {
    bytes.iter().fold(hash, |h, &b| fnv1a_byte(h, b))
}

fn fnv1a_position(hash: u64, pos: Position) -> u64 {
    let hash = fnv1a_bytes(hash, &pos.x.to_le_bytes());
    fnv1a_bytes(hash, &pos.y.to_le_bytes())
}

fn terrain_code(terrain: Terrain) -> u8 {
    match terrain {
        Terrain::Empty => 0,
        Terrain::Seed => 1,
        Terrain::Growing => 2,
        Terrain::Ready => 3,
        Terrain::Obstacle => 4,
        Terrain::Base => 5,
    }
}

impl Observation {
    /// Hash of the canonical encoding of this observation.
    ///
    /// Field order: position, turn, time remaining (tag byte then value),
    /// width, height, seed supply, tile count, then each tile as
    /// position plus terrain code in observation order.
    pub fn digest(&self) -> u64 {
        let mut hash = FNV_OFFSET;
        hash = fnv1a_position(hash, self.position);
        hash = fnv1a_bytes(hash, &self.turn.0.to_le_bytes());
        hash = match self.time_remaining {
            Some(left) => fnv1a_bytes(fnv1a_byte(hash, 1), &left.to_le_bytes()),
            None => fnv1a_byte(hash, 0),
        };
        hash = fnv1a_bytes(hash, &self.width.to_le_bytes());
        hash = fnv1a_bytes(hash, &self.height.to_le_bytes());
        hash = fnv1a_byte(
            hash,
            match self.inventory.seeds {
                SeedSupply::Unlimited => 0xFF,
            },
        );
        hash = fnv1a_bytes(hash, &(self.tiles.len() as u32).to_le_bytes());
        for (&pos, view) in &self.tiles {
            hash = fnv1a_position(hash, pos);
            hash = fnv1a_byte(hash, terrain_code(view.terrain));
        }
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_observation;
    use tilth_core::{Direction, TurnId};
    use tilth_test_utils::fixtures;

    #[test]
    fn empty_input_hashes_to_offset_basis() {
        assert_eq!(fnv1a_bytes(FNV_OFFSET, &[]), FNV_OFFSET);
    }

    #[test]
    fn known_fnv1a_vector() {
        // FNV-1a 64 of "a".
        assert_eq!(fnv1a_bytes(FNV_OFFSET, b"a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn digest_tracks_turn_and_terrain() {
        let mut field = fixtures::open_field(3, 3);
        let before = build_observation(&field, TurnId(0), Some(5));
        assert_ne!(before.digest(), build_observation(&field, TurnId(1), Some(5)).digest());

        field.move_drone(Direction::Right);
        field.move_drone(Direction::Left);
        let after = build_observation(&field, TurnId(0), Some(5));
        assert_eq!(after.position, before.position);
        // (1, 0) is now a seed.
        assert_ne!(after.digest(), before.digest());
    }
}

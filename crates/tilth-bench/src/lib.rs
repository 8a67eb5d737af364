//! Benchmark profiles and utilities for the Tilth grid-world simulator.
//!
//! Provides pre-built [`EnvironmentConfig`] profiles for benchmarks:
//!
//! - [`reference_profile`]: 64x64 field with generated obstacles
//! - [`stress_profile`]: 256x256 field (~65K tiles) with the tree pattern
//! - [`action_script`]: deterministic pseudo-random action sequence

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tilth_core::{Action, Direction};
use tilth_engine::EnvironmentConfig;
use tilth_space::Layout;

/// Build a reference benchmark profile: 64x64 field, 20% obstacles.
///
/// Unbounded so benchmarks can step as long as they like.
pub fn reference_profile(seed: u64) -> EnvironmentConfig {
    generated(64, 64, seed)
}

/// Build a stress benchmark profile: 256x256 field, scattered trees.
///
/// Generated layouts check connectivity per obstacle, which is too slow
/// to build at this size inside a benchmark loop.
pub fn stress_profile() -> EnvironmentConfig {
    EnvironmentConfig {
        width: 256,
        height: 256,
        layout: Layout::Scattered,
        max_turns: None,
        ..EnvironmentConfig::default()
    }
}

fn generated(width: u32, height: u32, seed: u64) -> EnvironmentConfig {
    EnvironmentConfig {
        width,
        height,
        layout: Layout::Generated {
            seed,
            density: 0.2,
        },
        max_turns: None,
        ..EnvironmentConfig::default()
    }
}

/// Generate `n` deterministic actions from `seed`.
///
/// Uses a 64-bit LCG; one in five actions is a WAIT.
pub fn action_script(n: usize, seed: u64) -> Vec<Action> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            match Direction::from_code(((state >> 33) % 5) as u8) {
                Some(d) => Action::Move(d),
                None => Action::Wait,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_validates() {
        reference_profile(42).validate().unwrap();
    }

    #[test]
    fn stress_profile_validates() {
        stress_profile().validate().unwrap();
    }

    #[test]
    fn action_script_deterministic_and_mixed() {
        let a = action_script(500, 42);
        assert_eq!(a, action_script(500, 42));
        assert!(a.contains(&Action::Wait));
        for d in Direction::ALL {
            assert!(a.contains(&Action::Move(d)));
        }
    }
}

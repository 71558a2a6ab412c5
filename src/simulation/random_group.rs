//! Random balanced groups for benchmarks and tests.
//!
//! Balances are drawn in integer minor units, so every generated group
//! sums to exactly zero.

use crate::core::balance::{BalanceSheet, ParticipantBalance};
use crate::core::money;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration for generating a random group.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of participants.
    pub participant_count: usize,
    /// Largest absolute balance, in minor units.
    pub max_minor_units: i64,
    /// Decimal places of the minor unit.
    pub scale: u32,
    /// Fixed seed for reproducible groups; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            participant_count: 10,
            max_minor_units: 100_000,
            scale: money::DEFAULT_SCALE,
            seed: None,
        }
    }
}

/// Generate a group whose balances sum to zero.
///
/// Every participant but the last gets a random balance; the last one
/// absorbs the negated sum.
pub fn generate_balanced_group(config: &GroupConfig) -> BalanceSheet {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let max = config.max_minor_units.max(1);

    let mut sheet = BalanceSheet::new();
    let mut sum = 0i64;
    for i in 0..config.participant_count {
        let units = if i + 1 == config.participant_count {
            -sum
        } else {
            let units = rng.gen_range(-max..=max);
            sum += units;
            units
        };
        sheet.add(ParticipantBalance::new(
            format!("P-{:04}", i),
            money::from_minor_units(units, config.scale),
        ));
    }
    sheet
}

//! Hidden weakness multiset generation.
//!
//! A target agent's weaknesses are an ordered multiset of sensor
//! categories with length equal to the rank's required match count.
//! Two strategies exist:
//!
//! - **Random**: independent uniform draws, duplicates allowed. Used for
//!   the baseline rank.
//! - **Balanced**: variety-first. For small counts every drawn category is
//!   distinct; for counts above the category space, one of each category
//!   is placed before random fill introduces duplicates. Higher ranks use
//!   this so their weakness sets are rich without biasing any category.
//!
//! All generation is parameterized over the caller's RNG so sessions can
//! be seeded deterministically for tests.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::debug;

use dragnet_types::SensorCategory;

/// Draw one category uniformly from the full category set.
fn random_category(rng: &mut impl Rng) -> SensorCategory {
    // `ALL` is a non-empty const array, so `choose` cannot return `None`;
    // the fallback keeps the function total without a panic path.
    SensorCategory::ALL
        .choose(rng)
        .copied()
        .unwrap_or(SensorCategory::Audio)
}

/// Generate `count` independent uniform draws (duplicates allowed).
///
/// A `count` of zero yields an empty multiset; that boundary is legal and
/// produces no error.
pub fn generate_random(count: usize, rng: &mut impl Rng) -> Vec<SensorCategory> {
    let weaknesses: Vec<SensorCategory> = (0..count).map(|_| random_category(rng)).collect();
    debug!(count, "generated random weakness multiset");
    weaknesses
}

/// Generate a balanced multiset of `count` weaknesses.
///
/// With `ensure_variety` set:
///
/// - `count` at or below the category space: a shuffled subset of the
///   categories, each appearing at most once.
/// - `count` above it: one of each category in shuffled order, the
///   remainder filled with uniform draws, then the whole list shuffled so
///   the guaranteed singles and the duplicates interleave.
///
/// Without `ensure_variety`, falls back to [`generate_random`].
pub fn generate_balanced(
    count: usize,
    ensure_variety: bool,
    rng: &mut impl Rng,
) -> Vec<SensorCategory> {
    if !ensure_variety {
        return generate_random(count, rng);
    }

    let mut weaknesses = SensorCategory::ALL.to_vec();
    weaknesses.shuffle(rng);

    if count <= weaknesses.len() {
        weaknesses.truncate(count);
        debug!(count, "generated variety-first weakness multiset");
        return weaknesses;
    }

    while weaknesses.len() < count {
        weaknesses.push(random_category(rng));
    }
    weaknesses.shuffle(rng);
    debug!(count, "generated balanced weakness multiset with duplicates");
    weaknesses
}

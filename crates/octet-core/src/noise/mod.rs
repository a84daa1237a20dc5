pub mod fbm;
pub mod params;
pub mod permutation;
pub mod simplex;

use permutation::PermutationTable;
use simplex::SimplexNoise;

/// Build a noise engine from a 256-entry seed table.
///
/// Repeated calls with the same table produce identical engines.
pub fn initialize(seed_table: &[u8; 256]) -> SimplexNoise {
    SimplexNoise::with_table(PermutationTable::new(seed_table))
}

/// Simplex noise at `(x, y)` over the reference table.
pub fn sample(x: f64, y: f64) -> f64 {
    SimplexNoise::new().sample(x, y)
}

/// fBM over the reference table. See [`fbm::Fbm`].
///
/// Never fails: `octaves` is clamped to `1..=`[`params::MAX_OCTAVES`] and
/// `persistence` to `[0, 1]`.
#[allow(clippy::too_many_arguments)]
pub fn fbm(octaves: u32, x: f64, y: f64, persistence: f64, scale: f64, low: f64, high: f64) -> f64 {
    SimplexNoise::new().fbm(octaves, x, y, persistence, scale, low, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use permutation::REFERENCE_SEED;

    #[test]
    fn initialize_with_reference_seed_matches_default() {
        let engine = initialize(&REFERENCE_SEED);
        for k in 0..50 {
            let (x, y) = (k as f64 * 0.61 - 7.0, k as f64 * 0.29 + 2.0);
            assert_eq!(engine.sample(x, y), sample(x, y));
        }
    }

    #[test]
    fn free_fbm_clamps_instead_of_diverging() {
        let negative = fbm(2, 10.0, 20.0, -1.0, 0.08, 0.0, 255.0);
        assert!(negative.is_finite());
        assert_eq!(negative, fbm(2, 10.0, 20.0, 0.0, 0.08, 0.0, 255.0));

        let deep = fbm(80, 10.0, 20.0, 0.5, 0.08, 0.0, 255.0);
        assert!((0.0..=255.0).contains(&deep), "{deep}");
    }

    #[test]
    fn free_fbm_uses_reference_table() {
        let a = fbm(8, 12.0, 3.0, 0.5, 0.05, 0.0, 255.0);
        let b = SimplexNoise::new().fbm(8, 12.0, 3.0, 0.5, 0.05, 0.0, 255.0);
        assert_eq!(a, b);
    }
}

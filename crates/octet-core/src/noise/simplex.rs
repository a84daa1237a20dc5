//! Reference 2D simplex noise.
//!
//! Skew the input onto the simplex grid, find the containing triangle, sum
//! the radially attenuated gradient contributions of its three corners and
//! scale the sum by 70 so the result sits in roughly [-1, 1].
use std::borrow::Cow;

use noise::NoiseFn;

use super::fbm::Fbm;
use super::params::{FbmParams, MAX_OCTAVES};
use super::permutation::{PermutationTable, GRADIENTS};

/// Skew factor 0.5·(√3 − 1).
const F2: f64 = 0.366_025_403_784_438_6;
/// Unskew factor (3 − √3) / 6.
const G2: f64 = 0.211_324_865_405_187_13;
/// Brings the corner sum into approximately [-1, 1].
const OUTPUT_SCALE: f64 = 70.0;

#[derive(Debug, Clone)]
pub struct SimplexNoise {
    table: Cow<'static, PermutationTable>,
}

impl SimplexNoise {
    /// Noise over the built-in reference table.
    pub fn new() -> Self {
        Self { table: Cow::Borrowed(PermutationTable::reference()) }
    }

    pub fn with_table(table: PermutationTable) -> Self {
        Self { table: Cow::Owned(table) }
    }

    /// Noise over a table shuffled from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_table(PermutationTable::from_seed(seed))
    }

    pub fn table(&self) -> &PermutationTable {
        &self.table
    }

    /// Sample noise at `(x, y)`. Pure; the same input always gives the same
    /// output for a given table.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        // Which skewed cell holds the point. Cell coordinates stay in f64 so
        // huge inputs cannot overflow integer math.
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();

        // Cell origin back in (x, y) space, and the offset from it.
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Lower triangle (0,0)->(1,0)->(1,1) or upper (0,0)->(0,1)->(1,1).
        let (i1, j1) = if x0 > y0 { (1usize, 0usize) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = i.rem_euclid(256.0) as usize;
        let jj = j.rem_euclid(256.0) as usize;
        let table = &*self.table;
        let gi0 = table.gradient_index(ii + table.perm(jj));
        let gi1 = table.gradient_index(ii + i1 + table.perm(jj + j1));
        let gi2 = table.gradient_index(ii + 1 + table.perm(jj + 1));

        let n0 = corner(gi0, x0, y0);
        let n1 = corner(gi1, x1, y1);
        let n2 = corner(gi2, x2, y2);

        OUTPUT_SCALE * (n0 + n1 + n2)
    }

    /// Fractal sum of [`sample`](Self::sample), remapped into `[low, high]`.
    ///
    /// See [`Fbm`] for the octave schedule. Out-of-range arguments are
    /// clamped, never rejected: `octaves` to `1..=`[`MAX_OCTAVES`] and
    /// `persistence` to `[0, 1]`.
    #[allow(clippy::too_many_arguments)]
    pub fn fbm(
        &self,
        octaves: u32,
        x: f64,
        y: f64,
        persistence: f64,
        scale: f64,
        low: f64,
        high: f64,
    ) -> f64 {
        Fbm::new(FbmParams { octaves, persistence, scale, low, high }).sample(self, x, y)
    }
}

impl Default for SimplexNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseFn<f64, 2> for SimplexNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

/// Contribution of one corner at offset `(dx, dy)`; zero outside the
/// falloff radius.
#[inline]
fn corner(gradient: usize, dx: f64, dy: f64) -> f64 {
    let mut t = 0.5 - dx * dx - dy * dy;
    if t < 0.0 {
        return 0.0;
    }
    t *= t;
    let g = &GRADIENTS[gradient];
    t * t * (g[0] * dx + g[1] * dy)
}

//! Permutation and gradient tables for simplex noise.
//!
//! The 256-entry seed is doubled to 512 entries so corner hashing never has
//! to wrap indices, and a parallel `mod 12` table maps each entry straight to
//! a gradient index.
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Ken Perlin's reference permutation.
pub const REFERENCE_SEED: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252,
    219, 203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168,
    68, 175, 74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211,
    133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80,
    73, 209, 76, 132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100,
    109, 198, 173, 186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82,
    85, 212, 207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248,
    152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98,
    108, 110, 79, 113, 224, 232, 178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238,
    210, 144, 12, 191, 179, 162, 241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31,
    181, 199, 106, 157, 184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205,
    93, 222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// The 12 edge-midpoint gradients of a cube. 2D sampling reads x and y only.
pub const GRADIENTS: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

static REFERENCE: PermutationTable = PermutationTable::new(&REFERENCE_SEED);

#[derive(Clone, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; 512],
    perm_mod12: [u8; 512],
}

impl PermutationTable {
    /// Build the doubled tables from a 256-entry seed.
    ///
    /// Pure and idempotent: the same seed always yields the same table.
    /// The seed is expected to be a permutation of `0..=255`; any byte table
    /// works, but a non-permutation biases the gradient distribution.
    pub const fn new(seed: &[u8; 256]) -> Self {
        let mut perm = [0u8; 512];
        let mut perm_mod12 = [0u8; 512];
        let mut i = 0;
        while i < 512 {
            perm[i] = seed[i & 255];
            perm_mod12[i] = perm[i] % 12;
            i += 1;
        }
        Self { perm, perm_mod12 }
    }

    /// The built-in table every default [`SimplexNoise`](super::simplex::SimplexNoise) uses.
    pub fn reference() -> &'static Self {
        &REFERENCE
    }

    /// A shuffled identity permutation, reproducible for a given `seed`.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }
        table.shuffle(&mut rng);
        Self::new(&table)
    }

    #[inline]
    pub fn perm(&self, index: usize) -> usize {
        self.perm[index] as usize
    }

    /// Gradient index (`0..12`) for a hashed corner.
    #[inline]
    pub fn gradient_index(&self, index: usize) -> usize {
        self.perm_mod12[index] as usize
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        REFERENCE.clone()
    }
}

impl std::fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermutationTable")
            .field("head", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}

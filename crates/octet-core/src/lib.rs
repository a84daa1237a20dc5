//! Procedural generation core for the Octet demos.
//!
//! Two independent engines:
//!
//! * [`grammar`]: an L-system rewriter loaded from the CSV grammar format,
//!   with undo history, presets and turtle interpretation.
//! * [`noise`]: reference 2D simplex noise and fractal Brownian motion,
//!   consumed by [`terrain`] to carve an occupancy grid.
//!
//! Both only produce data; drawing it is the host's job.

pub mod error;
pub mod grammar;
pub mod heightfield;
pub mod noise;
pub mod terrain;

pub use error::{GrammarError, ParamsError};
pub use grammar::{GrammarEngine, GrammarSpec, Preset, StepOutcome};
pub use heightfield::{HeightField, OccupancyGrid};
pub use noise::{fbm::Fbm, params::FbmParams, permutation::PermutationTable, simplex::SimplexNoise};
pub use terrain::{Adjustment, Terrain, TerrainGenerator, TerrainParams};

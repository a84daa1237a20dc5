//! Cave terrain: an fBM height line caps each column and an fBM luminance
//! field carves holes below it.
//!
//! Pipeline:
//!   1. Height line: fBM along one row of the noise plane gives the surface
//!      height for every column.
//!   2. Luminance: fBM at every cell, remapped to 0-255.
//!   3. Occupancy: a cell is solid when it is under the surface and its
//!      luminance reaches the threshold.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParamsError;
use crate::heightfield::{HeightField, OccupancyGrid};
use crate::noise::fbm::Fbm;
use crate::noise::params::FbmParams;
pub use crate::noise::params::MAX_OCTAVES;
use crate::noise::simplex::SimplexNoise;

pub const OCTAVE_STEP: u32 = 1;
pub const THRESHOLD_STEP: u8 = 10;
pub const SCALE_STEP: f64 = 0.01;
pub const PERSISTENCE_STEP: f64 = 0.1;

/// Upper bound of the luminance field.
const LUMINANCE_MAX: f64 = 255.0;

/// Terrain settings. Defaults are the values the terrain demo starts with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub width: usize,
    pub height: usize,
    /// Octaves for both the luminance field and the height line.
    pub octaves: u32,
    pub persistence: f64,
    pub scale: f64,
    /// Minimum luminance (0-255) of a solid cell.
    pub luminance_threshold: u8,
    pub height_line_persistence: f64,
    pub height_line_scale: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            octaves: 16,
            persistence: 0.5,
            scale: 0.08,
            luminance_threshold: 128,
            height_line_persistence: 0.5,
            height_line_scale: 0.007,
        }
    }
}

impl TerrainParams {
    /// Parse and validate a JSON parameter set. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.width == 0 || self.height == 0 {
            return Err(ParamsError::EmptyGrid);
        }
        self.luminance_params().validate()?;
        self.height_line_params().validate()
    }

    pub fn luminance_params(&self) -> FbmParams {
        FbmParams {
            octaves: self.octaves,
            persistence: self.persistence,
            scale: self.scale,
            low: 0.0,
            high: LUMINANCE_MAX,
        }
    }

    /// Height line output spans the grid rows.
    pub fn height_line_params(&self) -> FbmParams {
        FbmParams {
            octaves: self.octaves,
            persistence: self.height_line_persistence,
            scale: self.height_line_scale,
            low: 0.0,
            high: (self.height as f64 - 1.0).max(1.0),
        }
    }

    /// Apply one tuning step, clamped to valid ranges. Returns whether any
    /// value changed.
    pub fn apply(&mut self, adjustment: Adjustment) -> bool {
        let before = self.clone();
        match adjustment {
            Adjustment::MoreOctaves => {
                self.octaves = (self.octaves + OCTAVE_STEP).min(MAX_OCTAVES);
            }
            Adjustment::FewerOctaves => {
                self.octaves = self.octaves.saturating_sub(OCTAVE_STEP).max(1);
            }
            Adjustment::RaiseThreshold => {
                self.luminance_threshold = self.luminance_threshold.saturating_add(THRESHOLD_STEP);
            }
            Adjustment::LowerThreshold => {
                self.luminance_threshold = self.luminance_threshold.saturating_sub(THRESHOLD_STEP);
            }
            Adjustment::IncreaseScale => {
                self.scale = round_step(self.scale + SCALE_STEP);
            }
            Adjustment::DecreaseScale => {
                self.scale = round_step(self.scale - SCALE_STEP).max(SCALE_STEP);
            }
            Adjustment::IncreasePersistence => {
                self.persistence = round_step(self.persistence + PERSISTENCE_STEP).min(1.0);
            }
            Adjustment::DecreasePersistence => {
                self.persistence = round_step(self.persistence - PERSISTENCE_STEP).max(0.0);
            }
        }
        *self != before
    }
}

/// Round to two decimals so repeated steps don't accumulate drift.
fn round_step(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// One tuning step, mirroring the terrain demo's F1-F8 keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Adjustment {
    MoreOctaves,
    FewerOctaves,
    RaiseThreshold,
    LowerThreshold,
    IncreaseScale,
    DecreaseScale,
    IncreasePersistence,
    DecreasePersistence,
}

/// Output of one generation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    /// Noise-plane row the height line was sampled from.
    pub row: u32,
    /// Surface height per column.
    pub height_line: Vec<f32>,
    pub luminance: HeightField,
    pub occupancy: OccupancyGrid,
}

#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    noise: SimplexNoise,
    params: TerrainParams,
}

impl TerrainGenerator {
    /// Generator over the reference noise table.
    pub fn new(params: TerrainParams) -> Result<Self, ParamsError> {
        Self::with_noise(SimplexNoise::new(), params)
    }

    pub fn with_noise(noise: SimplexNoise, params: TerrainParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { noise, params })
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    pub fn set_params(&mut self, params: TerrainParams) -> Result<(), ParamsError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Apply a tuning step. Adjustments are clamped, so the result stays valid.
    pub fn adjust(&mut self, adjustment: Adjustment) -> bool {
        self.params.apply(adjustment)
    }

    /// Pick a height-line row with the caller's RNG.
    pub fn random_height_row<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(0..self.params.height as u32)
    }

    /// Surface height for every column, sampled along noise row `row`.
    pub fn height_line(&self, row: u32) -> Vec<f32> {
        let fbm = Fbm::new(self.params.height_line_params());
        (0..self.params.width)
            .map(|x| fbm.sample(&self.noise, row as f64, x as f64) as f32)
            .collect()
    }

    /// Luminance (0-255) for every cell.
    pub fn luminance(&self) -> HeightField {
        let fbm = Fbm::new(self.params.luminance_params());
        let (width, height) = (self.params.width, self.params.height);

        #[cfg(feature = "threading")]
        {
            use rayon::prelude::*;
            let data: Vec<f32> = (0..height)
                .into_par_iter()
                .flat_map_iter(|y| {
                    (0..width).map(move |x| fbm.sample(&self.noise, x as f64, y as f64) as f32)
                })
                .collect();
            HeightField { data, width, height }
        }

        #[cfg(not(feature = "threading"))]
        {
            HeightField::from_fn(width, height, |x, y| {
                fbm.sample(&self.noise, x as f64, y as f64) as f32
            })
        }
    }

    /// Cell `(x, y)` is solid iff `y <= height_line[x]` and its luminance
    /// reaches the threshold.
    ///
    /// # Panics
    /// If `height_line` is shorter than the luminance field is wide.
    pub fn occupancy(&self, height_line: &[f32], luminance: &HeightField) -> OccupancyGrid {
        assert!(
            height_line.len() >= luminance.width,
            "height line has {} columns, field has {}",
            height_line.len(),
            luminance.width
        );
        let mut grid = luminance.threshold(self.params.luminance_threshold as f32);
        for y in 0..grid.height {
            for x in 0..grid.width {
                if y as f32 > height_line[x] {
                    grid.set_solid(x, y, false);
                }
            }
        }
        grid
    }

    pub fn generate(&self, row: u32) -> Terrain {
        let height_line = self.height_line(row);
        let luminance = self.luminance();
        let occupancy = self.occupancy(&height_line, &luminance);
        debug!(
            row,
            width = self.params.width,
            height = self.params.height,
            octaves = self.params.octaves,
            solid = occupancy.solid_fraction(),
            "generated terrain"
        );
        Terrain { row, height_line, luminance, occupancy }
    }
}

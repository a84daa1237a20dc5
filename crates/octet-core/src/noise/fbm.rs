//! Fractal Brownian motion.
//!
//! Octave `k` samples the source at frequency `scale · 2^k` with amplitude
//! `persistence^k`. The sum is divided by the total amplitude, so the result
//! is a weighted average of samples rather than a raw sum, then remapped from
//! [-1, 1] into `[low, high]`.
//!
//! Sampling never fails. Out-of-range parameters are clamped: `octaves` to
//! `1..=MAX_OCTAVES`, `persistence` to `[0, 1]` (NaN counts as 0). `low` and
//! `high` are used as given, so `low > high` flips the output. Use
//! [`FbmParams::validate`] to reject such values up front instead.
use noise::NoiseFn;

use super::params::{FbmParams, MAX_OCTAVES};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fbm {
    pub params: FbmParams,
}

impl Fbm {
    pub fn new(params: FbmParams) -> Self {
        Self { params }
    }

    /// Evaluate at `(x, y)` over any 2D noise source, clamping parameters as
    /// described in the module docs. With `persistence == 0` only octave 0
    /// contributes.
    pub fn sample<N: NoiseFn<f64, 2> + ?Sized>(&self, source: &N, x: f64, y: f64) -> f64 {
        let p = &self.params;
        let octaves = p.octaves.clamp(1, MAX_OCTAVES);
        // `max` discards NaN.
        let persistence = p.persistence.max(0.0).min(1.0);
        let mut amplitude = 1.0f64;
        let mut total_amplitude = 0.0f64;
        let mut frequency = p.scale;
        let mut value = 0.0f64;

        for _ in 0..octaves {
            value += source.get([x * frequency, y * frequency]) * amplitude;
            total_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        value /= total_amplitude;
        value * (p.high - p.low) / 2.0 + (p.high + p.low) / 2.0
    }

    /// Bind to a source so the pair can be used as a [`NoiseFn`].
    pub fn over<N>(self, source: N) -> FbmSource<N> {
        FbmSource { fbm: self, source }
    }
}

/// An [`Fbm`] bound to its noise source.
#[derive(Debug, Clone)]
pub struct FbmSource<N> {
    pub fbm: Fbm,
    pub source: N,
}

impl<N: NoiseFn<f64, 2>> NoiseFn<f64, 2> for FbmSource<N> {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.fbm.sample(&self.source, point[0], point[1])
    }
}

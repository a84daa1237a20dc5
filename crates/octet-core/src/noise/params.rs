use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

/// Most octaves a configuration may ask for.
pub const MAX_OCTAVES: u32 = 32;

/// Octave schedule and output range for fractal Brownian motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FbmParams {
    /// Number of octaves summed, `1..=MAX_OCTAVES`.
    pub octaves: u32,
    /// Amplitude decay per octave, 0-1.
    pub persistence: f64,
    /// Spatial frequency of octave 0; doubles each octave.
    pub scale: f64,
    /// Output lower bound.
    pub low: f64,
    /// Output upper bound.
    pub high: f64,
}

impl FbmParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.octaves == 0 {
            return Err(ParamsError::ZeroOctaves);
        }
        if self.octaves > MAX_OCTAVES {
            return Err(ParamsError::TooManyOctaves { octaves: self.octaves, max: MAX_OCTAVES });
        }
        if !(0.0..=1.0).contains(&self.persistence) {
            return Err(ParamsError::Persistence(self.persistence));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ParamsError::Scale(self.scale));
        }
        if !(self.low < self.high) {
            return Err(ParamsError::EmptyRange { low: self.low, high: self.high });
        }
        Ok(())
    }
}

/// Cave-noise settings of the terrain demo: 16 octaves into luminance 0-255.
impl Default for FbmParams {
    fn default() -> Self {
        Self {
            octaves: 16,
            persistence: 0.5,
            scale: 0.08,
            low: 0.0,
            high: 255.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(FbmParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let base = FbmParams::default();
        assert!(matches!(
            FbmParams { octaves: 0, ..base }.validate(),
            Err(ParamsError::ZeroOctaves)
        ));
        assert!(matches!(
            FbmParams { octaves: MAX_OCTAVES + 1, ..base }.validate(),
            Err(ParamsError::TooManyOctaves { octaves: 33, max: 32 })
        ));
        assert!(FbmParams { octaves: MAX_OCTAVES, ..base }.validate().is_ok());
        assert!(matches!(
            FbmParams { persistence: 1.5, ..base }.validate(),
            Err(ParamsError::Persistence(_))
        ));
        assert!(matches!(
            FbmParams { scale: 0.0, ..base }.validate(),
            Err(ParamsError::Scale(_))
        ));
        assert!(matches!(
            FbmParams { low: 10.0, high: 10.0, ..base }.validate(),
            Err(ParamsError::EmptyRange { .. })
        ));
    }

    #[test]
    fn missing_json_fields_take_defaults() {
        let p: FbmParams = serde_json::from_str(r#"{ "octaves": 4 }"#).unwrap();
        assert_eq!(p.octaves, 4);
        assert_eq!(p.scale, 0.08);
    }
}

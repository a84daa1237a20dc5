//! Built-in grammars in the CSV source format.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parser::{parse_grammar, GrammarSpec};
use crate::error::GrammarError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Lindenmayer's algae: A -> AB, B -> A.
    Algae,
    /// Quadratic Koch curve.
    Koch,
    Sierpinski,
    Dragon,
    /// Fractal plant with nested branches.
    Plant,
    Bush,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Algae,
        Preset::Koch,
        Preset::Sierpinski,
        Preset::Dragon,
        Preset::Plant,
        Preset::Bush,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Algae => "algae",
            Preset::Koch => "koch",
            Preset::Sierpinski => "sierpinski",
            Preset::Dragon => "dragon",
            Preset::Plant => "plant",
            Preset::Bush => "bush",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, GrammarError> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| GrammarError::UnknownPreset(name.to_string()))
    }

    /// The preset's CSV source text.
    pub fn source(self) -> &'static str {
        match self {
            Preset::Algae => include_str!("../../data/grammars/algae.csv"),
            Preset::Koch => include_str!("../../data/grammars/koch.csv"),
            Preset::Sierpinski => include_str!("../../data/grammars/sierpinski.csv"),
            Preset::Dragon => include_str!("../../data/grammars/dragon.csv"),
            Preset::Plant => include_str!("../../data/grammars/plant.csv"),
            Preset::Bush => include_str!("../../data/grammars/bush.csv"),
        }
    }

    pub fn spec(self) -> Result<GrammarSpec, GrammarError> {
        parse_grammar(self.source())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_parses() {
        for preset in Preset::ALL {
            let spec = preset.spec().unwrap_or_else(|e| panic!("{preset}: {e}"));
            assert!(!spec.rules.is_empty(), "{preset} has no rules");
            assert!(spec.max_iterations > 0);
        }
    }

    #[test]
    fn names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert_eq!(Preset::from_name(" Koch ").unwrap(), Preset::Koch);
        assert!(matches!(Preset::from_name("fern"), Err(GrammarError::UnknownPreset(_))));
    }

    #[test]
    fn bush_angle_is_fractional() {
        assert_eq!(Preset::Bush.spec().unwrap().angle, 22.5);
    }
}

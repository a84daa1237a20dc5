//! L-system grammar engine.
//!
//! [`LSystem`] owns one loaded grammar: the current axiom and the stack of
//! axioms it replaced, so every forward step can be undone. [`GrammarEngine`]
//! is the reusable holder that loads, resets and switches between grammars.
pub mod parser;
pub mod presets;
pub mod turtle;

use std::io::Read;
use std::mem;
use std::path::Path;

use tracing::{debug, trace};

use crate::error::GrammarError;

pub use parser::{parse_grammar, Alphabet, GrammarSpec, RuleTable};
pub use presets::Preset;

/// Result of a forward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced,
    /// `max_iterations` reached; nothing changed.
    LimitReached,
}

#[derive(Debug, Clone)]
pub struct LSystem {
    spec: GrammarSpec,
    axiom: String,
    /// Axioms replaced by forward steps, oldest first. Its length is the
    /// current iteration.
    history: Vec<String>,
    angle: f32,
}

impl LSystem {
    pub fn new(spec: GrammarSpec) -> Self {
        Self {
            axiom: spec.axiom.clone(),
            angle: spec.angle,
            history: Vec::new(),
            spec,
        }
    }

    /// The grammar as loaded, including the initial axiom.
    pub fn spec(&self) -> &GrammarSpec {
        &self.spec
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.spec.alphabet
    }

    pub fn rules(&self) -> &RuleTable {
        &self.spec.rules
    }

    pub fn current_axiom(&self) -> &str {
        &self.axiom
    }

    pub fn iteration(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn max_iterations(&self) -> u32 {
        self.spec.max_iterations
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Change the turn increment. Only affects how callers interpret axioms;
    /// the axiom itself is untouched.
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    pub fn adjust_angle(&mut self, delta: f32) -> f32 {
        self.angle += delta;
        self.angle
    }

    /// Rewrite the axiom once, remembering the previous one.
    pub fn step_forward(&mut self) -> StepOutcome {
        if self.iteration() >= self.spec.max_iterations {
            return StepOutcome::LimitReached;
        }
        let next = self.spec.rules.rewrite(&self.axiom);
        self.history.push(mem::replace(&mut self.axiom, next));
        trace!(iteration = self.iteration(), len = self.axiom.len(), "stepped forward");
        StepOutcome::Advanced
    }

    /// Restore the axiom from before the last forward step.
    pub fn step_backward(&mut self) -> Result<(), GrammarError> {
        let previous = self.history.pop().ok_or(GrammarError::NoHistory)?;
        self.axiom = previous;
        trace!(iteration = self.iteration(), len = self.axiom.len(), "stepped backward");
        Ok(())
    }

    /// Step until `iteration() == target`, capped at `max_iterations`.
    /// Returns the iteration reached.
    pub fn seek(&mut self, target: u32) -> u32 {
        let target = target.min(self.spec.max_iterations);
        while self.iteration() > target {
            if self.step_backward().is_err() {
                break;
            }
        }
        while self.iteration() < target {
            if self.step_forward() == StepOutcome::LimitReached {
                break;
            }
        }
        self.iteration()
    }
}

/// Reusable grammar holder. Empty until a load succeeds.
#[derive(Debug, Clone, Default)]
pub struct GrammarEngine {
    system: Option<LSystem>,
}

impl GrammarEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and install a grammar. On failure the engine is left empty.
    pub fn load(&mut self, source: &str) -> Result<&mut LSystem, GrammarError> {
        self.install(parse_grammar(source))
    }

    pub fn load_reader<R: Read>(&mut self, reader: R) -> Result<&mut LSystem, GrammarError> {
        self.install(GrammarSpec::from_reader(reader))
    }

    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut LSystem, GrammarError> {
        self.install(GrammarSpec::from_path(path))
    }

    pub fn load_preset(&mut self, preset: Preset) -> Result<&mut LSystem, GrammarError> {
        self.install(preset.spec())
    }

    pub fn load_spec(&mut self, spec: GrammarSpec) -> &mut LSystem {
        debug!(axiom = %spec.axiom, rules = spec.rules.len(), "loaded grammar");
        self.system.insert(LSystem::new(spec))
    }

    fn install(&mut self, spec: Result<GrammarSpec, GrammarError>) -> Result<&mut LSystem, GrammarError> {
        match spec {
            Ok(spec) => Ok(self.load_spec(spec)),
            Err(e) => {
                self.system = None;
                Err(e)
            }
        }
    }

    /// Drop the loaded grammar; the engine can load another.
    pub fn reset(&mut self) {
        if self.system.take().is_some() {
            debug!("grammar reset");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.system.is_some()
    }

    pub fn system(&self) -> Option<&LSystem> {
        self.system.as_ref()
    }

    pub fn system_mut(&mut self) -> Option<&mut LSystem> {
        self.system.as_mut()
    }

    fn loaded_mut(&mut self) -> Result<&mut LSystem, GrammarError> {
        self.system.as_mut().ok_or(GrammarError::NotLoaded)
    }

    pub fn step_forward(&mut self) -> Result<StepOutcome, GrammarError> {
        Ok(self.loaded_mut()?.step_forward())
    }

    pub fn step_backward(&mut self) -> Result<(), GrammarError> {
        self.loaded_mut()?.step_backward()
    }

    pub fn seek(&mut self, target: u32) -> Result<u32, GrammarError> {
        Ok(self.loaded_mut()?.seek(target))
    }

    /// Current axiom, or `None` when nothing is loaded.
    pub fn current_axiom(&self) -> Option<&str> {
        self.system.as_ref().map(LSystem::current_axiom)
    }

    pub fn iteration(&self) -> u32 {
        self.system.as_ref().map_or(0, LSystem::iteration)
    }

    pub fn angle(&self) -> Option<f32> {
        self.system.as_ref().map(LSystem::angle)
    }

    pub fn set_angle(&mut self, angle: f32) -> Result<(), GrammarError> {
        self.loaded_mut()?.set_angle(angle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALGAE: &str = "Variables\nA,B,\nAxiom\nA,\nRules\nA->AB,B->A,\nAngle\n0,\nIterations\n5,\n";

    fn algae() -> LSystem {
        LSystem::new(parse_grammar(ALGAE).unwrap())
    }

    #[test]
    fn algae_grows_like_fibonacci() {
        let mut sys = algae();
        let expected = ["AB", "ABA", "ABAAB", "ABAABABA", "ABAABABAABAAB"];
        for want in expected {
            assert_eq!(sys.step_forward(), StepOutcome::Advanced);
            assert_eq!(sys.current_axiom(), want);
        }
        assert_eq!(sys.iteration(), 5);
    }

    #[test]
    fn forward_stops_at_limit_without_changing_state() {
        let mut sys = algae();
        sys.seek(5);
        let before = sys.current_axiom().to_string();
        assert_eq!(sys.step_forward(), StepOutcome::LimitReached);
        assert_eq!(sys.current_axiom(), before);
        assert_eq!(sys.iteration(), 5);
    }

    #[test]
    fn backward_on_empty_history_is_an_error() {
        let mut sys = algae();
        assert!(matches!(sys.step_backward(), Err(GrammarError::NoHistory)));
        assert_eq!(sys.current_axiom(), "A");
    }

    #[test]
    fn seek_moves_both_ways_and_clamps() {
        let mut sys = algae();
        assert_eq!(sys.seek(3), 3);
        assert_eq!(sys.current_axiom(), "ABAAB");
        assert_eq!(sys.seek(1), 1);
        assert_eq!(sys.current_axiom(), "AB");
        assert_eq!(sys.seek(99), 5);
    }

    #[test]
    fn angle_changes_leave_axiom_alone() {
        let mut sys = algae();
        sys.step_forward();
        sys.set_angle(30.0);
        assert_eq!(sys.adjust_angle(-5.0), 25.0);
        assert_eq!(sys.current_axiom(), "AB");
        assert_eq!(sys.spec().angle, 0.0);
    }

    #[test]
    fn empty_engine_reports_not_loaded() {
        let mut engine = GrammarEngine::new();
        assert!(matches!(engine.step_forward(), Err(GrammarError::NotLoaded)));
        assert!(matches!(engine.step_backward(), Err(GrammarError::NotLoaded)));
        assert!(matches!(engine.set_angle(1.0), Err(GrammarError::NotLoaded)));
        assert_eq!(engine.current_axiom(), None);
        assert_eq!(engine.angle(), None);
    }

    #[test]
    fn failed_load_clears_previous_grammar() {
        let mut engine = GrammarEngine::new();
        engine.load(ALGAE).unwrap();
        engine.step_forward().unwrap();
        assert!(engine.load("Variables\nA\n").is_err());
        assert!(!engine.is_loaded());
        assert_eq!(engine.current_axiom(), None);
        assert_eq!(engine.angle(), None);
    }

    #[test]
    fn reset_then_reload() {
        let mut engine = GrammarEngine::new();
        engine.load(ALGAE).unwrap();
        engine.seek(4).unwrap();
        engine.reset();
        assert!(!engine.is_loaded());
        engine.load(ALGAE).unwrap();
        assert_eq!(engine.current_axiom(), Some("A"));
        assert_eq!(engine.iteration(), 0);
    }
}

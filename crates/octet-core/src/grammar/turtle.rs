//! Turtle interpretation of an axiom into 2D line segments.
//!
//! | symbol | action |
//! |---|---|
//! | draw symbols (`F`, `G` by default) | move forward, emitting a segment |
//! | `f` | move forward without drawing |
//! | `+` / `-` | turn left / right by the angle |
//! | `\|` | turn around |
//! | `[` / `]` | push / pop position and heading |
//!
//! Anything else is ignored, so variables like `X` only steer growth.
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::LSystem;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    /// Branch nesting depth when the segment was drawn.
    pub depth: usize,
}

/// Receives segments as the turtle draws them.
pub trait SegmentSink {
    fn add_segment(&mut self, segment: Segment);
}

impl SegmentSink for Vec<Segment> {
    fn add_segment(&mut self, segment: Segment) {
        self.push(segment);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Turn increment in degrees.
    pub angle: f32,
    /// Distance moved per step.
    pub step: f32,
    /// Initial heading in degrees, counter-clockwise from +x.
    pub heading: f32,
    pub draw_symbols: Vec<char>,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self { angle: 25.0, step: 1.0, heading: 90.0, draw_symbols: vec!['F', 'G'] }
    }
}

impl TurtleConfig {
    /// Default config turning by the system's current angle.
    pub fn for_system(system: &LSystem) -> Self {
        Self { angle: system.angle(), ..Self::default() }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct State {
    pos: Point,
    heading: f32,
}

/// Interpret `axiom` and collect the segments.
pub fn interpret(axiom: &str, config: &TurtleConfig) -> Vec<Segment> {
    let mut segments = Vec::new();
    interpret_into(axiom, config, &mut segments);
    segments
}

/// Interpret `axiom`, handing each segment to `sink`.
///
/// An unmatched `]` is skipped.
pub fn interpret_into<S: SegmentSink + ?Sized>(axiom: &str, config: &TurtleConfig, sink: &mut S) {
    let turn = config.angle.to_radians();
    let mut state = State { pos: Point::default(), heading: config.heading.to_radians() };
    let mut stack: Vec<State> = Vec::new();
    let mut unmatched = 0usize;

    for symbol in axiom.chars() {
        match symbol {
            '+' => state.heading += turn,
            '-' => state.heading -= turn,
            '|' => state.heading += std::f32::consts::PI,
            '[' => stack.push(state),
            ']' => match stack.pop() {
                Some(saved) => state = saved,
                None => unmatched += 1,
            },
            'f' => state.pos = advance(state, config.step),
            s if config.draw_symbols.contains(&s) => {
                let end = advance(state, config.step);
                sink.add_segment(Segment { start: state.pos, end, depth: stack.len() });
                state.pos = end;
            }
            _ => {}
        }
    }

    if unmatched > 0 {
        warn!(unmatched, "axiom pops more branches than it pushes");
    }
}

fn advance(state: State, step: f32) -> Point {
    Point::new(
        state.pos.x + step * state.heading.cos(),
        state.pos.y + step * state.heading.sin(),
    )
}

/// Axis-aligned extent of a drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// `None` for an empty drawing.
    pub fn of(segments: &[Segment]) -> Option<Self> {
        let first = segments.first()?;
        let mut bounds = Bounds { min: first.start, max: first.start };
        for seg in segments {
            for p in [seg.start, seg.end] {
                bounds.min.x = bounds.min.x.min(p.x);
                bounds.min.y = bounds.min.y.min(p.y);
                bounds.max.x = bounds.max.x.max(p.x);
                bounds.max.y = bounds.max.y.max(p.y);
            }
        }
        Some(bounds)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn right_angles() -> TurtleConfig {
        TurtleConfig::default().with_angle(90.0)
    }

    fn assert_point(p: Point, x: f32, y: f32) {
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-5);
    }

    #[test]
    fn koch_step_traces_expected_path() {
        let segs = interpret("F+F-F-F+F", &right_angles());
        assert_eq!(segs.len(), 5);
        assert_point(segs[0].start, 0.0, 0.0);
        assert_point(segs[0].end, 0.0, 1.0);
        assert_point(segs[1].end, -1.0, 1.0);
        assert_point(segs[4].end, 0.0, 3.0);

        let b = Bounds::of(&segs).unwrap();
        assert_point(b.min, -1.0, 0.0);
        assert_point(b.max, 0.0, 3.0);
        assert_abs_diff_eq!(b.height(), 3.0, epsilon = 1e-5);
    }

    #[test]
    fn branches_restore_position_and_heading() {
        let segs = interpret("F[+F]F", &right_angles());
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[1].depth, 1);
        assert_point(segs[1].end, -1.0, 1.0);
        assert_point(segs[2].start, 0.0, 1.0);
        assert_point(segs[2].end, 0.0, 2.0);
        assert_eq!(segs[2].depth, 0);
    }

    #[test]
    fn move_without_drawing_and_non_drawing_symbols() {
        let segs = interpret("XfFA", &right_angles());
        assert_eq!(segs.len(), 1);
        assert_point(segs[0].start, 0.0, 1.0);
    }

    #[test]
    fn unmatched_pop_is_ignored() {
        let segs = interpret("F]F", &right_angles());
        assert_eq!(segs.len(), 2);
        assert_point(segs[1].end, 0.0, 2.0);
    }

    #[test]
    fn turn_around_reverses() {
        let segs = interpret("F|F", &right_angles());
        assert_point(segs[1].end, 0.0, 0.0);
    }

    #[test]
    fn config_follows_system_angle() {
        let mut sys = LSystem::new(crate::grammar::Preset::Plant.spec().unwrap());
        sys.set_angle(30.0);
        assert_eq!(TurtleConfig::for_system(&sys).angle, 30.0);
    }

    #[test]
    fn empty_drawing_has_no_bounds() {
        assert!(Bounds::of(&interpret("X+-", &TurtleConfig::default())).is_none());
    }
}

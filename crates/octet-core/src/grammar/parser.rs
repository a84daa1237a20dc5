//! CSV grammar sources.
//!
//! A source is a list of sections, each a header line (ignored) followed by
//! one comma-delimited data line:
//!
//! ```text
//! Variables
//! F,X,
//! Constants          <- optional section
//! +,-,[,],
//! Axiom
//! X,
//! Rules
//! X->F+[[X]-X]-F[-FX]+X,F->FF,
//! Angle
//! 25,
//! Iterations
//! 6,
//! ```
//!
//! Five sections means no constants, six means constants are present. An
//! empty field ends a data line, so trailing commas are harmless.
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GrammarError;

/// Symbols subject to rewriting, and symbols that only pass through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    pub variables: Vec<char>,
    pub constants: Vec<char>,
}

/// Production rules keyed by a single symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: BTreeMap<char, String>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, returning the replacement it displaced.
    pub fn insert(&mut self, symbol: char, replacement: impl Into<String>) -> Option<String> {
        self.rules.insert(symbol, replacement.into())
    }

    pub fn get(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.rules.iter().map(|(&k, v)| (k, v.as_str()))
    }

    /// One parallel rewrite: every symbol with a rule is replaced by its
    /// replacement, every other symbol is copied. Replacements are not
    /// expanded again within the same pass.
    pub fn rewrite(&self, axiom: &str) -> String {
        let mut next = String::with_capacity(axiom.len() * 2);
        for symbol in axiom.chars() {
            match self.rules.get(&symbol) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(symbol),
            }
        }
        next
    }
}

/// Everything a grammar source defines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarSpec {
    pub alphabet: Alphabet,
    /// Initial symbol sequence.
    pub axiom: String,
    pub rules: RuleTable,
    /// Turn increment in degrees.
    pub angle: f32,
    pub max_iterations: u32,
}

impl GrammarSpec {
    pub fn parse(source: &str) -> Result<Self, GrammarError> {
        parse_grammar(source)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, GrammarError> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        parse_grammar(&source)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GrammarError> {
        let source = fs::read_to_string(path.as_ref())?;
        parse_grammar(&source)
    }
}

impl FromStr for GrammarSpec {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_grammar(s)
    }
}

const WITH_CONSTANTS: [&str; 6] =
    ["variables", "constants", "axiom", "rules", "angle", "max iterations"];
const WITHOUT_CONSTANTS: [&str; 5] = ["variables", "axiom", "rules", "angle", "max iterations"];

/// One data line with its 1-based line number.
struct Section<'a> {
    name: &'static str,
    line: usize,
    data: &'a str,
}

impl<'a> Section<'a> {
    fn fields(&self) -> impl Iterator<Item = &'a str> {
        self.data.split(',').map(str::trim).take_while(|f| !f.is_empty())
    }

    fn symbols(&self) -> Result<Vec<char>, GrammarError> {
        self.fields().map(|f| self.symbol(f)).collect()
    }

    fn symbol(&self, field: &str) -> Result<char, GrammarError> {
        let mut chars = field.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(GrammarError::malformed(
                self.line,
                format!("{} entry '{field}' is not a single symbol", self.name),
            )),
        }
    }

    fn first(&self) -> Result<&'a str, GrammarError> {
        self.fields()
            .next()
            .ok_or_else(|| GrammarError::malformed(self.line, format!("{} section is empty", self.name)))
    }
}

/// Parse a grammar source. All-or-nothing: any structural problem yields
/// [`GrammarError::MalformedSource`] and no partial result.
pub fn parse_grammar(source: &str) -> Result<GrammarSpec, GrammarError> {
    let mut lines: Vec<&str> = source.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let names: &[&'static str] = match lines.len().div_ceil(2) {
        6 => &WITH_CONSTANTS,
        5 => &WITHOUT_CONSTANTS,
        n => {
            return Err(GrammarError::malformed(
                lines.len() + 1,
                format!("expected 5 or 6 sections, found {n}"),
            ))
        }
    };
    if lines.len() % 2 == 1 {
        return Err(GrammarError::malformed(
            lines.len(),
            format!("{} section has no data line", names[names.len() - 1]),
        ));
    }

    let section = |i: usize| Section { name: names[i], line: 2 * i + 2, data: lines[2 * i + 1] };
    // Shift of every section after the optional constants.
    let offset = names.len() - WITHOUT_CONSTANTS.len();

    let variables_section = section(0);
    let variables = variables_section.symbols()?;
    if variables.is_empty() {
        return Err(GrammarError::malformed(variables_section.line, "variables section is empty"));
    }

    let constants = if offset == 1 { section(1).symbols()? } else { Vec::new() };

    let axiom_section = section(1 + offset);
    let axiom: String = axiom_section.symbols()?.into_iter().collect();
    if axiom.is_empty() {
        return Err(GrammarError::malformed(axiom_section.line, "axiom section is empty"));
    }

    let rules_section = section(2 + offset);
    let mut rules = RuleTable::new();
    for field in rules_section.fields() {
        let (key, replacement) = field.split_once("->").ok_or_else(|| {
            GrammarError::malformed(rules_section.line, format!("rule '{field}' is missing '->'"))
        })?;
        let mut chars = key.trim().chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(GrammarError::malformed(
                    rules_section.line,
                    format!("rule key '{}' is not a single character", key.trim()),
                ))
            }
        };
        if constants.contains(&symbol) {
            return Err(GrammarError::malformed(
                rules_section.line,
                format!("constant '{symbol}' cannot have a rule"),
            ));
        }
        if rules.insert(symbol, replacement.trim()).is_some() {
            return Err(GrammarError::malformed(
                rules_section.line,
                format!("duplicate rule for '{symbol}'"),
            ));
        }
    }

    let angle_section = section(3 + offset);
    let raw_angle = angle_section.first()?;
    let angle = raw_angle
        .parse::<f32>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| {
            GrammarError::malformed(angle_section.line, format!("angle '{raw_angle}' is not a number"))
        })?;

    let limit_section = section(4 + offset);
    let raw_limit = limit_section.first()?;
    let max_iterations = raw_limit.parse::<u32>().map_err(|_| {
        GrammarError::malformed(
            limit_section.line,
            format!("max iterations '{raw_limit}' is not an unsigned integer"),
        )
    })?;

    debug!(
        variables = variables.len(),
        constants = constants.len(),
        rules = rules.len(),
        angle,
        max_iterations,
        "parsed grammar"
    );

    Ok(GrammarSpec {
        alphabet: Alphabet { variables, constants },
        axiom,
        rules,
        angle,
        max_iterations,
    })
}

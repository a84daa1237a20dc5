//! L-system driver: load a CSV grammar or a built-in preset, iterate it and
//! print the axiom, the full state as JSON, or the turtle drawing.
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use octet_core::grammar::turtle::{self, Bounds, Segment, TurtleConfig};
use octet_core::grammar::{GrammarEngine, GrammarSpec, Preset};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lsystem", about = "Iterate an L-system grammar and print the result")]
struct Args {
    /// CSV grammar file.
    #[arg(short, long, conflicts_with = "preset")]
    grammar: Option<PathBuf>,

    /// Built-in grammar name.
    #[arg(short, long)]
    preset: Option<String>,

    /// Iterations to apply. Defaults to the grammar's maximum.
    #[arg(short = 'n', long)]
    iterations: Option<u32>,

    /// Override the turn angle in degrees.
    #[arg(short, long, allow_negative_numbers = true)]
    angle: Option<f32>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the built-in preset names and exit.
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// The axiom only.
    Text,
    /// Grammar, iteration and axiom.
    Json,
    /// Turtle segments and their bounds.
    Segments,
}

#[derive(Serialize)]
struct Report<'a> {
    grammar: &'a GrammarSpec,
    iteration: u32,
    angle: f32,
    axiom: &'a str,
}

#[derive(Serialize)]
struct Drawing {
    bounds: Option<Bounds>,
    segments: Vec<Segment>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list {
        for preset in Preset::ALL {
            println!("{preset}");
        }
        return Ok(());
    }

    let mut engine = GrammarEngine::new();
    let system = match (&args.grammar, &args.preset) {
        (Some(path), _) => engine
            .load_path(path)
            .with_context(|| format!("loading grammar {}", path.display()))?,
        (None, Some(name)) => engine.load_preset(name.parse()?)?,
        (None, None) => bail!("pass --grammar <FILE> or --preset <NAME> (see --list)"),
    };

    if let Some(angle) = args.angle {
        system.set_angle(angle);
    }

    let wanted = args.iterations.unwrap_or(system.max_iterations());
    let reached = system.seek(wanted);
    if reached < wanted {
        warn!(wanted, reached, "iteration limit reached");
    }
    info!(iteration = reached, symbols = system.current_axiom().len(), "generated");

    match args.format {
        Format::Text => println!("{}", system.current_axiom()),
        Format::Json => {
            let report = Report {
                grammar: system.spec(),
                iteration: system.iteration(),
                angle: system.angle(),
                axiom: system.current_axiom(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Format::Segments => {
            let segments = turtle::interpret(system.current_axiom(), &TurtleConfig::for_system(system));
            let drawing = Drawing { bounds: Bounds::of(&segments), segments };
            println!("{}", serde_json::to_string(&drawing)?);
        }
    }

    Ok(())
}

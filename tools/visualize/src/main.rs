//! Renders the default cave terrain and the plant preset to PNG files in
//! data/debug/ for eyeballing parameter changes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use octet_core::grammar::turtle::{self, Bounds, Segment, TurtleConfig};
use octet_core::{GrammarEngine, Preset, TerrainGenerator, TerrainParams};

const W: usize = 512;
const H: usize = 256;
const LSYSTEM_SIZE: u32 = 512;

// ── Colour helpers ────────────────────────────────────────────────────────────

/// Luminance [0, 255] → grayscale.
fn gray(v: f32) -> [u8; 3] {
    let c = v.clamp(0.0, 255.0) as u8;
    [c, c, c]
}

/// Solid rock is brown, open cave is near-black, sky is pale blue.
fn cell_color(solid: bool, above_surface: bool) -> [u8; 3] {
    match (solid, above_surface) {
        (true, _) => [139, 99, 60],
        (false, false) => [25, 20, 18],
        (false, true) => [190, 215, 240],
    }
}

/// Branch depth → green that darkens toward the tips.
fn branch_color(depth: usize) -> [u8; 3] {
    let d = depth.min(6) as u8;
    [60 - d * 6, 140 - d * 12, 50]
}

fn save(img: &image::RgbImage, out_dir: &Path, name: &str) -> Result<()> {
    let path = out_dir.join(name);
    img.save(&path).with_context(|| format!("failed to save {name}"))?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Plot a segment with a simple DDA walk, skipping pixels off the canvas.
fn draw_segment(img: &mut image::RgbImage, seg: &Segment, bounds: &Bounds) {
    let margin = 8.0;
    let span = bounds.width().max(bounds.height()).max(f32::EPSILON);
    let scale = (LSYSTEM_SIZE as f32 - 2.0 * margin) / span;
    let to_px = |x: f32, y: f32| {
        (
            margin + (x - bounds.min.x) * scale,
            LSYSTEM_SIZE as f32 - margin - (y - bounds.min.y) * scale,
        )
    };
    let (x0, y0) = to_px(seg.start.x, seg.start.y);
    let (x1, y1) = to_px(seg.end.x, seg.end.y);
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as u32;
    let color = image::Rgb(branch_color(seg.depth));
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let (px, py) = (x0 + (x1 - x0) * t, y0 + (y1 - y0) * t);
        if px >= 0.0 && py >= 0.0 && (px as u32) < img.width() && (py as u32) < img.height() {
            img.put_pixel(px as u32, py as u32, color);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let params = TerrainParams { width: W, height: H, ..TerrainParams::default() };
    let generator = TerrainGenerator::new(params)?;

    println!("Generating terrain ({W}×{H})…");
    let terrain = generator.generate(H as u32 / 2);

    let out_dir = Path::new("data/debug");
    fs::create_dir_all(out_dir).context("cannot create data/debug/")?;

    // ── 1. luminance.png ─────────────────────────────────────────────────────
    {
        let mut img = image::RgbImage::new(W as u32, H as u32);
        for y in 0..H {
            for x in 0..W {
                let [r, g, b] = gray(terrain.luminance.get(x, y));
                img.put_pixel(x as u32, (H - 1 - y) as u32, image::Rgb([r, g, b]));
            }
        }
        save(&img, out_dir, "luminance.png")?;
    }

    // ── 2. occupancy.png ─────────────────────────────────────────────────────
    {
        let mut img = image::RgbImage::new(W as u32, H as u32);
        for y in 0..H {
            for x in 0..W {
                let above = y as f32 > terrain.height_line[x];
                let [r, g, b] = cell_color(terrain.occupancy.is_solid(x, y), above);
                img.put_pixel(x as u32, (H - 1 - y) as u32, image::Rgb([r, g, b]));
            }
        }
        save(&img, out_dir, "occupancy.png")?;
    }

    // ── 3. lsystem.png ───────────────────────────────────────────────────────
    {
        let mut engine = GrammarEngine::new();
        let system = engine.load_preset(Preset::Plant)?;
        system.seek(system.max_iterations());
        println!("Interpreting plant at iteration {}…", system.iteration());

        let segments = turtle::interpret(system.current_axiom(), &TurtleConfig::for_system(system));
        let mut img = image::RgbImage::from_pixel(LSYSTEM_SIZE, LSYSTEM_SIZE, image::Rgb([250, 248, 240]));
        if let Some(bounds) = Bounds::of(&segments) {
            for seg in &segments {
                draw_segment(&mut img, seg, &bounds);
            }
        }
        save(&img, out_dir, "lsystem.png")?;
    }

    Ok(())
}

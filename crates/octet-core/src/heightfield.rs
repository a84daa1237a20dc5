use serde::{Deserialize, Serialize};

/// A 2D scalar field, row-major. Row `y`, column `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightField {
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl HeightField {
    /// Create a new HeightField filled with the given value.
    pub fn new(width: usize, height: usize, fill: f32) -> Self {
        Self { data: vec![fill; width * height], width, height }
    }

    /// Fill every cell from `f(x, y)`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self { data, width, height }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: f32) {
        self.data[y * self.width + x] = val;
    }

    pub fn min_value(&self) -> f32 {
        self.data.iter().cloned().fold(f32::INFINITY, f32::min)
    }

    pub fn max_value(&self) -> f32 {
        self.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Cells at or above `threshold` become solid.
    pub fn threshold(&self, threshold: f32) -> OccupancyGrid {
        OccupancyGrid {
            cells: self.data.iter().map(|&v| v >= threshold).collect(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Solid/empty decision per cell, same layout as [`HeightField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    pub cells: Vec<bool>,
    pub width: usize,
    pub height: usize,
}

impl OccupancyGrid {
    pub fn empty(width: usize, height: usize) -> Self {
        Self { cells: vec![false; width * height], width, height }
    }

    #[inline]
    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn set_solid(&mut self, x: usize, y: usize, solid: bool) {
        self.cells[y * self.width + x] = solid;
    }

    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn solid_fraction(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.solid_count() as f64 / self.cells.len() as f64
    }

    /// Text preview, `#` for solid. Row 0 is printed last so the ground
    /// sits at the bottom.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                out.push(if self.is_solid(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_is_row_major() {
        let hf = HeightField::from_fn(3, 2, |x, y| (y * 10 + x) as f32);
        assert_eq!(hf.data, vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(hf.get(2, 1), 12.0);
        assert_eq!(hf.min_value(), 0.0);
        assert_eq!(hf.max_value(), 12.0);
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut hf = HeightField::new(2, 2, 0.0);
        hf.set(1, 0, 128.0);
        hf.set(0, 1, 127.9);
        let grid = hf.threshold(128.0);
        assert!(grid.is_solid(1, 0));
        assert!(!grid.is_solid(0, 1));
        assert_eq!(grid.solid_count(), 1);
        assert_eq!(grid.solid_fraction(), 0.25);
    }

    #[test]
    fn ascii_puts_row_zero_at_bottom() {
        let mut grid = OccupancyGrid::empty(2, 2);
        grid.set_solid(0, 0, true);
        assert_eq!(grid.to_ascii(), "..\n#.\n");
    }

    #[test]
    fn empty_grid_fraction_is_zero() {
        assert_eq!(OccupancyGrid::empty(0, 0).solid_fraction(), 0.0);
    }
}

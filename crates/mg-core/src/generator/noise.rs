//! Gradient noise category fields
//!
//! Samples seeded Perlin or Simplex noise on a scaled lattice and maps each
//! value in [-1, 1] onto one of a list of equal-width category bands.

use noise::{NoiseFn, Perlin, Simplex};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::consts::DEFAULT_NOISE_DIVISOR;
use crate::grid::Grid;
use crate::rng::MapRng;

/// Largest seed drawn when none is given
const MAX_NOISE_SEED: i32 = 65536;

/// Gradient noise variant
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NoiseStyle {
    /// Classic lattice gradient noise with quintic fade
    #[default]
    Perlin,
    /// Skewed triangular lattice noise
    Simplex,
}

#[derive(Debug, Clone)]
enum Source {
    Perlin(Perlin),
    Simplex(Simplex),
}

/// A seeded noise source bound to a lattice scale
#[derive(Debug, Clone)]
pub struct NoiseField {
    source: Source,
    divisor: f64,
    seed: u32,
}

impl NoiseField {
    /// Create a field with an explicit seed
    ///
    /// A non-positive divisor falls back to the default scale.
    pub fn new(style: NoiseStyle, divisor: f64, seed: u32) -> Self {
        let source = match style {
            NoiseStyle::Perlin => Source::Perlin(Perlin::new(seed)),
            NoiseStyle::Simplex => Source::Simplex(Simplex::new(seed)),
        };
        let divisor = if divisor > 0.0 {
            divisor
        } else {
            DEFAULT_NOISE_DIVISOR
        };
        Self {
            source,
            divisor,
            seed,
        }
    }

    /// Create a field seeded from the generation RNG
    pub fn seeded(style: NoiseStyle, divisor: f64, rng: &mut MapRng) -> Self {
        let seed = rng.rand(0, MAX_NOISE_SEED) as u32;
        Self::new(style, divisor, seed)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Noise value at a cell, clamped to [-1, 1]
    pub fn sample(&self, x: usize, y: usize) -> f64 {
        let point = [x as f64 / self.divisor, y as f64 / self.divisor];
        let value = match &self.source {
            Source::Perlin(p) => p.get(point),
            Source::Simplex(s) => s.get(point),
        };
        value.clamp(-1.0, 1.0)
    }

    /// Generate a category grid
    ///
    /// `fill` is the default category; `bands` split [-1, 1] into
    /// `bands.len()` equal ranges, lowest first. The top two rows, bottom two
    /// rows, first column and last column always keep `fill`.
    pub fn generate<T: Copy>(&self, width: usize, height: usize, fill: T, bands: &[T]) -> Grid<T> {
        let mut grid = Grid::new(width, height, fill);
        if bands.is_empty() {
            return grid;
        }

        for y in 0..height {
            for x in 0..width {
                if is_noise_interior(x, y, width, height) {
                    let band = band_index(self.sample(x, y), bands.len());
                    grid.set(x, y, bands[band]);
                }
            }
        }
        grid
    }
}

/// Cells outside the fixed fill margin
pub fn is_noise_interior(x: usize, y: usize, width: usize, height: usize) -> bool {
    x > 0 && y > 1 && x + 1 < width && y + 2 < height
}

/// Map a value in [-1, 1] to one of `bands` equal ranges
pub fn band_index(value: f64, bands: usize) -> usize {
    if bands <= 1 {
        return 0;
    }
    let width = 2.0 / bands as f64;
    let idx = ((value.clamp(-1.0, 1.0) + 1.0) / width).floor() as usize;
    idx.min(bands - 1)
}

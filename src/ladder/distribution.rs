//! Probability mass over ladder levels

use serde::Serialize;
use std::ops::Index;

/// Probability of occupying each level, stored 0-based for levels `1..=L`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Distribution(Vec<f64>);

impl Distribution {
    /// All mass on `start_level` (1-based).
    ///
    /// Callers pass a validated ladder's bounds: `1 <= start_level <= levels`.
    pub(crate) fn unit(levels: usize, start_level: usize) -> Self {
        let mut mass = vec![0.0; levels];
        mass[start_level - 1] = 1.0;
        Self(mass)
    }

    pub fn levels(&self) -> usize {
        self.0.len()
    }

    /// Probability of being at `level` (1-based), `None` outside the ladder
    pub fn probability(&self, level: usize) -> Option<f64> {
        level.checked_sub(1).and_then(|i| self.0.get(i)).copied()
    }

    /// Probability of having reached the absorbing top level
    pub fn top_level_probability(&self) -> f64 {
        self.0.last().copied().unwrap_or(0.0)
    }

    /// Total mass, which stays at 1 up to rounding error
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn is_conserved(&self, tolerance: f64) -> bool {
        (self.total() - 1.0).abs() <= tolerance
    }

    /// `(level, probability)` pairs in ascending level order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().enumerate().map(|(i, &p)| (i + 1, p))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Distribution {
    fn from(mass: Vec<f64>) -> Self {
        Self(mass)
    }
}

/// Indexed by 0-based storage position, like the underlying slice
impl Index<usize> for Distribution {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

//! Condensed pairwise distance storage.
//!
//! A symmetric zero-diagonal distance matrix over n points needs only its
//! strict upper triangle: n(n-1)/2 values in row-major order, the same
//! condensed layout SciPy and kodama use. [`DistanceMatrix`] wraps that
//! vector with O(1) symmetric access and sub-matrix extraction.

use crate::error::{Error, Result};

/// Pairwise distances over n points, stored condensed.
///
/// For i < j the entry d(i, j) lives at index `i*n - i*(i+1)/2 + (j-i-1)`;
/// the diagonal is implicitly zero and `get` resolves symmetric access.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Create from a condensed upper-triangle vector of length n(n-1)/2.
    pub fn from_condensed(n: usize, data: Vec<f64>) -> Result<Self> {
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        let expected = n * (n - 1) / 2;
        if data.len() != expected {
            return Err(Error::InvalidDistance {
                expected,
                found: data.len(),
            });
        }
        Ok(Self { n, data })
    }

    /// Create by evaluating `dist(i, j)` for every pair i < j.
    pub fn from_fn(n: usize, mut dist: impl FnMut(usize, usize) -> f64) -> Result<Self> {
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        let mut data = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..(n - 1) {
            for j in (i + 1)..n {
                data.push(dist(i, j));
            }
        }
        Ok(Self { n, data })
    }

    /// Euclidean distances between dense points.
    pub fn euclidean(points: &[Vec<f64>]) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        let d = points[0].len();
        if let Some(p) = points.iter().find(|p| p.len() != d) {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: p.len(),
            });
        }
        Self::from_fn(points.len(), |i, j| {
            points[i]
                .iter()
                .zip(points[j].iter())
                .map(|(x, y)| {
                    let dx = x - y;
                    dx * dx
                })
                .sum::<f64>()
                .sqrt()
        })
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix covers zero points (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between points i and j. Zero on the diagonal.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => self.data[i * self.n - i * (i + 1) / 2 + (j - i - 1)],
            std::cmp::Ordering::Greater => self.data[j * self.n - j * (j + 1) / 2 + (i - j - 1)],
            std::cmp::Ordering::Equal => 0.0,
        }
    }

    /// Condensed entries in row-major upper-triangle order.
    ///
    /// This is the layout kodama's `linkage` consumes.
    pub fn condensed(&self) -> &[f64] {
        &self.data
    }

    /// Extract the sub-matrix over `idx`, preserving list order.
    ///
    /// Entry (a, b) of the result equals `get(idx[a], idx[b])`.
    pub fn sub_matrix(&self, idx: &[usize]) -> DistanceMatrix {
        let m = idx.len();
        let mut data = Vec::with_capacity(m * (m - 1) / 2);
        for a in 0..m.saturating_sub(1) {
            for b in (a + 1)..m {
                data.push(self.get(idx[a], idx[b]));
            }
        }
        DistanceMatrix { n: m, data }
    }
}

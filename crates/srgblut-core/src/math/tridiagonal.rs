//! Symmetric tridiagonal systems
//!
//! Normal equations of a least-squares fit in a hat-function basis couple each
//! unknown only to its two neighbours, so they are symmetric tridiagonal. The
//! solver is an LDLᵀ factorization without pivoting, which is stable for the
//! symmetric positive definite systems produced by the fit.

use crate::{Error, Result};

/// Relative pivot size below which the system is treated as singular
const PIVOT_EPSILON: f64 = 1e-12;

/// A symmetric tridiagonal matrix
///
/// `diag[i]` is `A[i][i]`, `off[i]` is `A[i][i+1] == A[i+1][i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SymTridiagonal {
    /// Main diagonal, `n` entries
    pub diag: Vec<f64>,
    /// First super/sub diagonal, `n - 1` entries
    pub off: Vec<f64>,
}

impl SymTridiagonal {
    /// Create an all-zero `n × n` matrix
    pub fn zeros(n: usize) -> Self {
        Self {
            diag: vec![0.0; n],
            off: vec![0.0; n.saturating_sub(1)],
        }
    }

    /// Dimension of the matrix
    #[inline]
    pub fn len(&self) -> usize {
        self.diag.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Multiply this matrix by a vector
    ///
    /// Returns A × v
    pub fn multiply_vec(&self, v: &[f64]) -> Vec<f64> {
        let n = self.len();
        debug_assert_eq!(v.len(), n);
        (0..n)
            .map(|i| {
                let mut s = self.diag[i] * v[i];
                if i > 0 {
                    s += self.off[i - 1] * v[i - 1];
                }
                if i + 1 < n {
                    s += self.off[i] * v[i + 1];
                }
                s
            })
            .collect()
    }

    /// Solve A × x = rhs
    ///
    /// Fails with [`Error::Singular`] if a pivot vanishes relative to the
    /// diagonal it was derived from, or becomes non-finite.
    pub fn solve(&self, rhs: &[f64]) -> Result<Vec<f64>> {
        let n = self.len();
        if rhs.len() != n {
            return Err(Error::InvalidOptions(format!(
                "right-hand side has {} rows, matrix has {}",
                rhs.len(),
                n
            )));
        }

        // Forward sweep: d holds the LDLᵀ pivots, l the unit-lower multipliers
        let mut d = vec![0.0; n];
        let mut l = vec![0.0; n.saturating_sub(1)];
        let mut z = vec![0.0; n];

        for i in 0..n {
            let mut pivot = self.diag[i];
            let mut acc = rhs[i];
            if i > 0 {
                pivot -= l[i - 1] * l[i - 1] * d[i - 1];
                acc -= l[i - 1] * z[i - 1];
            }
            let scale = self.diag[i].abs().max(f64::MIN_POSITIVE);
            if !pivot.is_finite() || pivot.abs() <= PIVOT_EPSILON * scale {
                return Err(Error::Singular { row: i });
            }
            d[i] = pivot;
            z[i] = acc;
            if i + 1 < n {
                l[i] = self.off[i] / pivot;
            }
        }

        // Back substitution through D and Lᵀ
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut v = z[i] / d[i];
            if i + 1 < n {
                v -= l[i] * x[i + 1];
            }
            x[i] = v;
        }

        Ok(x)
    }
}

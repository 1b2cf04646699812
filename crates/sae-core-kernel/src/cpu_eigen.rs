//! Symmetric eigen-decomposition by cyclic Jacobi rotations.
//!
//! The Gram matrices handled here are dense, real and symmetric, so every
//! eigenvalue is real and an orthonormal set of real eigenvectors exists.
//! Eigenvalues come back in rotation order, never sorted.

use anyhow::Result;
use log::{debug, warn};
use thiserror::Error;

/// Upper bound on full sweeps before the decomposition is declared failed.
pub const MAX_SWEEPS: usize = 100;

/// Convergence when `off(A) <= OFF_TOLERANCE * ||A||_F`.
pub const OFF_TOLERANCE: f64 = 1e-12;

/// Relative gap under which the two largest |λ| are treated as equal.
pub const TIE_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Error)]
pub enum EigenError {
    #[error("matrix buffer of {len} elements is not {n} x {n}")]
    NotSquare { len: usize, n: usize },

    #[error("eigen-decomposition did not converge after {sweeps} sweeps (off-diagonal norm {off_norm:e})")]
    NoConvergence { sweeps: usize, off_norm: f64 },

    #[error("matrix contains non-finite entries")]
    NonFinite,

    #[error("cannot select a principal eigenvector of an empty matrix")]
    Empty,
}

/// Eigenvalues and eigenvectors of a symmetric `n x n` matrix.
///
/// `values` are in decomposition order, NOT sorted. Eigenvector `k` is
/// column `k` of the row-major `vectors` buffer, i.e. `vectors[r * n + k]`.
#[derive(Debug, Clone)]
pub struct SymmetricEigen {
    pub n: usize,
    pub values: Vec<f64>,
    pub vectors: Vec<f64>,
    pub sweeps: usize,
}

/// The eigenpair with the largest |λ|, reduced to per-sample magnitudes.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Column of the selected eigenvector in the decomposition.
    pub index: usize,
    pub value: f64,
    /// `|v[r]|` for every row `r`.
    pub magnitudes: Vec<f64>,
    /// Another eigenvalue shares the maximal magnitude; the direction is
    /// not unique and `magnitudes` is one valid choice among several.
    pub degenerate: bool,
}

impl SymmetricEigen {
    #[inline(always)]
    pub fn vector_component(&self, row: usize, k: usize) -> f64 {
        self.vectors[row * self.n + k]
    }

    /// Explicit scan for the dominant eigenvalue. First index wins a tie.
    pub fn principal(&self) -> Result<Principal> {
        if self.n == 0 {
            anyhow::bail!(EigenError::Empty);
        }

        let mut best = 0;
        for k in 1..self.n {
            if self.values[k].abs() > self.values[best].abs() {
                best = k;
            }
        }

        let top = self.values[best].abs();
        let runner_up = self
            .values
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != best)
            .map(|(_, v)| v.abs())
            .fold(0.0, f64::max);
        let degenerate = self.n > 1 && top - runner_up <= TIE_TOLERANCE * top;

        if degenerate {
            warn!(
                "dominant eigenvalue {:.6e} is not unique (next |λ| = {:.6e}); principal direction is ambiguous",
                self.values[best], runner_up
            );
        }

        let magnitudes = (0..self.n)
            .map(|r| self.vector_component(r, best).abs())
            .collect();

        Ok(Principal {
            index: best,
            value: self.values[best],
            magnitudes,
            degenerate,
        })
    }
}

fn frobenius(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn off_diagonal_norm(a: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                sum += a[i * n + j] * a[i * n + j];
            }
        }
    }
    sum.sqrt()
}

/// Eigen-decomposition of a symmetric row-major `n x n` matrix.
///
/// Only the symmetric part is meaningful; callers pass a Gram matrix.
pub fn symmetric_eigen_f64(a: &[f64], n: usize) -> Result<SymmetricEigen> {
    if a.len() != n * n {
        anyhow::bail!(EigenError::NotSquare { len: a.len(), n });
    }
    if a.iter().any(|x| !x.is_finite()) {
        anyhow::bail!(EigenError::NonFinite);
    }

    let mut m = a.to_vec();
    let mut q = vec![0.0; n * n];
    for i in 0..n {
        q[i * n + i] = 1.0;
    }

    let scale = frobenius(&m);
    let mut off = off_diagonal_norm(&m, n);
    let mut sweeps = 0;

    while off > OFF_TOLERANCE * scale {
        if sweeps == MAX_SWEEPS {
            anyhow::bail!(EigenError::NoConvergence {
                sweeps,
                off_norm: off,
            });
        }

        for p in 0..n.saturating_sub(1) {
            for r in (p + 1)..n {
                rotate(&mut m, &mut q, n, p, r);
            }
        }

        sweeps += 1;
        off = off_diagonal_norm(&m, n);
        debug!("jacobi sweep {}: off-diagonal norm {:.3e}", sweeps, off);
    }

    let values = (0..n).map(|i| m[i * n + i]).collect();

    Ok(SymmetricEigen {
        n,
        values,
        vectors: q,
        sweeps,
    })
}

/// One Jacobi rotation annihilating `m[p][r]`, accumulated into `q`.
fn rotate(m: &mut [f64], q: &mut [f64], n: usize, p: usize, r: usize) {
    let apr = m[p * n + r];
    if apr == 0.0 {
        return;
    }

    // t = tan(theta), the smaller root of t^2 + 2 t theta - 1 = 0
    let theta = (m[r * n + r] - m[p * n + p]) / (2.0 * apr);
    let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;

    // columns p and r
    for k in 0..n {
        let mkp = m[k * n + p];
        let mkr = m[k * n + r];
        m[k * n + p] = c * mkp - s * mkr;
        m[k * n + r] = s * mkp + c * mkr;
    }
    // rows p and r
    for k in 0..n {
        let mpk = m[p * n + k];
        let mrk = m[r * n + k];
        m[p * n + k] = c * mpk - s * mrk;
        m[r * n + k] = s * mpk + c * mrk;
    }
    for k in 0..n {
        let qkp = q[k * n + p];
        let qkr = q[k * n + r];
        q[k * n + p] = c * qkp - s * qkr;
        q[k * n + r] = s * qkp + c * qkr;
    }
}

/// Principal-eigenvector magnitudes of a symmetric `n x n` matrix.
pub fn principal_eigenvector_magnitudes(a: &[f64], n: usize) -> Result<Principal> {
    symmetric_eigen_f64(a, n)?.principal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_gram::gram_arr_f64;

    fn residual(a: &[f64], eig: &SymmetricEigen, k: usize) -> f64 {
        let n = eig.n;
        (0..n)
            .map(|r| {
                let av: f64 = (0..n).map(|c| a[r * n + c] * eig.vector_component(c, k)).sum();
                (av - eig.values[k] * eig.vector_component(r, k)).abs()
            })
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_diagonal_matrix_is_already_converged() {
        let a = [1.0, 0.0, 0.0, 0.0, 7.0, 0.0, 0.0, 0.0, 3.0];
        let eig = symmetric_eigen_f64(&a, 3).unwrap();
        assert_eq!(eig.sweeps, 0);
        assert_eq!(eig.values, vec![1.0, 7.0, 3.0]);

        // dominant eigenvalue is NOT at index 0
        let p = eig.principal().unwrap();
        assert_eq!(p.index, 1);
        assert_eq!(p.value, 7.0);
        assert_eq!(p.magnitudes, vec![0.0, 1.0, 0.0]);
        assert!(!p.degenerate);
    }

    #[test]
    fn test_two_by_two_known_pairs() {
        // [[2, 1], [1, 2]] -> λ = 3 with (1, 1)/√2, λ = 1 with (1, -1)/√2
        let a = [2.0, 1.0, 1.0, 2.0];
        let p = principal_eigenvector_magnitudes(&a, 2).unwrap();
        assert!((p.value - 3.0).abs() < 1e-12, "got {}", p.value);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        for m in &p.magnitudes {
            assert!((m - h).abs() < 1e-12, "magnitude {}", m);
        }
    }

    #[test]
    fn test_gram_eigenpairs_satisfy_definition() {
        let v = [
            5.1, 3.5, 1.4, 0.2, //
            7.0, 3.2, 4.7, 1.4, //
            6.3, 3.3, 6.0, 2.5, //
            4.9, 3.0, 1.4, 0.2, //
            6.4, 3.2, 4.5, 1.5, //
            5.8, 2.7, 5.1, 1.9,
        ];
        let n = 6;
        let mut g = vec![0.0; n * n];
        gram_arr_f64(&v, &mut g, n, 4).unwrap();

        let eig = symmetric_eigen_f64(&g, n).unwrap();
        println!("eigenvalues = {:?} after {} sweeps", eig.values, eig.sweeps);

        let trace: f64 = (0..n).map(|i| g[i * n + i]).sum();
        let sum: f64 = eig.values.iter().sum();
        assert!((trace - sum).abs() < 1e-9 * trace);

        for k in 0..n {
            assert!(residual(&g, &eig, k) < 1e-9 * trace, "pair {} off", k);
        }

        // rank <= 4: at least two eigenvalues vanish, all are >= 0 up to noise
        assert!(eig.values.iter().all(|&l| l > -1e-9 * trace));
        assert!(eig.values.iter().filter(|l| l.abs() < 1e-9 * trace).count() >= 2);

        // Perron: the dominant eigenvector of a positive matrix has one sign
        let p = eig.principal().unwrap();
        let signs: Vec<f64> = (0..n).map(|r| eig.vector_component(r, p.index)).collect();
        assert!(signs.iter().all(|&x| x > 0.0) || signs.iter().all(|&x| x < 0.0));
    }

    #[test]
    fn test_eigenvectors_orthonormal() {
        let a = [4.0, 1.0, 2.0, 1.0, 3.0, 0.5, 2.0, 0.5, 5.0];
        let eig = symmetric_eigen_f64(&a, 3).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let d: f64 = (0..3)
                    .map(|r| eig.vector_component(r, i) * eig.vector_component(r, j))
                    .sum();
                let want = if i == j { 1.0 } else { 0.0 };
                assert!((d - want).abs() < 1e-12, "<q{}, q{}> = {}", i, j, d);
            }
        }
    }

    #[test]
    fn test_tied_dominant_eigenvalue_is_flagged() {
        let a = [2.0, 0.0, 0.0, 2.0];
        let p = principal_eigenvector_magnitudes(&a, 2).unwrap();
        assert!(p.degenerate);
        assert_eq!(p.value, 2.0);
    }

    #[test]
    fn test_negative_eigenvalue_can_dominate() {
        // λ = -5 and 4: selection is by |λ|, not by signed value
        let a = [-5.0, 0.0, 0.0, 4.0];
        let p = principal_eigenvector_magnitudes(&a, 2).unwrap();
        assert_eq!(p.index, 0);
        assert_eq!(p.value, -5.0);
    }

    #[test]
    fn test_errors_are_typed() {
        let err = symmetric_eigen_f64(&[1.0, 2.0, 3.0], 2).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EigenError>(),
            Some(EigenError::NotSquare { len: 3, n: 2 })
        ));

        let err = symmetric_eigen_f64(&[f64::NAN], 1).unwrap_err();
        assert!(matches!(err.downcast_ref::<EigenError>(), Some(EigenError::NonFinite)));

        let err = principal_eigenvector_magnitudes(&[], 0).unwrap_err();
        assert!(matches!(err.downcast_ref::<EigenError>(), Some(EigenError::Empty)));
    }

    #[test]
    fn test_single_element() {
        let p = principal_eigenvector_magnitudes(&[9.0], 1).unwrap();
        assert_eq!(p.value, 9.0);
        assert_eq!(p.magnitudes, vec![1.0]);
        assert!(!p.degenerate);
    }
}

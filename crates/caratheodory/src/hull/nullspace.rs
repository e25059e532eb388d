//! Affine dependency detection via elimination on the lifted matrix.
//!
//! A family `x_1..x_m` in R^D is affinely independent iff the `(D+1)×m`
//! matrix with columns `[x_k; 1]` has full column rank. When it does not,
//! any null vector of that matrix is a zero-sum relation `Σ g_k x_k = 0`,
//! `Σ g_k = 0` with `g ≠ 0`, exactly the certificate the pivot consumes.

use nalgebra::{DMatrix, DVector};

use super::types::{AffineRelation, ReduceCfg, ReduceError};

/// Columns `[x_k; 1]` for the supported points.
fn lifted_matrix(points: &[DVector<f64>], support: &[usize]) -> DMatrix<f64> {
    let dim = points[support[0]].len();
    let mut a = DMatrix::zeros(dim + 1, support.len());
    for (col, &idx) in support.iter().enumerate() {
        for row in 0..dim {
            a[(row, col)] = points[idx][row];
        }
        a[(dim, col)] = 1.0;
    }
    a
}

/// In-place forward elimination with partial (max-magnitude) pivoting.
///
/// Returns the pivot columns in increasing order; columns not listed are
/// free. Candidates with magnitude at most `eps_pivot` count as zero.
fn row_echelon(a: &mut DMatrix<f64>, eps_pivot: f64) -> Vec<usize> {
    let (rows, cols) = a.shape();
    let mut pivot_cols = Vec::new();
    let mut r = 0usize;
    for c in 0..cols {
        if r >= rows {
            break;
        }
        let mut best = r;
        let mut best_abs = a[(r, c)].abs();
        for i in (r + 1)..rows {
            let v = a[(i, c)].abs();
            if v > best_abs {
                best = i;
                best_abs = v;
            }
        }
        if best_abs <= eps_pivot {
            continue; // free column
        }
        a.swap_rows(r, best);
        for i in (r + 1)..rows {
            let factor = a[(i, c)] / a[(r, c)];
            if factor != 0.0 {
                for j in (c + 1)..cols {
                    let delta = factor * a[(r, j)];
                    a[(i, j)] -= delta;
                }
            }
            a[(i, c)] = 0.0;
        }
        pivot_cols.push(c);
        r += 1;
    }
    pivot_cols
}

/// Whether the supported family is affinely independent.
///
/// Fast path: more than `dim + 1` points are always dependent.
pub fn is_affinely_independent(
    points: &[DVector<f64>],
    support: &[usize],
    cfg: ReduceCfg,
) -> bool {
    let m = support.len();
    if m <= 1 {
        return true;
    }
    if m > points[support[0]].len() + 1 {
        return false;
    }
    let mut a = lifted_matrix(points, support);
    row_echelon(&mut a, cfg.eps_pivot).len() == m
}

/// If no entry is strictly positive, negate the vector.
///
/// The pivot eliminates along strictly positive coefficients, so a relation
/// must expose at least one; a nontrivial vector always has a sign that does.
fn normalize_sign(g: &mut [f64]) {
    if !g.iter().any(|&v| v > 0.0) {
        for v in g.iter_mut() {
            *v = -*v;
        }
    }
}

/// Find a nontrivial zero-sum relation among the supported points.
///
/// Precondition: the family is affinely dependent. On an independent family
/// this returns `ReduceError::AlreadyIndependent`, which callers should
/// treat as a logic error rather than a data problem.
pub fn find_affine_relation(
    points: &[DVector<f64>],
    support: &[usize],
    cfg: ReduceCfg,
) -> Result<AffineRelation, ReduceError> {
    let m = support.len();
    if m == 0 {
        return Err(ReduceError::AlreadyIndependent);
    }
    let mut a = lifted_matrix(points, support);
    let pivot_cols = row_echelon(&mut a, cfg.eps_pivot);
    if pivot_cols.len() == m {
        return Err(ReduceError::AlreadyIndependent);
    }

    let mut is_pivot = vec![false; m];
    for &c in &pivot_cols {
        is_pivot[c] = true;
    }
    // Free column exists since rank < m; fix its coordinate to one and
    // back-substitute through the pivot rows.
    let free = is_pivot
        .iter()
        .position(|&p| !p)
        .ok_or(ReduceError::AlreadyIndependent)?;
    let mut g = vec![0.0; m];
    g[free] = 1.0;
    for (r, &pc) in pivot_cols.iter().enumerate().rev() {
        let mut s = 0.0;
        for c in (pc + 1)..m {
            s += a[(r, c)] * g[c];
        }
        g[pc] = -s / a[(r, pc)];
    }
    normalize_sign(&mut g);

    let scale = g.iter().fold(1.0f64, |acc, &v| acc.max(v.abs()));
    debug_assert!(
        g.iter().sum::<f64>().abs() <= 1e-8 * scale * (m as f64),
        "relation coefficients must sum to zero"
    );
    Ok(AffineRelation::new(g))
}

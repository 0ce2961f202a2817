//! Matrix primitives and Gram-Schmidt orthogonalization.
//!
//! All routines operate on plain row-major `Vec<Vec<f64>>` matrices. The
//! projection basis is small (ndim rarely exceeds a few dozen), so clarity
//! wins over a dedicated linear algebra dependency here.

/// Row-major square or rectangular matrix.
pub type Matrix = Vec<Vec<f64>>;

/// Tolerance below which a vector is treated as linearly dependent.
const DEGENERATE_NORM: f64 = 1e-10;

/// Tolerance below which a pivot makes a matrix numerically singular.
const SINGULAR_PIVOT: f64 = 1e-12;

/// Create an n x n identity matrix.
#[must_use]
pub fn identity(n: usize) -> Matrix {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

/// Dot product of two equal-length vectors.
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm of a vector.
#[must_use]
pub fn norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Scale a vector to unit length in place. Returns false and leaves the
/// vector untouched when its norm is below tolerance.
pub fn normalize(v: &mut [f64]) -> bool {
    let len = norm(v);
    if len < DEGENERATE_NORM {
        return false;
    }
    for x in v {
        *x /= len;
    }
    true
}

/// Standard matrix product. Inner dimensions must match.
#[must_use]
pub fn matmul(a: &Matrix, b: &Matrix) -> Matrix {
    let inner = b.len();
    debug_assert!(a.iter().all(|row| row.len() == inner));
    let cols = b.first().map_or(0, Vec::len);

    a.iter()
        .map(|row| {
            (0..cols)
                .map(|j| (0..inner).map(|k| row[k] * b[k][j]).sum())
                .collect()
        })
        .collect()
}

/// Transpose of a matrix.
#[must_use]
pub fn transpose(m: &Matrix) -> Matrix {
    let rows = m.len();
    let cols = m.first().map_or(0, Vec::len);
    (0..cols)
        .map(|j| (0..rows).map(|i| m[i][j]).collect())
        .collect()
}

/// Make the rows of `m` pairwise orthogonal and unit-length via modified
/// Gram-Schmidt.
///
/// The `priority_row` is normalized first and its direction is preserved
/// exactly. Every other row is processed in index order, orthogonalized
/// against all previously processed rows, then normalized. A row whose
/// residual norm falls below tolerance is left as it was: the input rows are
/// expected to be linearly independent, and near-duplicates stay unresolved
/// rather than exploding into noise.
#[must_use]
pub fn orthogonalize(mut m: Matrix, priority_row: usize) -> Matrix {
    let n = m.len();
    debug_assert!(priority_row < n);

    let mut processed: Vec<usize> = Vec::with_capacity(n);

    let order = std::iter::once(priority_row).chain((0..n).filter(|&i| i != priority_row));
    for i in order {
        let mut row = m[i].clone();
        for &p in &processed {
            let proj = dot(&row, &m[p]);
            for (r, q) in row.iter_mut().zip(&m[p]) {
                *r -= proj * q;
            }
        }

        if !normalize(&mut row) {
            continue;
        }
        m[i] = row;
        processed.push(i);
    }

    m
}

/// Canonical orthonormal starting basis for an `ndim`-dimensional projection.
///
/// The first two columns place the ndim axes evenly around a unit circle,
/// scaled by sqrt(2/ndim) so each column is unit-length. Remaining columns
/// are completed by Gram-Schmidt against the standard basis vectors, skipping
/// any that are linearly dependent on the columns already chosen. Degenerates
/// to the identity for ndim <= 2.
#[must_use]
pub fn circular_basis(ndim: usize) -> Matrix {
    if ndim <= 2 {
        return identity(ndim);
    }

    let scale = (2.0 / ndim as f64).sqrt();
    let mut cols: Vec<Vec<f64>> = Vec::with_capacity(ndim);
    cols.push(
        (0..ndim)
            .map(|i| scale * (std::f64::consts::TAU * i as f64 / ndim as f64).cos())
            .collect(),
    );
    cols.push(
        (0..ndim)
            .map(|i| scale * (std::f64::consts::TAU * i as f64 / ndim as f64).sin())
            .collect(),
    );

    // Complete the basis from standard basis vectors.
    for k in 0..ndim {
        if cols.len() == ndim {
            break;
        }
        let mut candidate: Vec<f64> = (0..ndim).map(|i| if i == k { 1.0 } else { 0.0 }).collect();
        for col in &cols {
            let proj = dot(&candidate, col);
            for (c, q) in candidate.iter_mut().zip(col) {
                *c -= proj * q;
            }
        }
        if !normalize(&mut candidate) {
            continue;
        }
        cols.push(candidate);
    }

    // Columns are orthonormal, so rows of the assembled matrix are too.
    (0..ndim)
        .map(|i| (0..ndim).map(|j| cols[j][i]).collect())
        .collect()
}

/// Determinant by Gaussian elimination with partial pivoting.
///
/// Returns 0.0 as soon as a pivot is smaller than tolerance in magnitude
/// (numerically singular input).
#[must_use]
pub fn determinant(m: &Matrix) -> f64 {
    let n = m.len();
    debug_assert!(m.iter().all(|row| row.len() == n));

    let mut work = m.clone();
    let mut det = 1.0;

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&a, &b| work[a][col].abs().total_cmp(&work[b][col].abs()))
            .unwrap_or(col);
        if work[pivot_row][col].abs() < SINGULAR_PIVOT {
            return 0.0;
        }
        if pivot_row != col {
            work.swap(pivot_row, col);
            det = -det;
        }

        let pivot = work[col][col];
        det *= pivot;
        for row in col + 1..n {
            let factor = work[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                work[row][k] -= factor * work[col][k];
            }
        }
    }

    det
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    fn assert_orthonormal(m: &Matrix, tol: f64) {
        for (i, a) in m.iter().enumerate() {
            assert!(
                (norm(a) - 1.0).abs() < tol,
                "row {} has norm {}",
                i,
                norm(a)
            );
            for (j, b) in m.iter().enumerate().skip(i + 1) {
                assert!(
                    dot(a, b).abs() < tol,
                    "rows {} and {} have dot {}",
                    i,
                    j,
                    dot(a, b)
                );
            }
        }
    }

    #[test]
    fn test_identity_is_orthogonalize_fixed_point() {
        for n in 1..=6 {
            assert_eq!(orthogonalize(identity(n), 0), identity(n));
        }
    }

    #[test]
    fn test_orthogonalize_produces_orthonormal_rows() {
        let m = vec![
            vec![1.0, 2.0, 0.5],
            vec![0.0, 1.0, 1.0],
            vec![3.0, -1.0, 2.0],
        ];
        let o = orthogonalize(m, 0);
        assert_orthonormal(&o, EPS);
    }

    #[test]
    fn test_orthogonalize_preserves_priority_row_direction() {
        let m = vec![
            vec![1.0, 1.0, 0.0],
            vec![2.0, -1.0, 3.0],
            vec![0.5, 0.5, 1.0],
        ];
        let original = m[1].clone();
        let o = orthogonalize(m, 1);

        let len = norm(&original);
        for (got, want) in o[1].iter().zip(&original) {
            assert!((got - want / len).abs() < EPS);
        }
        assert_orthonormal(&o, EPS);
    }

    #[test]
    fn test_orthogonalize_leaves_degenerate_row_unresolved() {
        // Second row is a multiple of the first; it cannot be orthogonalized.
        let m = vec![vec![1.0, 0.0], vec![2.0, 0.0]];
        let o = orthogonalize(m, 0);
        assert_eq!(o[0], vec![1.0, 0.0]);
        assert_eq!(o[1], vec![2.0, 0.0]);
    }

    #[test]
    fn test_normalize() {
        let mut v = vec![3.0, 4.0];
        assert!(normalize(&mut v));
        assert_eq!(v, vec![0.6, 0.8]);

        let mut zero = vec![0.0, 0.0];
        assert!(!normalize(&mut zero));
        assert_eq!(zero, vec![0.0, 0.0]);
    }

    #[test]
    fn test_matmul_and_transpose() {
        let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let b = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        assert_eq!(matmul(&a, &b), vec![vec![2.0, 1.0], vec![4.0, 3.0]]);
        assert_eq!(transpose(&a), vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
    }

    #[test]
    fn test_circular_basis_degenerates_to_identity() {
        assert_eq!(circular_basis(1), identity(1));
        assert_eq!(circular_basis(2), identity(2));
    }

    #[test]
    fn test_circular_basis_first_two_columns() {
        for n in 3..=8 {
            let m = circular_basis(n);
            let scale = (2.0 / n as f64).sqrt();
            for (i, row) in m.iter().enumerate() {
                let angle = std::f64::consts::TAU * i as f64 / n as f64;
                assert!((row[0] - scale * angle.cos()).abs() < EPS);
                assert!((row[1] - scale * angle.sin()).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_circular_basis_is_orthonormal() {
        for n in 3..=9 {
            assert_orthonormal(&circular_basis(n), EPS);
        }
    }

    #[test]
    fn test_determinant_basics() {
        assert!((determinant(&identity(4)) - 1.0).abs() < EPS);

        let m = vec![vec![2.0, 0.0], vec![0.0, 3.0]];
        assert!((determinant(&m) - 6.0).abs() < EPS);

        // Row swap flips the sign.
        let m = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        assert!((determinant(&m) + 1.0).abs() < EPS);
    }

    #[test]
    fn test_determinant_singular_returns_zero() {
        let m = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        assert_eq!(determinant(&m), 0.0);
    }

    #[test]
    fn test_determinant_of_produced_bases_is_unit() {
        for n in 1..=7 {
            assert!((determinant(&circular_basis(n)).abs() - 1.0).abs() < EPS);
        }
        let o = orthogonalize(
            vec![
                vec![1.0, 2.0, 0.5],
                vec![0.0, 1.0, 1.0],
                vec![3.0, -1.0, 2.0],
            ],
            0,
        );
        assert!((determinant(&o).abs() - 1.0).abs() < EPS);
    }
}

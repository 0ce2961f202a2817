//! The orthonormal projection basis.
//!
//! A [`Projection`] owns an ndim x ndim orthonormal matrix. Row i describes
//! how data dimension i contributes to each output axis; columns 0 and 1 are
//! the displayed X/Y canvas axes, column 2 is depth, and any further columns
//! are inert extra orthogonal directions. The matrix is mutated only through
//! this API and every public mutation leaves the rows orthonormal.

use crate::dataset::DataMatrix;
use crate::linalg::{self, Matrix};

/// Orthonormal ndim x ndim projection basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    ndim: usize,
    matrix: Matrix,
}

impl Projection {
    /// Create a projection initialized to the circular basis.
    ///
    /// `ndim` must be at least 1.
    #[must_use]
    pub fn new(ndim: usize) -> Self {
        assert!(ndim >= 1, "projection needs at least one dimension");
        Self {
            ndim,
            matrix: linalg::circular_basis(ndim),
        }
    }

    /// Number of data dimensions.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Snapshot of the full matrix. No row aliasing escapes this type.
    #[must_use]
    pub fn matrix(&self) -> Matrix {
        self.matrix.clone()
    }

    /// Replace the full matrix.
    ///
    /// The input is cloned and re-orthogonalized with row 0 as the priority
    /// row, so no row direction other than row 0's is preserved preferentially.
    pub fn set_matrix(&mut self, m: &Matrix) {
        debug_assert_eq!(m.len(), self.ndim);
        debug_assert!(m.iter().all(|row| row.len() == self.ndim));
        self.matrix = linalg::orthogonalize(m.clone(), 0);
    }

    /// Copy of axis row `i`.
    #[must_use]
    pub fn axis(&self, i: usize) -> Vec<f64> {
        debug_assert!(i < self.ndim);
        self.matrix[i].clone()
    }

    /// Negate axis row `i` in place, flipping which end faces the viewer.
    pub fn flip_axis(&mut self, i: usize) {
        debug_assert!(i < self.ndim);
        for v in &mut self.matrix[i] {
            *v = -*v;
        }
    }

    /// Replace axis row `i` and re-orthogonalize with row `i` as priority.
    ///
    /// The new row's direction is preserved exactly (after normalization);
    /// all other rows are adjusted in index order to stay orthogonal to it
    /// and to each other. If re-orthogonalization flips the sign of the depth
    /// column as a side effect, the whole column is negated back so a single
    /// drag never inverts which points are near versus far.
    pub fn set_axis(&mut self, i: usize, vector: &[f64]) {
        debug_assert!(i < self.ndim);
        debug_assert_eq!(vector.len(), self.ndim);

        let old_depth = self.depth_column();

        self.matrix[i] = vector.to_vec();
        self.matrix = linalg::orthogonalize(std::mem::take(&mut self.matrix), i);

        if let Some(old) = old_depth {
            let new: Vec<f64> = self.matrix.iter().map(|row| row[2]).collect();
            if linalg::dot(&old, &new) < 0.0 {
                for row in &mut self.matrix {
                    row[2] = -row[2];
                }
            }
        }
    }

    fn depth_column(&self) -> Option<Vec<f64>> {
        if self.ndim < 3 {
            return None;
        }
        Some(self.matrix.iter().map(|row| row[2]).collect())
    }

    /// Sign of each axis's depth-column entry: +1.0 or -1.0 per row, all +1.0
    /// when there is no depth column. Decides which end of a handle currently
    /// faces the viewer.
    #[must_use]
    pub fn axis_z_signs(&self) -> Vec<f64> {
        if self.ndim < 3 {
            return vec![1.0; self.ndim];
        }
        self.matrix
            .iter()
            .map(|row| if row[2] < 0.0 { -1.0 } else { 1.0 })
            .collect()
    }

    /// Project all points onto the displayed X/Y axes. Y is forced to 0 for a
    /// one-dimensional projection.
    #[must_use]
    pub fn project_xy(&self, data: &DataMatrix) -> Vec<[f64; 2]> {
        debug_assert_eq!(data.ndim(), self.ndim);
        let has_y = self.ndim >= 2;
        data.rows()
            .map(|row| {
                let mut out = [0.0; 2];
                for (d, v) in row.iter().enumerate() {
                    out[0] += v * self.matrix[d][0];
                    if has_y {
                        out[1] += v * self.matrix[d][1];
                    }
                }
                out
            })
            .collect()
    }

    /// Project all points onto the depth axis. All zeros when ndim < 3.
    #[must_use]
    pub fn project_z(&self, data: &DataMatrix) -> Vec<f64> {
        debug_assert_eq!(data.ndim(), self.ndim);
        if self.ndim < 3 {
            return vec![0.0; data.npoint()];
        }
        data.rows()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(d, v)| v * self.matrix[d][2])
                    .sum()
            })
            .collect()
    }

    /// Project all points onto X/Y/Z at once. Z is forced to 0 when ndim < 3.
    #[must_use]
    pub fn project_xyz(&self, data: &DataMatrix) -> Vec<[f64; 3]> {
        debug_assert_eq!(data.ndim(), self.ndim);
        let has_y = self.ndim >= 2;
        let has_depth = self.ndim >= 3;
        data.rows()
            .map(|row| {
                let mut out = [0.0; 3];
                for (d, v) in row.iter().enumerate() {
                    out[0] += v * self.matrix[d][0];
                    if has_y {
                        out[1] += v * self.matrix[d][1];
                    }
                    if has_depth {
                        out[2] += v * self.matrix[d][2];
                    }
                }
                out
            })
            .collect()
    }
}

/// Map raw depth values to a bounded scaling factor in `[min_scale, 1.0]` by
/// linear min/max normalization across the batch. A constant batch maps to
/// all ones.
#[must_use]
pub fn proximity(zs: &[f64], min_scale: f64) -> Vec<f64> {
    let (lo, hi) = zs
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &z| (lo.min(z), hi.max(z)));
    let range = hi - lo;
    if !(range > 0.0) {
        return vec![1.0; zs.len()];
    }
    zs.iter()
        .map(|&z| min_scale + (z - lo) / range * (1.0 - min_scale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::{dot, norm};

    const EPS: f64 = 1e-10;

    fn assert_orthonormal(m: &Matrix, tol: f64) {
        for (i, a) in m.iter().enumerate() {
            assert!((norm(a) - 1.0).abs() < tol);
            for b in m.iter().skip(i + 1) {
                assert!(dot(a, b).abs() < tol);
            }
        }
    }

    #[test]
    fn test_new_uses_circular_basis() {
        let p = Projection::new(5);
        assert_eq!(p.matrix(), linalg::circular_basis(5));
        assert_orthonormal(&p.matrix(), EPS);
    }

    #[test]
    fn test_set_matrix_reorthogonalizes() {
        let mut p = Projection::new(3);
        let skewed = vec![
            vec![1.0, 0.2, 0.0],
            vec![0.0, 1.0, 0.3],
            vec![0.1, 0.0, 1.0],
        ];
        p.set_matrix(&skewed);
        assert_orthonormal(&p.matrix(), EPS);
    }

    #[test]
    fn test_set_axis_preserves_direction_and_orthonormality() {
        let mut p = Projection::new(5);
        let mut perturbed = p.axis(0);
        perturbed[1] += 0.4;
        perturbed[3] -= 0.2;
        p.set_axis(0, &perturbed);

        let m = p.matrix();
        assert_orthonormal(&m, EPS);

        let len = norm(&perturbed);
        for (got, want) in m[0].iter().zip(&perturbed) {
            assert!((got - want / len).abs() < EPS);
        }
    }

    #[test]
    fn test_set_axis_does_not_drift() {
        let mut p = Projection::new(4);
        for step in 0..50 {
            let mut v = p.axis(step % 4);
            v[(step + 1) % 4] += 0.1;
            p.set_axis(step % 4, &v);
        }
        assert_orthonormal(&p.matrix(), 1e-8);
    }

    #[test]
    fn test_set_axis_keeps_depth_sign_stable() {
        let mut p = Projection::new(5);
        for step in 0..20 {
            let before: Vec<f64> = p.matrix().iter().map(|r| r[2]).collect();
            let mut v = p.axis(step % 5);
            v[(step + 2) % 5] += 0.7;
            p.set_axis(step % 5, &v);
            let after: Vec<f64> = p.matrix().iter().map(|r| r[2]).collect();
            assert!(dot(&before, &after) >= 0.0, "depth flipped at step {step}");
        }
    }

    #[test]
    fn test_flip_axis_negates_row() {
        let mut p = Projection::new(3);
        let before = p.axis(1);
        p.flip_axis(1);
        let after = p.axis(1);
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(*a, -b);
        }
        assert_orthonormal(&p.matrix(), EPS);
    }

    #[test]
    fn test_axis_z_signs() {
        let mut p = Projection::new(3);
        p.set_matrix(&linalg::identity(3));
        assert_eq!(p.axis_z_signs(), vec![1.0, 1.0, 1.0]);
        p.flip_axis(2);
        assert_eq!(p.axis_z_signs(), vec![1.0, 1.0, -1.0]);

        let flat = Projection::new(2);
        assert_eq!(flat.axis_z_signs(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_project_xy_identity_basis() {
        let mut p = Projection::new(3);
        p.set_matrix(&linalg::identity(3));
        let data = DataMatrix::new(vec![1.0, 2.0, 3.0, -1.0, 0.5, 0.0], 2, 3);
        let xy = p.project_xy(&data);
        assert_eq!(xy, vec![[1.0, 2.0], [-1.0, 0.5]]);
        let z = p.project_z(&data);
        assert_eq!(z, vec![3.0, 0.0]);
    }

    #[test]
    fn test_project_z_is_zero_below_three_dims() {
        let p = Projection::new(2);
        let data = DataMatrix::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2);
        assert_eq!(p.project_z(&data), vec![0.0, 0.0, 0.0]);

        let xyz = p.project_xyz(&data);
        assert!(xyz.iter().all(|v| v[2] == 0.0));
    }

    #[test]
    fn test_project_xyz_matches_parts() {
        let mut p = Projection::new(4);
        let mut v = p.axis(2);
        v[0] += 0.3;
        p.set_axis(2, &v);

        let data = DataMatrix::new((0..12).map(|i| i as f64 * 0.25).collect(), 3, 4);
        let xy = p.project_xy(&data);
        let z = p.project_z(&data);
        for (i, v) in p.project_xyz(&data).iter().enumerate() {
            assert!((v[0] - xy[i][0]).abs() < EPS);
            assert!((v[1] - xy[i][1]).abs() < EPS);
            assert!((v[2] - z[i]).abs() < EPS);
        }
    }

    #[test]
    fn test_proximity_normalizes_into_bounds() {
        let out = proximity(&[0.0, 1.0, 2.0], 0.2);
        assert!((out[0] - 0.2).abs() < EPS);
        assert!((out[1] - 0.6).abs() < EPS);
        assert!((out[2] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_proximity_constant_batch() {
        assert_eq!(proximity(&[0.5, 0.5, 0.5], 0.3), vec![1.0, 1.0, 1.0]);
        assert_eq!(proximity(&[], 0.3), Vec::<f64>::new());
    }
}

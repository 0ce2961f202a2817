//! Row-major storage for high-dimensional point data.

/// An npoint x ndim matrix of point coordinates, immutable once loaded.
///
/// Rows are points, columns are data dimensions. The backing storage is a
/// single flat allocation so projection passes stay cache-friendly.
#[derive(Debug, Clone, PartialEq)]
pub struct DataMatrix {
    values: Vec<f64>,
    npoint: usize,
    ndim: usize,
}

impl DataMatrix {
    /// Create a matrix from flat row-major values.
    ///
    /// `values.len()` must equal `npoint * ndim`.
    #[must_use]
    pub fn new(values: Vec<f64>, npoint: usize, ndim: usize) -> Self {
        debug_assert_eq!(values.len(), npoint * ndim);
        Self {
            values,
            npoint,
            ndim,
        }
    }

    /// Create an empty matrix with zero points.
    #[must_use]
    pub fn empty(ndim: usize) -> Self {
        Self {
            values: Vec::new(),
            npoint: 0,
            ndim,
        }
    }

    /// Number of points (rows).
    #[must_use]
    pub fn npoint(&self) -> usize {
        self.npoint
    }

    /// Number of dimensions (columns).
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// True when the matrix holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.npoint == 0
    }

    /// Coordinates of point `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.ndim..(i + 1) * self.ndim]
    }

    /// Iterator over point rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.ndim.max(1)).take(self.npoint)
    }

    /// The flat row-major values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_access() {
        let m = DataMatrix::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        assert_eq!(m.npoint(), 2);
        assert_eq!(m.ndim(), 3);
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_rows_iterator() {
        let m = DataMatrix::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        let rows: Vec<&[f64]> = m.rows().collect();
        assert_eq!(rows, vec![&[1.0, 2.0][..], &[3.0, 4.0][..]]);
    }

    #[test]
    fn test_empty() {
        let m = DataMatrix::empty(4);
        assert!(m.is_empty());
        assert_eq!(m.ndim(), 4);
        assert_eq!(m.rows().count(), 0);
    }
}

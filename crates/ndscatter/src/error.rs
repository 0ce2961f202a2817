//! Engine-level errors.

use thiserror::Error;

use ndscatter_data::DataError;

/// Errors surfaced at the public API boundary.
#[derive(Error, Debug)]
pub enum ScatterError {
    #[error("no data loaded")]
    NoData,
    #[error("expected a {expected}x{expected} projection matrix, got {rows}x{cols}")]
    MatrixShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },
    #[error("axis index {axis} out of range for {ndim} dimensions")]
    AxisOutOfRange { axis: usize, ndim: usize },
    #[error(transparent)]
    Data(#[from] DataError),
}

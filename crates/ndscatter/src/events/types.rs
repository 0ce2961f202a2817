//! Notification payloads.

use ndscatter_core::Matrix;

/// Notifications emitted by the engine, in the order the mutations that
/// caused them happened.
///
/// Every payload is a snapshot: matrices and index lists are owned copies,
/// never views into engine state.
#[derive(Debug, Clone, PartialEq)]
pub enum ScatterEvent {
    /// The projection matrix changed (drag, flip, or programmatic set).
    Projection { matrix: Matrix },
    /// The set of selected points changed.
    Select { indices: Vec<usize> },
    /// A lasso completed (`Some`) or was cleared (`None`).
    Lasso { indices: Option<Vec<usize>> },
    /// The viewport was resized.
    Resize { width: u32, height: u32 },
}

//! Interaction state machines.
//!
//! Both machines are explicit finite-state machines keyed on pointer events;
//! any cancellation path returns them to `Idle`.

pub mod axis_drag;
pub mod lasso;

pub use axis_drag::{AxisDrag, DragState};
pub use lasso::{Lasso, LassoState};

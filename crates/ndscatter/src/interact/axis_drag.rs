//! Drag-to-rotate state machine.

use ndscatter_core::Projection;
use ndscatter_render::ScreenScale;

/// Axis-drag states.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A handle is being dragged; `last` is the previous pointer position.
    Dragging { axis: usize, last: [f32; 2] },
}

/// Translates pointer deltas on an axis handle into `Projection::set_axis`
/// calls.
///
/// Deltas, not absolute positions: each move converts the pixel delta since
/// the last event into a data-space delta through the inverse screen scale
/// and adds it to the dragged axis's current vector.
#[derive(Debug, Default)]
pub struct AxisDrag {
    state: DragState,
}

impl AxisDrag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// True while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The axis being dragged, if any.
    #[must_use]
    pub fn active_axis(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { axis, .. } => Some(axis),
            DragState::Idle => None,
        }
    }

    /// Enter the dragging state for `axis` at pointer position `pos`.
    pub fn begin(&mut self, axis: usize, pos: [f32; 2]) {
        self.state = DragState::Dragging { axis, last: pos };
    }

    /// Apply a pointer move. Returns true when the projection was mutated.
    pub fn drag_to(
        &mut self,
        pos: [f32; 2],
        scale: &ScreenScale,
        projection: &mut Projection,
    ) -> bool {
        let DragState::Dragging { axis, last } = self.state else {
            return false;
        };

        let dx = scale.x.invert_delta((pos[0] - last[0]) as f64);
        let dy = scale.y.invert_delta((pos[1] - last[1]) as f64);

        let mut vector = projection.axis(axis);
        vector[0] += dx;
        if vector.len() > 1 {
            vector[1] += dy;
        }
        projection.set_axis(axis, &vector);

        self.state = DragState::Dragging { axis, last: pos };
        true
    }

    /// Leave the dragging state. Returns true when a drag was in progress.
    pub fn end(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }

    /// Abandon any drag; stray cancellations are swallowed.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

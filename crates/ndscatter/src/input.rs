//! Pointer input for the interaction layer.
//!
//! The engine has no windowing dependency: hosts translate whatever event
//! source they have (DOM, winit, test harness) into [`PointerEvent`]s with
//! viewport-local coordinates. Handle hit-testing runs against the screen
//! positions computed by the previous frame, which is exactly what the user
//! sees.

use ndscatter_render::AxisHandle;

/// Keyboard modifier state accompanying a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Shift only; starts a lasso on the background.
    #[must_use]
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }

    /// Alt/option only; flips an axis on handle click.
    #[must_use]
    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::default()
        }
    }

    /// Check if any modifier is pressed.
    #[must_use]
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    #[must_use]
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
}

/// A pointer event in viewport-local logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        x: f32,
        y: f32,
        button: PointerButton,
        modifiers: Modifiers,
    },
    Move {
        x: f32,
        y: f32,
    },
    Up {
        x: f32,
        y: f32,
    },
    DoubleClick {
        x: f32,
        y: f32,
    },
    /// Escape key or an externally-canceled gesture.
    Cancel,
}

/// Which end of an axis handle was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleEnd {
    /// The labeled handle at the positive endpoint.
    Towards,
    /// The unlabeled half-radius handle at the negative endpoint.
    Away,
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Handle { axis: usize, end: HandleEnd },
    Background,
}

/// Hit-test a pointer position against the axis handles.
///
/// The towards handle uses `radius`, the away handle half of it. When several
/// handles overlap, the nearest one wins. Both handles of an axis drive the
/// same underlying axis index.
#[must_use]
pub fn hit_test(handles: &[AxisHandle], x: f32, y: f32, radius: f32) -> PointerTarget {
    let mut best: Option<(f32, PointerTarget)> = None;

    let mut consider = |dist2: f32, max: f32, target: PointerTarget| {
        if dist2 > max * max {
            return;
        }
        if best.map_or(true, |(d, _)| dist2 < d) {
            best = Some((dist2, target));
        }
    };

    for handle in handles {
        let d2 = |p: [f32; 2]| {
            let dx = p[0] - x;
            let dy = p[1] - y;
            dx * dx + dy * dy
        };
        consider(
            d2(handle.towards),
            radius,
            PointerTarget::Handle {
                axis: handle.axis,
                end: HandleEnd::Towards,
            },
        );
        consider(
            d2(handle.away),
            radius / 2.0,
            PointerTarget::Handle {
                axis: handle.axis,
                end: HandleEnd::Away,
            },
        );
    }

    best.map_or(PointerTarget::Background, |(_, target)| target)
}

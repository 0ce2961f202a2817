//! ndscatter - interactive projection engine for high-dimensional scatter data.
//!
//! An orthonormal ndim x ndim basis projects points onto a 2D or 2.5D
//! perspective viewing plane. Hosts feed pointer events in, drive one
//! [`Scatter::tick`] per display refresh, and implement
//! [`PointRenderer`](ndscatter_render::PointRenderer) to consume the flat
//! vertex buffers each frame produces.
//!
//! Modules:
//! - [`config`] - toml-backed configuration
//! - [`events`] - event bus and notification payloads
//! - [`input`] - pointer events, modifiers, and handle hit-testing
//! - [`interact`] - axis-drag and lasso state machines
//! - [`scheduler`] - dirty-tracking frame scheduling
//! - [`scatter`] - the public facade

pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod interact;
pub mod scatter;
pub mod scheduler;

pub use config::{ProjectionSetting, ScatterConfig};
pub use error::ScatterError;
pub use events::{EventBus, ScatterEvent};
pub use input::{HandleEnd, Modifiers, PointerButton, PointerEvent, PointerTarget};
pub use scatter::Scatter;
pub use scheduler::RenderScheduler;

pub use ndscatter_core::{DataMatrix, Matrix, Projection};
pub use ndscatter_data::{ColumnSet, DataError, Dataset};
pub use ndscatter_render::{
    AxisHandle, DrawFrame, PerspectiveCamera, PointRenderer, ProjectionMode, Rgba8, ViewOptions,
    Viewport,
};

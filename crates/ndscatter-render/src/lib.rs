//! Frame building for the ndscatter engine.
//!
//! This crate turns a projection, a dataset, and view options into flat
//! vertex buffers for an external renderer:
//! - [`PerspectiveCamera`] - depth to screen-offset and size-scale math
//! - [`Viewport`] / [`ScreenScale`] - explicit pixel mapping, no ambient globals
//! - [`FrameBuffers`] - pre-allocated position/color/size arrays
//! - [`FrameBuilder`] - the per-frame projection and buffer-fill pass
//! - [`PointRenderer`] - the draw-call seam the host implements

pub mod buffers;
pub mod camera;
pub mod frame;
pub mod scale;
pub mod traits;

pub use buffers::{FrameBuffers, Rgba8};
pub use camera::PerspectiveCamera;
pub use frame::{AxisHandle, FrameBuilder, ProjectionMode, SceneInputs, ViewOptions};
pub use scale::{LinearScale, ScreenScale, Viewport};
pub use traits::{DrawFrame, PointRenderer};

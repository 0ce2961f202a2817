//! The draw-call seam between the frame builder and the host renderer.

use crate::buffers::Rgba8;

/// One frame's worth of vertex data, borrowed for the duration of a single
/// draw call.
///
/// Data-point vertices come first in render order, followed by
/// `axis_vertex_count` axis-line vertices (towards segment then away segment,
/// two vertices each, grouped by axis, origin before endpoint).
#[derive(Debug, Clone, Copy)]
pub struct DrawFrame<'a> {
    /// Interleaved x,y screen positions, two floats per vertex.
    pub positions: &'a [f32],
    /// RGBA color per vertex.
    pub colors: &'a [Rgba8],
    /// Point size per data-point vertex only.
    pub sizes: &'a [f32],
    /// Number of data-point vertices.
    pub point_count: u32,
    /// Number of trailing axis-line vertices.
    pub axis_vertex_count: u32,
}

/// External renderer consuming flat vertex buffers.
///
/// The engine issues exactly one `draw` per frame and consumes no return
/// value; whatever GPU or canvas machinery sits behind this trait is opaque
/// to the core.
pub trait PointRenderer {
    /// Draw one frame.
    fn draw(&mut self, frame: DrawFrame<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renderer that records what it was asked to draw.
    struct Recording {
        calls: usize,
        last_point_count: u32,
    }

    impl PointRenderer for Recording {
        fn draw(&mut self, frame: DrawFrame<'_>) {
            self.calls += 1;
            self.last_point_count = frame.point_count;
        }
    }

    #[test]
    fn test_renderer_receives_frame() {
        let positions = [0.0, 0.0, 1.0, 1.0];
        let colors = [Rgba8::new(0, 0, 0, 255); 2];
        let sizes = [2.0, 2.0];
        let mut renderer = Recording {
            calls: 0,
            last_point_count: 0,
        };
        renderer.draw(DrawFrame {
            positions: &positions,
            colors: &colors,
            sizes: &sizes,
            point_count: 2,
            axis_vertex_count: 0,
        });
        assert_eq!(renderer.calls, 1);
        assert_eq!(renderer.last_point_count, 2);
    }
}

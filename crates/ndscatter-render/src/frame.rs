//! The per-frame projection and buffer-fill pass.

use ndscatter_core::{DataMatrix, Projection};

use crate::buffers::{FrameBuffers, Rgba8};
use crate::camera::PerspectiveCamera;
use crate::scale::{ScreenScale, Viewport};
use crate::traits::DrawFrame;

/// Color of the labeled towards-segment of an axis guide line.
const AXIS_TOWARDS_COLOR: Rgba8 = Rgba8::new(153, 153, 153, 255);

/// Color of the faint away-segment.
const AXIS_AWAY_COLOR: Rgba8 = Rgba8::new(153, 153, 153, 64);

/// Fallback point color when a category has no resolved color.
const FALLBACK_POINT_COLOR: Rgba8 = Rgba8::new(255, 255, 255, 255);

/// How a frame maps depth onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// 2.5D: perspective offset and depth-scaled point sizes.
    #[default]
    Perspective,
    /// Flat 2D: depth only affects draw order.
    Orthographic,
}

/// View options consumed by the frame builder. Plain configuration; the
/// facade marks the frame dirty whenever one of these changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub mode: ProjectionMode,
    pub camera: PerspectiveCamera,
    /// Length of the axis guide lines in data units.
    pub axis_length: f64,
    /// Point sprite size before depth scaling, in pixels.
    pub base_point_size: f32,
    /// Painter's-algorithm ordering by projected depth.
    pub depth_sort: bool,
    /// Canvas margin in pixels kept free around the plot.
    pub margin: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::default(),
            camera: PerspectiveCamera::default(),
            axis_length: 1.0,
            base_point_size: 3.0,
            depth_sort: true,
            margin: 24.0,
        }
    }
}

/// Per-frame read-only inputs describing the dataset and selection state.
#[derive(Debug, Clone, Copy)]
pub struct SceneInputs<'a> {
    pub data: &'a DataMatrix,
    /// Category index per point.
    pub point_category: &'a [usize],
    /// Display color per category.
    pub category_colors: &'a [Rgba8],
    /// Legend filter: true hides the category. Missing entries are visible.
    pub hidden_categories: &'a [bool],
    /// Lasso selection mask per original point, when a selection is active.
    pub selected: Option<&'a [bool]>,
}

/// Screen coordinates for one axis's overlay handles, recomputed each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisHandle {
    pub axis: usize,
    /// Labeled handle at the positive axis endpoint.
    pub towards: [f32; 2],
    /// Unlabeled half-radius handle at the negative endpoint.
    pub away: [f32; 2],
    /// Which end currently faces the viewer: +1.0 or -1.0.
    pub z_sign: f64,
}

/// Builds one frame: projects data and axis endpoints, derives the screen
/// scale, fills the flat buffers in draw order, and exposes the handle
/// positions and render-order map the interaction layer needs.
#[derive(Debug)]
pub struct FrameBuilder {
    buffers: FrameBuffers,
    order: Vec<usize>,
    handles: Vec<AxisHandle>,
    scale: ScreenScale,
}

impl FrameBuilder {
    /// Allocate a builder for a dataset shape. Buffers are sized once here
    /// and overwritten on every build.
    #[must_use]
    pub fn new(npoint: usize, ndim: usize, viewport: &Viewport) -> Self {
        Self {
            buffers: FrameBuffers::allocate(npoint, ndim),
            order: (0..npoint).collect(),
            handles: Vec::with_capacity(ndim),
            scale: ScreenScale::fit(1.0, viewport, 0.0),
        }
    }

    /// Build one frame into the pre-allocated buffers.
    pub fn build(
        &mut self,
        projection: &Projection,
        inputs: &SceneInputs<'_>,
        options: &ViewOptions,
        viewport: &Viewport,
    ) {
        let npoint = inputs.data.npoint();
        let ndim = projection.ndim();
        debug_assert_eq!(npoint, self.buffers.point_count());
        debug_assert_eq!(4 * ndim, self.buffers.axis_vertex_count());

        let xyz = projection.project_xyz(inputs.data);

        // Axis endpoints in projected data space, scaled by handle length.
        let endpoints: Vec<[f64; 3]> = (0..ndim)
            .map(|a| {
                let row = projection.axis(a);
                let coord = |c: usize| options.axis_length * row.get(c).copied().unwrap_or(0.0);
                [coord(0), coord(1), if ndim >= 3 { coord(2) } else { 0.0 }]
            })
            .collect();

        // The screen domain comes from the axis endpoints, not the raw data
        // extent, so a changing field of view or handle length zooms
        // predictably instead of rescaling around outliers.
        let extent = endpoints
            .iter()
            .flat_map(|e| [e[0].abs(), e[1].abs()])
            .fold(0.0, f64::max);
        let scale = ScreenScale::fit(extent, viewport, options.margin);

        let perspective = options.mode == ProjectionMode::Perspective;
        let to_screen = |x: f64, y: f64, z: f64| -> [f32; 2] {
            let (px, py) = if perspective {
                options.camera.project(x, y, z)
            } else {
                (x, y)
            };
            [scale.x.apply(px) as f32, scale.y.apply(py) as f32]
        };

        self.order.clear();
        self.order.extend(0..npoint);
        if options.depth_sort {
            // Ascending depth: farthest first, so nearer sprites draw last.
            self.order.sort_by(|&a, &b| xyz[a][2].total_cmp(&xyz[b][2]));
        }

        let selection_active = inputs.selected.is_some();
        for (slot, &orig) in self.order.iter().enumerate() {
            let [x, y, z] = xyz[orig];
            let category = inputs.point_category.get(orig).copied().unwrap_or(0);
            let color = inputs
                .category_colors
                .get(category)
                .copied()
                .unwrap_or(FALLBACK_POINT_COLOR);

            let hidden = inputs.hidden_categories.get(category).copied().unwrap_or(false);
            let behind = perspective && options.camera.is_behind(z);
            let mut alpha = color.a;
            if hidden || behind {
                alpha = 0;
            } else if selection_active
                && !inputs
                    .selected
                    .and_then(|sel| sel.get(orig).copied())
                    .unwrap_or(false)
            {
                alpha /= 10;
            }

            let size = if perspective {
                options.base_point_size * options.camera.depth_scale(z) as f32
            } else {
                options.base_point_size
            };

            let pos = to_screen(x, y, z);
            self.buffers
                .set_point(slot, pos[0], pos[1], color.with_alpha(alpha), size);
        }

        // Axis guide lines: towards segment solid, away segment faint,
        // origin before endpoint, grouped by axis.
        self.handles.clear();
        let z_signs = projection.axis_z_signs();
        let origin = to_screen(0.0, 0.0, 0.0);
        for (a, end) in endpoints.iter().enumerate() {
            let towards = to_screen(end[0], end[1], end[2]);
            let away = to_screen(-end[0], -end[1], -end[2]);

            let base = a * 4;
            self.buffers
                .set_axis_vertex(base, origin[0], origin[1], AXIS_TOWARDS_COLOR);
            self.buffers
                .set_axis_vertex(base + 1, towards[0], towards[1], AXIS_TOWARDS_COLOR);
            self.buffers
                .set_axis_vertex(base + 2, origin[0], origin[1], AXIS_AWAY_COLOR);
            self.buffers
                .set_axis_vertex(base + 3, away[0], away[1], AXIS_AWAY_COLOR);

            self.handles.push(AxisHandle {
                axis: a,
                towards,
                away,
                z_sign: z_signs[a],
            });
        }

        self.scale = scale;
        log::trace!(
            "frame: {} points + {} axis vertices",
            npoint,
            self.buffers.axis_vertex_count()
        );
    }

    /// Borrow the built buffers for one draw call.
    #[must_use]
    pub fn frame(&self) -> DrawFrame<'_> {
        DrawFrame {
            positions: self.buffers.positions(),
            colors: self.buffers.colors(),
            sizes: self.buffers.sizes(),
            point_count: self.buffers.point_count() as u32,
            axis_vertex_count: self.buffers.axis_vertex_count() as u32,
        }
    }

    /// Render-order map: slot index to original point index.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Interleaved screen positions of the last built frame.
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        self.buffers.positions()
    }

    /// Overlay handle positions from the last built frame.
    #[must_use]
    pub fn handles(&self) -> &[AxisHandle] {
        &self.handles
    }

    /// Screen scale of the last built frame.
    #[must_use]
    pub fn scale(&self) -> &ScreenScale {
        &self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndscatter_core::linalg;

    fn identity_projection(ndim: usize) -> Projection {
        let mut p = Projection::new(ndim);
        p.set_matrix(&linalg::identity(ndim));
        p
    }

    fn simple_inputs(data: &DataMatrix) -> SceneInputs<'_> {
        SceneInputs {
            data,
            point_category: &[],
            category_colors: &[],
            hidden_categories: &[],
            selected: None,
        }
    }

    fn ortho_options() -> ViewOptions {
        ViewOptions {
            mode: ProjectionMode::Orthographic,
            depth_sort: false,
            ..ViewOptions::default()
        }
    }

    #[test]
    fn test_vertex_counts() {
        let data = DataMatrix::new(vec![0.0; 6 * 5], 6, 5);
        let projection = Projection::new(5);
        let viewport = Viewport::default();
        let mut builder = FrameBuilder::new(6, 5, &viewport);
        builder.build(
            &projection,
            &simple_inputs(&data),
            &ViewOptions::default(),
            &viewport,
        );

        let frame = builder.frame();
        assert_eq!(frame.point_count, 6);
        assert_eq!(frame.axis_vertex_count, 20);
        assert_eq!(frame.positions.len(), 2 * (6 + 20));
    }

    #[test]
    fn test_orthographic_positions_center_origin() {
        let data = DataMatrix::new(vec![0.0, 0.0, 0.0], 1, 3);
        let projection = identity_projection(3);
        let viewport = Viewport::new(400, 400, 1.0);
        let mut builder = FrameBuilder::new(1, 3, &viewport);
        builder.build(&projection, &simple_inputs(&data), &ortho_options(), &viewport);

        // The origin point lands at the canvas center.
        let frame = builder.frame();
        assert!((frame.positions[0] - 200.0).abs() < 1e-3);
        assert!((frame.positions[1] - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_axis_endpoints_stay_inside_margin() {
        let data = DataMatrix::empty(3);
        let projection = identity_projection(3);
        let viewport = Viewport::new(400, 400, 1.0);
        let mut builder = FrameBuilder::new(0, 3, &viewport);
        let options = ortho_options();
        builder.build(&projection, &simple_inputs(&data), &options, &viewport);

        for handle in builder.handles() {
            for coord in handle.towards.iter().chain(handle.away.iter()) {
                assert!(*coord >= options.margin as f32 - 1e-3);
                assert!(*coord <= 400.0 - options.margin as f32 + 1e-3);
            }
        }
    }

    #[test]
    fn test_depth_sort_orders_far_to_near() {
        // Identity basis: z is the third coordinate. Points at z = 0.5, -0.5.
        let data = DataMatrix::new(vec![0.0, 0.0, 0.5, 0.0, 0.0, -0.5], 2, 3);
        let projection = identity_projection(3);
        let viewport = Viewport::default();
        let mut builder = FrameBuilder::new(2, 3, &viewport);
        let options = ViewOptions {
            depth_sort: true,
            ..ortho_options()
        };
        builder.build(&projection, &simple_inputs(&data), &options, &viewport);

        // Farthest (index 1, z = -0.5) draws first.
        assert_eq!(builder.order(), &[1, 0]);
    }

    #[test]
    fn test_hidden_category_and_selection_dim_alpha() {
        let data = DataMatrix::new(vec![0.1, 0.1, 0.2, 0.2, 0.3, 0.3], 3, 2);
        let projection = identity_projection(2);
        let viewport = Viewport::default();
        let mut builder = FrameBuilder::new(3, 2, &viewport);

        let colors = [Rgba8::new(10, 20, 30, 255), Rgba8::new(40, 50, 60, 255)];
        let categories = [0, 1, 0];
        let hidden = [false, true];
        let selected = [true, false, false];
        let inputs = SceneInputs {
            data: &data,
            point_category: &categories,
            category_colors: &colors,
            hidden_categories: &hidden,
            selected: Some(&selected),
        };
        builder.build(&projection, &inputs, &ortho_options(), &viewport);

        let frame = builder.frame();
        // Point 0: visible and selected, full alpha.
        assert_eq!(frame.colors[0].a, 255);
        // Point 1: hidden category wins.
        assert_eq!(frame.colors[1].a, 0);
        // Point 2: visible but outside the selection, dimmed to 10%.
        assert_eq!(frame.colors[2].a, 25);
    }

    #[test]
    fn test_points_behind_perspective_camera_are_suppressed() {
        let options = ViewOptions {
            depth_sort: false,
            ..ViewOptions::default()
        };
        let z_behind = options.camera.camera_z + 1.0;
        let data = DataMatrix::new(vec![0.0, 0.0, z_behind, 0.0, 0.0, 0.0], 2, 3);
        let projection = identity_projection(3);
        let viewport = Viewport::default();
        let mut builder = FrameBuilder::new(2, 3, &viewport);
        builder.build(&projection, &simple_inputs(&data), &options, &viewport);

        let frame = builder.frame();
        assert_eq!(frame.colors[0].a, 0);
        assert_ne!(frame.colors[1].a, 0);
    }

    #[test]
    fn test_perspective_scales_point_sizes_by_depth() {
        let options = ViewOptions {
            depth_sort: false,
            ..ViewOptions::default()
        };
        // Nearer point (larger z) gets the larger sprite.
        let data = DataMatrix::new(vec![0.0, 0.0, 0.8, 0.0, 0.0, -0.8], 2, 3);
        let projection = identity_projection(3);
        let viewport = Viewport::default();
        let mut builder = FrameBuilder::new(2, 3, &viewport);
        builder.build(&projection, &simple_inputs(&data), &options, &viewport);

        let frame = builder.frame();
        assert!(frame.sizes[0] > frame.sizes[1]);
    }

    #[test]
    fn test_handles_track_axis_flip() {
        let data = DataMatrix::empty(3);
        let mut projection = identity_projection(3);
        let viewport = Viewport::new(400, 400, 1.0);
        let mut builder = FrameBuilder::new(0, 3, &viewport);
        builder.build(&projection, &simple_inputs(&data), &ortho_options(), &viewport);
        let before = builder.handles()[0].towards;

        projection.flip_axis(0);
        builder.build(&projection, &simple_inputs(&data), &ortho_options(), &viewport);
        let after = builder.handles()[0].towards;

        // The towards handle moved to the mirrored position.
        assert!((before[0] - 400.0 + after[0]).abs() < 1e-3);
        assert_eq!(builder.handles()[0].z_sign, 1.0);
    }
}

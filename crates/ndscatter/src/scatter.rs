//! The public facade composing projection, view state, interaction, and
//! scheduling.

use ndscatter_core::{Matrix, Projection};
use ndscatter_data::{ColumnSet, Dataset};
use ndscatter_render::{
    AxisHandle, FrameBuilder, PerspectiveCamera, PointRenderer, ProjectionMode, Rgba8, SceneInputs,
    ViewOptions, Viewport,
};

use crate::config::ScatterConfig;
use crate::error::ScatterError;
use crate::events::{EventBus, ScatterEvent};
use crate::input::{hit_test, PointerButton, PointerEvent, PointerTarget};
use crate::interact::{AxisDrag, Lasso};
use crate::scheduler::RenderScheduler;

/// Interactive high-dimensional scatter engine.
///
/// The host feeds [`PointerEvent`]s in, calls [`tick`](Self::tick) once per
/// display refresh, and drains [`ScatterEvent`]s whenever convenient. All
/// state lives on one logical thread; a frame always sees a consistent
/// snapshot because nothing runs concurrently with it.
pub struct Scatter {
    options: ViewOptions,
    handle_radius: f32,
    background: String,
    viewport: Viewport,

    projection: Option<Projection>,
    dataset: Option<Dataset>,
    builder: Option<FrameBuilder>,

    /// Category colors resolved to vertex colors at load time.
    colors: Vec<Rgba8>,
    /// Legend filter, one flag per category.
    hidden: Vec<bool>,
    /// Lasso selection mask per point, when active.
    selected: Option<Vec<bool>>,
    selected_indices: Vec<usize>,

    scheduler: RenderScheduler,
    bus: EventBus,
    drag: AxisDrag,
    lasso: Lasso,
}

impl Scatter {
    /// Create an engine from configuration and an explicit viewport.
    #[must_use]
    pub fn new(config: &ScatterConfig, viewport: Viewport) -> Self {
        Self {
            options: config.view_options(),
            handle_radius: config.handle_radius,
            background: config.background.clone(),
            viewport,
            projection: None,
            dataset: None,
            builder: None,
            colors: Vec::new(),
            hidden: Vec::new(),
            selected: None,
            selected_indices: Vec::new(),
            scheduler: RenderScheduler::new(),
            bus: EventBus::new(),
            drag: AxisDrag::new(),
            lasso: Lasso::new(),
        }
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Load a dataset, replacing any previous one.
    ///
    /// The projection resets to the circular basis for the new dimension
    /// count and the frame buffers are reallocated for the new shape.
    pub fn load_data(&mut self, columns: ColumnSet) -> Result<(), ScatterError> {
        let dataset = columns.load()?;
        let ndim = dataset.matrix.ndim();
        let npoint = dataset.matrix.npoint();

        self.colors = dataset
            .category_colors
            .iter()
            .map(|c| Rgba8::new(c.r, c.g, c.b, c.a))
            .collect();
        self.hidden = vec![false; dataset.categories.len()];
        self.selected = None;
        self.selected_indices.clear();
        self.drag.cancel();
        self.lasso.cancel();

        self.projection = Some(Projection::new(ndim));
        self.builder = Some(FrameBuilder::new(npoint, ndim, &self.viewport));
        self.dataset = Some(dataset);
        self.scheduler.mark_dirty();

        log::info!("loaded dataset: {npoint} points, {ndim} dimensions");
        Ok(())
    }

    /// Release the dataset and its buffers.
    pub fn clear_data(&mut self) {
        self.projection = None;
        self.dataset = None;
        self.builder = None;
        self.colors.clear();
        self.hidden.clear();
        self.selected = None;
        self.selected_indices.clear();
        self.drag.cancel();
        self.lasso.cancel();
        self.scheduler.mark_dirty();
    }

    /// Number of data dimensions, 0 before data is loaded.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.projection.as_ref().map_or(0, Projection::ndim)
    }

    /// Number of points, 0 before data is loaded.
    #[must_use]
    pub fn npoint(&self) -> usize {
        self.dataset.as_ref().map_or(0, |d| d.matrix.npoint())
    }

    /// Dimension labels in column order.
    #[must_use]
    pub fn dim_labels(&self) -> &[String] {
        self.dataset.as_ref().map_or(&[], |d| d.dim_labels.as_slice())
    }

    /// Category labels in first-seen order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        self.dataset.as_ref().map_or(&[], |d| d.categories.as_slice())
    }

    // =========================================================================
    // Projection
    // =========================================================================

    /// Snapshot of the projection matrix.
    pub fn projection(&self) -> Result<Matrix, ScatterError> {
        self.projection
            .as_ref()
            .map(Projection::matrix)
            .ok_or(ScatterError::NoData)
    }

    /// Replace the projection matrix. The input is re-orthogonalized.
    pub fn set_projection(&mut self, matrix: &Matrix) -> Result<(), ScatterError> {
        let projection = self.projection.as_mut().ok_or(ScatterError::NoData)?;
        let expected = projection.ndim();
        if matrix.len() != expected || matrix.iter().any(|row| row.len() != expected) {
            return Err(ScatterError::MatrixShape {
                expected,
                rows: matrix.len(),
                cols: matrix.first().map_or(0, Vec::len),
            });
        }
        projection.set_matrix(matrix);
        let snapshot = projection.matrix();
        self.bus.emit(ScatterEvent::Projection { matrix: snapshot });
        self.scheduler.mark_dirty();
        Ok(())
    }

    /// Copy of axis row `i`.
    pub fn axis(&self, i: usize) -> Result<Vec<f64>, ScatterError> {
        let projection = self.projection.as_ref().ok_or(ScatterError::NoData)?;
        check_axis(i, projection.ndim())?;
        Ok(projection.axis(i))
    }

    /// Replace axis row `i`, preserving its direction and re-orthogonalizing
    /// the rest.
    pub fn set_axis(&mut self, i: usize, vector: &[f64]) -> Result<(), ScatterError> {
        let projection = self.projection.as_mut().ok_or(ScatterError::NoData)?;
        let ndim = projection.ndim();
        if i >= ndim {
            return Err(ScatterError::AxisOutOfRange { axis: i, ndim });
        }
        if vector.len() != ndim {
            return Err(ScatterError::MatrixShape {
                expected: ndim,
                rows: 1,
                cols: vector.len(),
            });
        }
        projection.set_axis(i, vector);
        let snapshot = projection.matrix();
        self.bus.emit(ScatterEvent::Projection { matrix: snapshot });
        self.scheduler.mark_dirty();
        Ok(())
    }

    /// Flip which end of axis `i` faces the viewer.
    pub fn flip_axis(&mut self, i: usize) -> Result<(), ScatterError> {
        let projection = self.projection.as_mut().ok_or(ScatterError::NoData)?;
        check_axis(i, projection.ndim())?;
        projection.flip_axis(i);
        let snapshot = projection.matrix();
        self.bus.emit(ScatterEvent::Projection { matrix: snapshot });
        self.scheduler.mark_dirty();
        Ok(())
    }

    /// Depth sign per axis; empty before data is loaded.
    #[must_use]
    pub fn axis_z_signs(&self) -> Vec<f64> {
        self.projection
            .as_ref()
            .map_or_else(Vec::new, Projection::axis_z_signs)
    }


    // =========================================================================
    // View options
    // =========================================================================

    /// Current view options.
    #[must_use]
    pub fn view_options(&self) -> &ViewOptions {
        &self.options
    }

    /// Switch between perspective and orthographic rendering.
    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.options.mode = mode;
        self.scheduler.mark_dirty();
    }

    /// Current projection mode.
    #[must_use]
    pub fn projection_mode(&self) -> ProjectionMode {
        self.options.mode
    }

    /// Field of view in degrees.
    #[must_use]
    pub fn view_angle(&self) -> f64 {
        self.options.camera.view_angle()
    }

    /// Set the field of view in degrees.
    pub fn set_view_angle(&mut self, degrees: f64) {
        self.options.camera.set_view_angle(degrees);
        self.scheduler.mark_dirty();
    }

    /// The perspective camera.
    #[must_use]
    pub fn camera(&self) -> PerspectiveCamera {
        self.options.camera
    }

    /// Set the camera position along the depth axis.
    pub fn set_camera_z(&mut self, camera_z: f64) {
        self.options.camera.camera_z = camera_z;
        self.scheduler.mark_dirty();
    }

    /// Set the lower bound for depth size attenuation.
    pub fn set_min_depth_scale(&mut self, min: f64) {
        self.options.camera.min_depth_scale = min;
        self.scheduler.mark_dirty();
    }

    /// Axis guide-line length in data units.
    #[must_use]
    pub fn axis_length(&self) -> f64 {
        self.options.axis_length
    }

    /// Set the axis guide-line length.
    pub fn set_axis_length(&mut self, length: f64) {
        self.options.axis_length = length;
        self.scheduler.mark_dirty();
    }

    /// Set the point sprite size in pixels.
    pub fn set_base_point_size(&mut self, size: f32) {
        self.options.base_point_size = size;
        self.scheduler.mark_dirty();
    }

    /// Enable or disable painter's-algorithm depth sorting.
    pub fn set_depth_sort(&mut self, enabled: bool) {
        self.options.depth_sort = enabled;
        self.scheduler.mark_dirty();
    }

    /// Background color hex string for the host renderer.
    #[must_use]
    pub fn background(&self) -> &str {
        &self.background
    }

    // =========================================================================
    // Selection and legend
    // =========================================================================

    /// Original indices of the current selection, in match order.
    #[must_use]
    pub fn selected_points(&self) -> &[usize] {
        &self.selected_indices
    }

    /// Select points programmatically.
    pub fn select(&mut self, indices: &[usize]) -> Result<(), ScatterError> {
        if self.dataset.is_none() {
            return Err(ScatterError::NoData);
        }
        self.apply_selection(indices.to_vec());
        self.bus.emit(ScatterEvent::Select {
            indices: self.selected_indices.clone(),
        });
        self.scheduler.mark_dirty();
        Ok(())
    }

    /// Clear the selection, notifying subscribers.
    pub fn clear_selection(&mut self) {
        if self.selected.is_none() {
            return;
        }
        self.selected = None;
        self.selected_indices.clear();
        self.bus.emit(ScatterEvent::Lasso { indices: None });
        self.bus.emit(ScatterEvent::Select { indices: Vec::new() });
        self.scheduler.mark_dirty();
    }

    /// Hide or show a category (legend filter).
    pub fn set_category_hidden(&mut self, category: usize, hidden: bool) {
        if let Some(flag) = self.hidden.get_mut(category) {
            if *flag != hidden {
                *flag = hidden;
                self.scheduler.mark_dirty();
            }
        }
    }

    /// Whether a category is currently hidden.
    #[must_use]
    pub fn category_hidden(&self, category: usize) -> bool {
        self.hidden.get(category).copied().unwrap_or(false)
    }

    fn apply_selection(&mut self, indices: Vec<usize>) {
        let npoint = self.npoint();
        let mut mask = vec![false; npoint];
        for &i in &indices {
            if let Some(slot) = mask.get_mut(i) {
                *slot = true;
            }
        }
        self.selected = Some(mask);
        self.selected_indices = indices;
    }

    // =========================================================================
    // Pointer interaction
    // =========================================================================

    /// Feed a pointer event through the drag, flip, and lasso machines.
    pub fn pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                x,
                y,
                button: PointerButton::Primary,
                modifiers,
            } => {
                let target = match &self.builder {
                    Some(builder) => hit_test(builder.handles(), x, y, self.handle_radius),
                    None => return,
                };
                match target {
                    PointerTarget::Handle { axis, .. } => {
                        if modifiers.alt {
                            // Modifier-click flips without entering the drag
                            // machine.
                            let _ = self.flip_axis(axis);
                        } else {
                            self.lasso.cancel();
                            self.drag.begin(axis, [x, y]);
                        }
                    }
                    PointerTarget::Background => {
                        if modifiers.shift && !self.drag.is_dragging() {
                            self.lasso.begin([x, y]);
                            self.scheduler.mark_dirty();
                        }
                    }
                }
            }
            PointerEvent::Down { .. } => {}
            PointerEvent::Move { x, y } => {
                if self.drag.is_dragging() {
                    let changed = match (self.projection.as_mut(), self.builder.as_ref()) {
                        (Some(projection), Some(builder)) => {
                            let scale = *builder.scale();
                            self.drag.drag_to([x, y], &scale, projection)
                        }
                        _ => false,
                    };
                    if changed {
                        let snapshot = self.projection.as_ref().expect("dragging").matrix();
                        self.bus.emit(ScatterEvent::Projection { matrix: snapshot });
                        self.scheduler.mark_dirty();
                    }
                } else if self.lasso.extend([x, y]) {
                    // Live preview path changed.
                    self.scheduler.mark_dirty();
                }
            }
            PointerEvent::Up { .. } => {
                if self.drag.end() {
                    return;
                }
                let result = match (&self.builder, &self.dataset) {
                    (Some(builder), Some(dataset)) => self.lasso.finish(
                        builder.positions(),
                        dataset.matrix.npoint(),
                        builder.order(),
                    ),
                    _ => {
                        self.lasso.cancel();
                        None
                    }
                };
                match result {
                    Some(indices) if !indices.is_empty() => {
                        self.apply_selection(indices);
                        self.bus.emit(ScatterEvent::Lasso {
                            indices: Some(self.selected_indices.clone()),
                        });
                        self.bus.emit(ScatterEvent::Select {
                            indices: self.selected_indices.clone(),
                        });
                        self.scheduler.mark_dirty();
                    }
                    Some(_) => self.clear_selection(),
                    None => {}
                }
            }
            PointerEvent::DoubleClick { .. } | PointerEvent::Cancel => {
                self.drag.cancel();
                self.lasso.cancel();
                self.clear_selection();
                self.scheduler.mark_dirty();
            }
        }
    }

    /// Live lasso preview path, for the overlay collaborator.
    #[must_use]
    pub fn lasso_path(&self) -> &[[f32; 2]] {
        self.lasso.path()
    }

    /// Per-axis handle screen coordinates from the last built frame.
    #[must_use]
    pub fn handle_positions(&self) -> &[AxisHandle] {
        self.builder.as_ref().map_or(&[], FrameBuilder::handles)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Resume rendering; schedules a frame if state is dirty.
    pub fn play(&mut self) {
        self.scheduler.play();
    }

    /// Pause rendering, canceling any pending frame.
    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    /// Whether rendering is enabled.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.scheduler.is_enabled()
    }

    /// Update the viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.bus.emit(ScatterEvent::Resize { width, height });
        self.scheduler.mark_dirty();
    }

    /// Update the device pixel ratio.
    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.viewport.pixel_ratio = pixel_ratio;
        self.scheduler.mark_dirty();
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Build and draw one frame if one is due.
    ///
    /// Returns true when a frame was emitted. With no data loaded the pending
    /// frame is consumed as a no-op.
    pub fn tick(&mut self, renderer: &mut dyn PointRenderer) -> bool {
        if !self.scheduler.take_frame() {
            return false;
        }
        let (Some(projection), Some(dataset), Some(builder)) = (
            self.projection.as_ref(),
            self.dataset.as_ref(),
            self.builder.as_mut(),
        ) else {
            return false;
        };

        let inputs = SceneInputs {
            data: &dataset.matrix,
            point_category: &dataset.point_category,
            category_colors: &self.colors,
            hidden_categories: &self.hidden,
            selected: self.selected.as_deref(),
        };
        builder.build(projection, &inputs, &self.options, &self.viewport);
        renderer.draw(builder.frame());
        true
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Drain pending notifications in the order their mutations happened.
    #[must_use]
    pub fn drain_events(&mut self) -> Vec<ScatterEvent> {
        self.bus.take()
    }

    /// Whether any notifications are pending.
    #[must_use]
    pub fn has_events(&self) -> bool {
        self.bus.has_events()
    }
}

fn check_axis(axis: usize, ndim: usize) -> Result<(), ScatterError> {
    if axis >= ndim {
        return Err(ScatterError::AxisOutOfRange { axis, ndim });
    }
    Ok(())
}

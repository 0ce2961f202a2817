//! Perspective camera math.

/// Pure value object converting a depth coordinate into a 2D screen offset
/// and a size-scaling factor.
///
/// `project` performs no clamping: a point exactly at `z == camera_z` divides
/// by zero. The frame builder separately zeroes the alpha of any point at or
/// behind the camera, so that singularity never becomes visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Camera position along the depth axis, looking toward the origin.
    pub camera_z: f64,
    /// Distance from the camera to the image plane.
    pub focal_length: f64,
    /// Lower bound for [`depth_scale`](Self::depth_scale).
    pub min_depth_scale: f64,
}

impl PerspectiveCamera {
    /// Default view angle in degrees.
    pub const DEFAULT_VIEW_ANGLE: f64 = 40.0;

    /// Create a camera from an explicit focal length.
    #[must_use]
    pub fn new(camera_z: f64, focal_length: f64, min_depth_scale: f64) -> Self {
        Self {
            camera_z,
            focal_length,
            min_depth_scale,
        }
    }

    /// Create a camera from a field-of-view angle in degrees.
    #[must_use]
    pub fn from_view_angle(camera_z: f64, view_angle: f64, min_depth_scale: f64) -> Self {
        Self::new(camera_z, Self::fov_to_focal_length(view_angle), min_depth_scale)
    }

    /// Perspective-project a 3D point onto the image plane.
    #[must_use]
    pub fn project(&self, x: f64, y: f64, z: f64) -> (f64, f64) {
        let scale = self.focal_length / (self.camera_z - z);
        (x * scale, y * scale)
    }

    /// Size attenuation factor for depth `z`, clamped to
    /// `[min_depth_scale, 1.0]`.
    #[must_use]
    pub fn depth_scale(&self, z: f64) -> f64 {
        let scale = self.focal_length / (self.focal_length + (self.camera_z - z));
        scale.clamp(self.min_depth_scale, 1.0)
    }

    /// True when `z` is at or behind the camera plane.
    #[must_use]
    pub fn is_behind(&self, z: f64) -> bool {
        z >= self.camera_z
    }

    /// Focal length for a field-of-view angle in degrees.
    #[must_use]
    pub fn fov_to_focal_length(view_angle: f64) -> f64 {
        1.0 / (view_angle * std::f64::consts::PI / 360.0).tan()
    }

    /// Field-of-view angle in degrees for a focal length.
    #[must_use]
    pub fn focal_length_to_fov(focal_length: f64) -> f64 {
        (1.0 / focal_length).atan() * 360.0 / std::f64::consts::PI
    }

    /// Replace the focal length, keeping position and clamp.
    pub fn set_view_angle(&mut self, view_angle: f64) {
        self.focal_length = Self::fov_to_focal_length(view_angle);
    }

    /// Current field of view in degrees.
    #[must_use]
    pub fn view_angle(&self) -> f64 {
        Self::focal_length_to_fov(self.focal_length)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_view_angle(3.0, Self::DEFAULT_VIEW_ANGLE, 0.2)
    }
}

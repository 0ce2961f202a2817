//! Pre-allocated flat vertex buffers.

/// An 8-bit RGBA vertex color, tightly packed for the renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Flat per-frame vertex buffers: positions as x,y pairs, colors as RGBA
/// quads, sizes for the data-point vertices only.
///
/// Capacity is `npoint + 4 * ndim` vertices (each axis draws a towards and an
/// away segment, two vertices each). Buffers are allocated once per data load,
/// overwritten every frame, and never resized mid-frame. The external renderer
/// only reads them for the duration of one draw call.
#[derive(Debug, Clone)]
pub struct FrameBuffers {
    positions: Vec<f32>,
    colors: Vec<Rgba8>,
    sizes: Vec<f32>,
    npoint: usize,
    ndim: usize,
}

impl FrameBuffers {
    /// Allocate buffers for `npoint` data points and `ndim` axes.
    #[must_use]
    pub fn allocate(npoint: usize, ndim: usize) -> Self {
        let capacity = npoint + 4 * ndim;
        Self {
            positions: vec![0.0; capacity * 2],
            colors: vec![Rgba8::TRANSPARENT; capacity],
            sizes: vec![0.0; npoint],
            npoint,
            ndim,
        }
    }

    /// Number of data-point vertices.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.npoint
    }

    /// Number of trailing axis-line vertices.
    #[must_use]
    pub fn axis_vertex_count(&self) -> usize {
        4 * self.ndim
    }

    /// Total vertex capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.npoint + 4 * self.ndim
    }

    /// Write a data-point vertex at render slot `slot`.
    pub fn set_point(&mut self, slot: usize, x: f32, y: f32, color: Rgba8, size: f32) {
        debug_assert!(slot < self.npoint);
        self.positions[slot * 2] = x;
        self.positions[slot * 2 + 1] = y;
        self.colors[slot] = color;
        self.sizes[slot] = size;
    }

    /// Write axis-line vertex `k` (0-based within the axis block).
    pub fn set_axis_vertex(&mut self, k: usize, x: f32, y: f32, color: Rgba8) {
        debug_assert!(k < self.axis_vertex_count());
        let slot = self.npoint + k;
        self.positions[slot * 2] = x;
        self.positions[slot * 2 + 1] = y;
        self.colors[slot] = color;
    }

    /// Interleaved x,y positions for all vertices.
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// RGBA color per vertex.
    #[must_use]
    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }

    /// Point size per data-point vertex.
    #[must_use]
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }
}

//! Viewport and screen-scale mapping.
//!
//! The viewport is explicit configuration passed in by the host; the engine
//! never reads window size or pixel ratio from ambient globals. The screen
//! scale maps a symmetric data-space domain to the margin-adjusted pixel
//! range so the origin is always centered and every axis endpoint stays
//! visible.

/// Canvas dimensions in logical pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
    /// Device pixel ratio for the renderer's backing store.
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Width of the backing store in physical pixels.
    #[must_use]
    pub fn physical_width(&self) -> u32 {
        (self.width as f64 * self.pixel_ratio).round() as u32
    }

    /// Height of the backing store in physical pixels.
    #[must_use]
    pub fn physical_height(&self) -> u32 {
        (self.height as f64 * self.pixel_ratio).round() as u32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(640, 480, 1.0)
    }
}

/// One-dimensional linear mapping between a data domain and a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a scale from domain to range.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        debug_assert!(domain.1 != domain.0);
        Self { domain, range }
    }

    /// Map a data value to pixels.
    #[must_use]
    pub fn apply(&self, v: f64) -> f64 {
        let t = (v - self.domain.0) / (self.domain.1 - self.domain.0);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Map a pixel value back to data space.
    #[must_use]
    pub fn invert(&self, px: f64) -> f64 {
        let t = (px - self.range.0) / (self.range.1 - self.range.0);
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }

    /// Convert a pixel delta to a data-space delta.
    ///
    /// Inverting the delta rather than an absolute position avoids any
    /// scale-origin bias.
    #[must_use]
    pub fn invert_delta(&self, dpx: f64) -> f64 {
        self.invert(dpx) - self.invert(0.0)
    }
}

/// Paired X/Y scales from a symmetric data domain to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenScale {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl ScreenScale {
    /// Fit the symmetric domain `[-extent, extent]` into the viewport.
    ///
    /// Both axes use the smaller canvas dimension minus the margin, so the
    /// mapping is square, the origin lands at the canvas center, and screen Y
    /// grows downward.
    #[must_use]
    pub fn fit(extent: f64, viewport: &Viewport, margin: f64) -> Self {
        let extent = extent.max(1e-6);
        let half = (viewport.width.min(viewport.height) as f64 / 2.0 - margin).max(1.0);
        let cx = viewport.width as f64 / 2.0;
        let cy = viewport.height as f64 / 2.0;

        Self {
            x: LinearScale::new((-extent, extent), (cx - half, cx + half)),
            y: LinearScale::new((-extent, extent), (cy + half, cy - half)),
        }
    }
}

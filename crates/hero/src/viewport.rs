/// Smallest aspect ratio handed to the projection; keeps zero-height containers finite.
pub const MIN_ASPECT: f32 = 1e-6;
/// Default cap on the device pixel ratio used to size the output buffer.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Size of the hero container plus the display scale it is shown at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical (CSS-like) width.
    pub width: f32,
    /// Logical (CSS-like) height.
    pub height: f32,
    /// Device pixel ratio already clamped to the configured maximum.
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32, max_pixel_ratio: f32) -> Self {
        let cap = if max_pixel_ratio > 0.0 {
            max_pixel_ratio
        } else {
            MAX_PIXEL_RATIO
        };
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio.min(cap)
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio,
        }
    }

    /// Builds a viewport from a physical surface size and the window scale factor.
    pub fn from_physical(width: u32, height: u32, scale_factor: f64, max_pixel_ratio: f32) -> Self {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        Self::new(
            (f64::from(width) / scale) as f32,
            (f64::from(height) / scale) as f32,
            scale as f32,
            max_pixel_ratio,
        )
    }

    pub fn aspect(&self) -> f32 {
        clamped_aspect(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer_size().0 == 0 || self.buffer_size().1 == 0
    }

    /// Output buffer size in device pixels.
    pub fn buffer_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        )
    }
}

/// `width / height`, clamped to [`MIN_ASPECT`] and never dividing by zero.
pub fn clamped_aspect(width: f32, height: f32) -> f32 {
    if height <= 0.0 || !height.is_finite() {
        return MIN_ASPECT;
    }
    let aspect = width / height;
    if aspect.is_finite() {
        aspect.max(MIN_ASPECT)
    } else {
        MIN_ASPECT
    }
}

/// Horizontal scale applied to the centred pointer coordinate.
pub const POINTER_SCALE_X: f32 = 0.4;
/// Vertical scale; negative because screen Y grows downward while camera Y grows upward.
pub const POINTER_SCALE_Y: f32 = -0.3;

/// Bounding box of the hero container in the host's pointer coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ContainerRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A container anchored at the origin, as a window's client area is.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

/// Pointer position relative to the container centre, pre-scaled for the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

/// Maps a pointer position to the camera target offset.
///
/// Zero-sized containers yield the neutral offset instead of NaN.
pub fn normalized_offset(rect: &ContainerRect, pointer_x: f32, pointer_y: f32) -> PointerOffset {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return PointerOffset::default();
    }
    PointerOffset {
        x: ((pointer_x - rect.left) / rect.width - 0.5) * POINTER_SCALE_X,
        y: ((pointer_y - rect.top) / rect.height - 0.5) * POINTER_SCALE_Y,
    }
}

/// Keeps the most recent pointer sample; smoothing happens in the updater.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSampler {
    latest: PointerOffset,
}

impl PointerSampler {
    pub fn handle_pointer_moved(
        &mut self,
        rect: &ContainerRect,
        pointer_x: f32,
        pointer_y: f32,
    ) -> PointerOffset {
        self.latest = normalized_offset(rect, pointer_x, pointer_y);
        self.latest
    }

    pub fn latest(&self) -> PointerOffset {
        self.latest
    }
}

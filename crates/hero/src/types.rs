use std::fmt;

/// Anti-aliasing policy for the mesh pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Antialiasing {
    /// Pick the highest sample count supported by the surface format.
    #[default]
    Auto,
    /// Disable MSAA and render directly into the swapchain.
    Off,
    /// Request a specific MSAA sample count (clamped to what the device supports).
    Samples(u32),
}

/// Accessibility preference for decorative motion.
///
/// `Reduce` mirrors the browser's `prefers-reduced-motion: reduce` signal. The
/// hero keeps animating under `Reduce`, just at a lower rotation rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    #[default]
    NoPreference,
    Reduce,
}

impl MotionPreference {
    pub fn from_reduced(reduced: bool) -> Self {
        if reduced {
            Self::Reduce
        } else {
            Self::NoPreference
        }
    }

    pub fn is_reduced(self) -> bool {
        matches!(self, Self::Reduce)
    }

    pub fn toggled(self) -> Self {
        Self::from_reduced(!self.is_reduced())
    }
}

impl fmt::Display for MotionPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionPreference::NoPreference => f.write_str("no-preference"),
            MotionPreference::Reduce => f.write_str("reduce"),
        }
    }
}

/// Immutable configuration passed to the hero window at start-up.
///
/// `HeroConfig` mirrors CLI flags and the `[hero]` config section: how large
/// the window should be, how often to draw, and which motion preference the
/// host reports at mount time.
#[derive(Debug, Clone)]
pub struct HeroConfig {
    /// Initial window size in logical pixels.
    pub surface_size: (u32, u32),
    /// Optional FPS cap; `None` renders on every refresh.
    pub target_fps: Option<f32>,
    /// Anti-aliasing mode requested by the caller.
    pub antialiasing: Antialiasing,
    /// Motion preference reported by the host at mount.
    pub motion: MotionPreference,
    /// Upper bound applied to the display scale factor when sizing the output buffer.
    pub max_pixel_ratio: f32,
    /// Window title.
    pub title: String,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            target_fps: None,
            antialiasing: Antialiasing::default(),
            motion: MotionPreference::default(),
            max_pixel_ratio: crate::viewport::MAX_PIXEL_RATIO,
            title: "HiredPath".to_string(),
        }
    }
}

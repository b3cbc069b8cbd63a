use serde::{Deserialize, Serialize};

use crate::MotionError;

/// Scroll-linked translation for decorative layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parallax {
    /// Scroll offset at which the layer sits at rest.
    pub anchor: f32,
    /// Pixels of translation per pixel scrolled.
    pub speed: f32,
    /// Optional bound on the translation magnitude.
    pub max_offset: Option<f32>,
}

impl Parallax {
    pub fn new(anchor: f32, speed: f32, max_offset: Option<f32>) -> Result<Self, MotionError> {
        if !speed.is_finite() {
            return Err(MotionError::invalid(
                "effects.parallax_speed",
                "must be a finite number",
            ));
        }
        if max_offset.is_some_and(|max| !(max.is_finite() && max >= 0.0)) {
            return Err(MotionError::invalid(
                "effects.parallax_max_offset",
                "must be a non-negative number",
            ));
        }
        Ok(Self {
            anchor,
            speed,
            max_offset,
        })
    }

    /// Vertical translation for the given scroll offset.
    pub fn offset(&self, scroll: f32, reduced_motion: bool) -> f32 {
        if reduced_motion || !scroll.is_finite() {
            return 0.0;
        }
        let offset = -(scroll - self.anchor) * self.speed;
        match self.max_offset {
            Some(max) => offset.clamp(-max, max),
            None => offset,
        }
    }
}

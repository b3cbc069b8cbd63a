//! Pointer-driven 3D tilt for feature cards.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::damp;
use crate::MotionError;

/// Rate at which the card eases toward its target angle.
pub const TILT_LAMBDA: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TiltAngles {
    /// Degrees about the horizontal axis.
    pub rotate_x: f32,
    /// Degrees about the vertical axis.
    pub rotate_y: f32,
}

/// Card bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CardBounds {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left
            && x <= self.left + self.width
            && y >= self.top
            && y <= self.top + self.height
    }
}

#[derive(Debug, Clone)]
pub struct Tilt {
    bounds: CardBounds,
    max_degrees: f32,
    reduced_motion: bool,
    target: TiltAngles,
    current: TiltAngles,
}

impl Tilt {
    pub fn new(bounds: CardBounds, max_degrees: f32, reduced_motion: bool) -> Result<Self, MotionError> {
        if !(max_degrees.is_finite() && (0.0..=45.0).contains(&max_degrees)) {
            return Err(MotionError::invalid(
                "effects.tilt_max_degrees",
                "must be between 0 and 45",
            ));
        }
        Ok(Self {
            bounds,
            max_degrees,
            reduced_motion,
            target: TiltAngles::default(),
            current: TiltAngles::default(),
        })
    }

    pub fn angles(&self) -> TiltAngles {
        self.current
    }

    pub fn target(&self) -> TiltAngles {
        self.target
    }

    pub fn set_bounds(&mut self, bounds: CardBounds) {
        self.bounds = bounds;
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
        if reduced_motion {
            self.target = TiltAngles::default();
            self.current = TiltAngles::default();
        }
    }

    /// Pointer position in viewport coordinates; outside the card acts as a leave.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.reduced_motion || !self.bounds.contains(x, y) {
            self.target = TiltAngles::default();
            return;
        }
        let width = self.bounds.width.max(f32::EPSILON);
        let height = self.bounds.height.max(f32::EPSILON);
        let nx = (x - self.bounds.left) / width;
        let ny = (y - self.bounds.top) / height;
        self.target = TiltAngles {
            rotate_x: -(ny - 0.5) * 2.0 * self.max_degrees,
            rotate_y: (nx - 0.5) * 2.0 * self.max_degrees,
        };
    }

    pub fn pointer_left(&mut self) {
        self.target = TiltAngles::default();
    }

    pub fn tick(&mut self, dt: Duration) -> TiltAngles {
        if self.reduced_motion {
            return self.current;
        }
        let dt = dt.as_secs_f32();
        self.current = TiltAngles {
            rotate_x: damp(self.current.rotate_x, self.target.rotate_x, TILT_LAMBDA, dt),
            rotate_y: damp(self.current.rotate_y, self.target.rotate_y, TILT_LAMBDA, dt),
        };
        self.current
    }
}

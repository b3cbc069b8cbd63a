//! Smoothed page scrolling.
//!
//! Input moves a *target* offset immediately; the visible offset chases it
//! with [`damp`] each frame (`lambda = lerp·60`, so `lerp` reads as "fraction
//! per 60 Hz frame"). Once the rounded offset equals the target the animation
//! snaps and stops.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::damp;
use crate::MotionError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollOptions {
    pub lerp: f32,
    pub wheel_multiplier: f32,
    pub smooth_wheel: bool,
    pub smooth_touch: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            lerp: 0.12,
            wheel_multiplier: 1.0,
            smooth_wheel: true,
            smooth_touch: false,
        }
    }
}

impl ScrollOptions {
    pub fn validate(&self) -> Result<(), MotionError> {
        if !(self.lerp > 0.0 && self.lerp <= 1.0) {
            return Err(MotionError::invalid("scroll.lerp", "must be in (0, 1]"));
        }
        if !(self.wheel_multiplier.is_finite() && self.wheel_multiplier > 0.0) {
            return Err(MotionError::invalid(
                "scroll.wheel_multiplier",
                "must be a positive number",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollInput {
    Wheel,
    Touch,
}

/// What a frame of scrolling produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollFrame {
    pub position: f32,
    pub target: f32,
    pub is_scrolling: bool,
}

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    options: ScrollOptions,
    reduced_motion: bool,
    limit: f32,
    target: f32,
    position: f32,
    is_scrolling: bool,
}

impl SmoothScroll {
    /// `limit` is the maximum scroll offset (document height minus viewport).
    pub fn new(options: ScrollOptions, limit: f32, reduced_motion: bool) -> Result<Self, MotionError> {
        options.validate()?;
        Ok(Self {
            options,
            reduced_motion,
            limit: sanitize_limit(limit),
            target: 0.0,
            position: 0.0,
            is_scrolling: false,
        })
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
        if reduced_motion {
            self.jump(self.target);
        }
    }

    /// Applies one input delta (pixels; positive scrolls down).
    pub fn input(&mut self, kind: ScrollInput, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        let (delta, smooth) = match kind {
            ScrollInput::Wheel => (
                delta * self.options.wheel_multiplier,
                self.options.smooth_wheel,
            ),
            ScrollInput::Touch => (delta, self.options.smooth_touch),
        };
        let target = self.target + delta;
        self.scroll_to(target, !smooth);
    }

    /// Moves to `target` (clamped to `[0, limit]`); `immediate` skips the animation.
    pub fn scroll_to(&mut self, target: f32, immediate: bool) {
        if !target.is_finite() {
            return;
        }
        let target = target.clamp(0.0, self.limit);
        if immediate || self.reduced_motion {
            self.jump(target);
        } else {
            self.target = target;
            self.is_scrolling = self.position != target;
        }
    }

    /// Updates the scroll limit after the document or viewport changed size.
    pub fn resize(&mut self, limit: f32) {
        self.limit = sanitize_limit(limit);
        self.target = self.target.clamp(0.0, self.limit);
        if self.position > self.limit {
            self.jump(self.target);
        }
    }

    pub fn tick(&mut self, dt: Duration) -> ScrollFrame {
        if self.is_scrolling {
            let lambda = self.options.lerp * 60.0;
            self.position = damp(self.position, self.target, lambda, dt.as_secs_f32());
            if self.position.round() == self.target.round() {
                self.position = self.target;
                self.is_scrolling = false;
            }
        }
        self.frame()
    }

    pub fn frame(&self) -> ScrollFrame {
        ScrollFrame {
            position: self.position,
            target: self.target,
            is_scrolling: self.is_scrolling,
        }
    }

    fn jump(&mut self, target: f32) {
        self.target = target;
        self.position = target;
        self.is_scrolling = false;
    }
}

fn sanitize_limit(limit: f32) -> f32 {
    if limit.is_finite() {
        limit.max(0.0)
    } else {
        0.0
    }
}

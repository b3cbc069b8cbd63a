//! Page motion effects for the HiredPath landing page.
//!
//! Each effect is a small state machine driven by explicit inputs (scroll
//! offsets, pointer positions, frame deltas) so hosts decide where time comes
//! from. Every effect honours a reduced-motion flag: under it, content is
//! shown in its final state and nothing moves.

pub mod count_up;
pub mod duration;
pub mod easing;
pub mod parallax;
pub mod reveal;
pub mod scroll;
pub mod tilt;
pub mod typewriter;

pub use count_up::{CountUp, CountUpFrame};
pub use easing::{damp, lerp, Curve};
pub use parallax::Parallax;
pub use reveal::{ElementSpan, RevealChange, RevealOptions, RevealTracker};
pub use scroll::{ScrollFrame, ScrollInput, ScrollOptions, SmoothScroll};
pub use tilt::{CardBounds, Tilt, TiltAngles};
pub use typewriter::{Typewriter, TypewriterFrame, TypewriterOptions, TypewriterPhase};

#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl MotionError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        MotionError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

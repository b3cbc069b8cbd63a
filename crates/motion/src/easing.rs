use serde::{Deserialize, Serialize};

/// Shape applied to a normalised `[0, 1]` progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Curve {
    Linear,
    Smoothstep,
    EaseInOut,
    #[default]
    EaseOutCubic,
}

impl Curve {
    /// Samples the curve; inputs outside `[0, 1]` are clamped.
    pub fn sample(self, t: f32) -> f32 {
        let clamped = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Curve::Linear => clamped,
            Curve::Smoothstep => clamped * clamped * (3.0 - 2.0 * clamped),
            Curve::EaseInOut => {
                if clamped < 0.5 {
                    2.0 * clamped * clamped
                } else {
                    -1.0 + (4.0 - 2.0 * clamped) * clamped
                }
            }
            Curve::EaseOutCubic => 1.0 - (1.0 - clamped).powi(3),
        }
    }
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Frame-rate independent exponential approach toward `target`.
///
/// `lerp(current, target, 1 − e^(−lambda·dt))`; `dt` is in seconds.
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return current;
    }
    lerp(current, target, 1.0 - (-lambda * dt).exp())
}

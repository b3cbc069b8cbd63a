//! Animated statistic counters (`0 → 94.7%`).

use std::time::Duration;

use serde::Serialize;

use crate::easing::Curve;
use crate::MotionError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountUpFrame {
    pub value: f64,
    pub text: String,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct CountUp {
    target: f64,
    decimals: usize,
    suffix: String,
    duration: Duration,
    curve: Curve,
    reduced_motion: bool,
    elapsed: Option<Duration>,
}

impl CountUp {
    pub fn new(
        target: f64,
        decimals: usize,
        suffix: impl Into<String>,
        duration: Duration,
        reduced_motion: bool,
    ) -> Result<Self, MotionError> {
        if !target.is_finite() {
            return Err(MotionError::invalid("count_up.target", "must be finite"));
        }
        if decimals > 6 {
            return Err(MotionError::invalid(
                "count_up.decimals",
                "at most 6 decimal places are supported",
            ));
        }
        Ok(Self {
            target,
            decimals,
            suffix: suffix.into(),
            duration,
            curve: Curve::EaseOutCubic,
            reduced_motion,
            elapsed: None,
        })
    }

    /// Parses display text such as `"94.7%"` into a counter for that value.
    pub fn from_display(text: &str, duration: Duration, reduced_motion: bool) -> Result<Self, MotionError> {
        let trimmed = text.trim();
        let split = trimmed
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
            .unwrap_or(trimmed.len());
        let (number, suffix) = trimmed.split_at(split);
        let target: f64 = number
            .parse()
            .map_err(|_| MotionError::invalid("count_up.target", format!("'{text}' is not a number")))?;
        let decimals = number
            .split_once('.')
            .map(|(_, fraction)| fraction.len())
            .unwrap_or(0);
        Self::new(target, decimals, suffix, duration, reduced_motion)
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_started(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Starts the animation; typically called when the element is revealed.
    pub fn trigger(&mut self) {
        if self.elapsed.is_none() {
            self.elapsed = Some(Duration::ZERO);
        }
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
    }

    pub fn tick(&mut self, dt: Duration) -> CountUpFrame {
        if let Some(elapsed) = self.elapsed.as_mut() {
            *elapsed = elapsed.saturating_add(dt);
        }
        self.frame()
    }

    pub fn frame(&self) -> CountUpFrame {
        let (value, finished) = if self.reduced_motion {
            (self.target, true)
        } else {
            match self.elapsed {
                None => (0.0, false),
                Some(elapsed) => {
                    let progress = if self.duration.is_zero() {
                        1.0
                    } else {
                        elapsed.as_secs_f64() / self.duration.as_secs_f64()
                    };
                    let finished = progress >= 1.0;
                    let eased = f64::from(self.curve.sample(progress as f32));
                    let value = if finished { self.target } else { self.target * eased };
                    (value, finished)
                }
            }
        };
        CountUpFrame {
            value,
            text: format!("{value:.prec$}{suffix}", prec = self.decimals, suffix = self.suffix),
            finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_is_parsed() {
        let counter = CountUp::from_display("94.7%", Duration::from_secs(2), false).expect("valid");
        assert_eq!(counter.target(), 94.7);
        assert_eq!(counter.frame().text, "0.0%");
    }

    #[test]
    fn counter_waits_for_trigger() {
        let mut counter = CountUp::new(50.0, 0, "", Duration::from_secs(1), false).expect("valid");
        assert_eq!(counter.tick(Duration::from_secs(5)).value, 0.0);
        counter.trigger();
        let half = counter.tick(Duration::from_millis(500));
        assert!((half.value - 43.75).abs() < 1e-3);
        assert!(!half.finished);
        let done = counter.tick(Duration::from_millis(600));
        assert_eq!(done.value, 50.0);
        assert!(done.finished);
        assert_eq!(done.text, "50");
    }

    #[test]
    fn values_rise_monotonically() {
        let mut counter = CountUp::new(26.5, 1, "%", Duration::from_secs(2), false).expect("valid");
        counter.trigger();
        let mut last = 0.0;
        for _ in 0..150 {
            let frame = counter.tick(Duration::from_millis(16));
            assert!(frame.value >= last);
            last = frame.value;
        }
        assert_eq!(counter.frame().text, "26.5%");
    }

    #[test]
    fn reduced_motion_shows_the_final_value() {
        let counter = CountUp::from_display("78.3%", Duration::from_secs(2), true).expect("valid");
        let frame = counter.frame();
        assert_eq!(frame.text, "78.3%");
        assert!(frame.finished);
    }

    #[test]
    fn non_numeric_display_is_rejected() {
        assert!(CountUp::from_display("n/a", Duration::from_secs(1), false).is_err());
    }
}

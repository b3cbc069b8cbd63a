//! Scroll-triggered reveal of page sections.

use serde::{Deserialize, Serialize};

use crate::MotionError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    /// Visible fraction at which an element is revealed.
    pub threshold: f32,
    /// Keep elements revealed once they have been shown.
    pub once: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            once: true,
        }
    }
}

impl RevealOptions {
    pub fn validate(&self) -> Result<(), MotionError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MotionError::invalid(
                "effects.reveal.threshold",
                "must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementSpan {
    pub top: f32,
    pub height: f32,
}

impl ElementSpan {
    pub fn new(top: f32, height: f32) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    /// Fraction of the element inside `[scroll, scroll + viewport_height]`.
    ///
    /// Zero-height elements count as fully visible while their edge is inside.
    pub fn visible_fraction(&self, scroll: f32, viewport_height: f32) -> f32 {
        let view_top = scroll;
        let view_bottom = scroll + viewport_height.max(0.0);
        let bottom = self.top + self.height;
        if self.height <= 0.0 {
            return if self.top >= view_top && self.top <= view_bottom {
                1.0
            } else {
                0.0
            };
        }
        let overlap = bottom.min(view_bottom) - self.top.max(view_top);
        (overlap / self.height).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevealChange {
    pub index: usize,
    pub revealed: bool,
}

#[derive(Debug, Clone)]
struct Tracked {
    span: ElementSpan,
    revealed: bool,
}

/// Tracks which observed elements are currently revealed.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    options: RevealOptions,
    reduced_motion: bool,
    elements: Vec<Tracked>,
}

impl RevealTracker {
    pub fn new(options: RevealOptions, reduced_motion: bool) -> Result<Self, MotionError> {
        options.validate()?;
        Ok(Self {
            options,
            reduced_motion,
            elements: Vec::new(),
        })
    }

    /// Starts observing an element and returns its index.
    pub fn observe(&mut self, span: ElementSpan) -> usize {
        self.elements.push(Tracked {
            span,
            revealed: self.reduced_motion,
        });
        self.elements.len() - 1
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.elements
            .get(index)
            .is_some_and(|element| element.revealed)
    }

    pub fn revealed_count(&self) -> usize {
        self.elements.iter().filter(|element| element.revealed).count()
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) -> Vec<RevealChange> {
        self.reduced_motion = reduced_motion;
        if !reduced_motion {
            return Vec::new();
        }
        self.elements
            .iter_mut()
            .enumerate()
            .filter(|(_, element)| !element.revealed)
            .map(|(index, element)| {
                element.revealed = true;
                RevealChange {
                    index,
                    revealed: true,
                }
            })
            .collect()
    }

    /// Re-evaluates every element against the current viewport.
    pub fn update(&mut self, scroll: f32, viewport_height: f32) -> Vec<RevealChange> {
        if self.reduced_motion {
            return Vec::new();
        }
        let threshold = self.options.threshold;
        let once = self.options.once;
        let mut changes = Vec::new();
        for (index, element) in self.elements.iter_mut().enumerate() {
            let fraction = element.span.visible_fraction(scroll, viewport_height);
            let next = if element.revealed {
                once || fraction > 0.0
            } else {
                fraction > 0.0 && fraction >= threshold
            };
            if next != element.revealed {
                element.revealed = next;
                changes.push(RevealChange {
                    index,
                    revealed: next,
                });
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(once: bool) -> RevealTracker {
        RevealTracker::new(
            RevealOptions {
                threshold: 0.15,
                once,
            },
            false,
        )
        .expect("valid options")
    }

    #[test]
    fn visible_fraction_covers_partial_overlap() {
        let span = ElementSpan::new(900.0, 200.0);
        assert_eq!(span.visible_fraction(0.0, 800.0), 0.0);
        assert!((span.visible_fraction(0.0, 950.0) - 0.25).abs() < 1e-6);
        assert_eq!(span.visible_fraction(900.0, 800.0), 1.0);
    }

    #[test]
    fn element_reveals_at_threshold() {
        let mut reveal = tracker(true);
        let index = reveal.observe(ElementSpan::new(1000.0, 400.0));

        assert!(reveal.update(0.0, 1000.0).is_empty());
        // 40px of 400px visible: 10%, below threshold.
        assert!(reveal.update(40.0, 1000.0).is_empty());
        let changes = reveal.update(80.0, 1000.0);
        assert_eq!(
            changes,
            vec![RevealChange {
                index,
                revealed: true
            }]
        );
        assert!(reveal.is_revealed(index));
    }

    #[test]
    fn once_latches_the_reveal() {
        let mut reveal = tracker(true);
        let index = reveal.observe(ElementSpan::new(0.0, 100.0));
        reveal.update(0.0, 800.0);
        assert!(reveal.update(5000.0, 800.0).is_empty());
        assert!(reveal.is_revealed(index));
    }

    #[test]
    fn repeatable_reveal_hides_when_fully_out() {
        let mut reveal = tracker(false);
        let index = reveal.observe(ElementSpan::new(0.0, 100.0));
        reveal.update(0.0, 800.0);
        // Partially visible but below threshold: stays revealed.
        assert!(reveal.update(95.0, 800.0).is_empty());
        let changes = reveal.update(500.0, 800.0);
        assert_eq!(
            changes,
            vec![RevealChange {
                index,
                revealed: false
            }]
        );
    }

    #[test]
    fn reduced_motion_reveals_everything() {
        let mut reveal = RevealTracker::new(RevealOptions::default(), true).expect("valid");
        reveal.observe(ElementSpan::new(10_000.0, 100.0));
        reveal.observe(ElementSpan::new(20_000.0, 100.0));
        assert_eq!(reveal.revealed_count(), 2);

        let mut animated = tracker(true);
        animated.observe(ElementSpan::new(10_000.0, 100.0));
        let changes = animated.set_reduced_motion(true);
        assert_eq!(changes.len(), 1);
        assert_eq!(animated.revealed_count(), 1);
    }

    #[test]
    fn threshold_outside_unit_range_is_rejected() {
        let options = RevealOptions {
            threshold: 1.5,
            once: true,
        };
        assert!(RevealTracker::new(options, false).is_err());
    }
}

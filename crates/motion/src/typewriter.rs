//! Cycling headline text typed and deleted one character at a time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::MotionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterOptions {
    pub phrases: Vec<String>,
    #[serde(with = "crate::duration")]
    pub type_interval: Duration,
    #[serde(with = "crate::duration")]
    pub delete_interval: Duration,
    /// How long a fully typed phrase stays on screen.
    #[serde(with = "crate::duration")]
    pub hold: Duration,
    /// Gap between clearing one phrase and typing the next.
    #[serde(with = "crate::duration")]
    pub pause: Duration,
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Product Manager".to_string(),
                "Senior PM".to_string(),
                "Group Product Manager".to_string(),
            ],
            type_interval: Duration::from_millis(80),
            delete_interval: Duration::from_millis(40),
            hold: Duration::from_millis(1600),
            pause: Duration::from_millis(400),
        }
    }
}

impl TypewriterOptions {
    pub fn validate(&self) -> Result<(), MotionError> {
        if self.phrases.iter().all(|phrase| phrase.trim().is_empty()) {
            return Err(MotionError::invalid(
                "effects.typewriter.phrases",
                "needs at least one non-empty phrase",
            ));
        }
        if self.type_interval.is_zero() || self.delete_interval.is_zero() {
            return Err(MotionError::invalid(
                "effects.typewriter",
                "type and delete intervals must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypewriterPhase {
    Typing,
    Holding,
    Deleting,
    Pausing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypewriterFrame {
    pub text: String,
    pub phrase_index: usize,
    pub phase: TypewriterPhase,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    options: TypewriterOptions,
    reduced_motion: bool,
    phrase_index: usize,
    visible: usize,
    phase: TypewriterPhase,
    carry: Duration,
}

impl Typewriter {
    pub fn new(options: TypewriterOptions, reduced_motion: bool) -> Result<Self, MotionError> {
        options.validate()?;
        let phrases = options
            .phrases
            .iter()
            .map(|phrase| phrase.chars().collect())
            .collect();
        let mut typewriter = Self {
            phrases,
            options,
            reduced_motion,
            phrase_index: 0,
            visible: 0,
            phase: TypewriterPhase::Typing,
            carry: Duration::ZERO,
        };
        if reduced_motion {
            typewriter.show_first_phrase();
        }
        Ok(typewriter)
    }

    pub fn text(&self) -> String {
        self.current().iter().take(self.visible).collect()
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn frame(&self) -> TypewriterFrame {
        TypewriterFrame {
            text: self.text(),
            phrase_index: self.phrase_index,
            phase: self.phase,
        }
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
        if reduced_motion {
            self.show_first_phrase();
        }
    }

    /// Advances the machine by `dt`, stepping through as many phases as fit.
    pub fn tick(&mut self, dt: Duration) -> TypewriterFrame {
        if self.reduced_motion {
            return self.frame();
        }
        self.carry += dt;
        loop {
            let step = self.step_duration();
            if self.carry < step {
                break;
            }
            self.carry -= step;
            self.step();
        }
        self.frame()
    }

    fn current(&self) -> &[char] {
        self.phrases
            .get(self.phrase_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn step_duration(&self) -> Duration {
        match self.phase {
            TypewriterPhase::Typing => self.options.type_interval,
            TypewriterPhase::Holding => self.options.hold,
            TypewriterPhase::Deleting => self.options.delete_interval,
            TypewriterPhase::Pausing => self.options.pause,
        }
    }

    fn step(&mut self) {
        let len = self.current().len();
        match self.phase {
            TypewriterPhase::Typing => {
                self.visible = (self.visible + 1).min(len);
                if self.visible >= len {
                    self.phase = TypewriterPhase::Holding;
                }
            }
            TypewriterPhase::Holding => {
                self.phase = TypewriterPhase::Deleting;
            }
            TypewriterPhase::Deleting => {
                self.visible = self.visible.saturating_sub(1);
                if self.visible == 0 {
                    self.phase = TypewriterPhase::Pausing;
                }
            }
            TypewriterPhase::Pausing => {
                self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
                self.phase = TypewriterPhase::Typing;
            }
        }
    }

    fn show_first_phrase(&mut self) {
        self.phrase_index = self
            .phrases
            .iter()
            .position(|phrase| !phrase.is_empty())
            .unwrap_or(0);
        self.visible = self.current().len();
        self.phase = TypewriterPhase::Holding;
        self.carry = Duration::ZERO;
    }
}

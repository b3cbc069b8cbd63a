//! Mount/unmount of the hero scene.
//!
//! ```text
//!   mount(container) ──▶ Scene Setup ──▶ register listeners + arm frame chain
//!          │                                        │
//!          │ None → no-op                            ▼
//!          │                         frame(): advance ─▶ re-arm ─▶ render
//!          ▼                                        │
//!   unmount() / Drop ──▶ release every registration ─┴─▶ backend.release()
//! ```
//!
//! Every registration goes through [`RegistrationLedger`], so teardown can be
//! checked by counting: after unmount there are no listeners and no pending
//! frame callbacks.

use anyhow::Result;
use tracing::{debug, info};

use crate::animation::HeroState;
use crate::input::{ContainerRect, PointerSampler};
use crate::runtime::{BoxedTimeSource, TimeSample};
use crate::scene::SceneDescription;
use crate::types::MotionPreference;
use crate::viewport::Viewport;

/// Host registrations made while the hero is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    PointerMove,
    ResizeObserver,
    MotionPreferenceChange,
    FrameCallback,
}

impl Registration {
    const ALL: [Registration; 4] = [
        Registration::PointerMove,
        Registration::ResizeObserver,
        Registration::MotionPreferenceChange,
        Registration::FrameCallback,
    ];

    fn slot(self) -> usize {
        match self {
            Registration::PointerMove => 0,
            Registration::ResizeObserver => 1,
            Registration::MotionPreferenceChange => 2,
            Registration::FrameCallback => 3,
        }
    }
}

/// Instrumentation counters for every registration the hero holds.
#[derive(Debug, Default, Clone)]
pub struct RegistrationLedger {
    active: [bool; 4],
    registered_total: usize,
    released_total: usize,
}

impl RegistrationLedger {
    /// Returns `false` when the registration was already held.
    pub fn register(&mut self, registration: Registration) -> bool {
        let slot = &mut self.active[registration.slot()];
        if *slot {
            return false;
        }
        *slot = true;
        self.registered_total += 1;
        true
    }

    /// Returns `false` when there was nothing to release.
    pub fn release(&mut self, registration: Registration) -> bool {
        let slot = &mut self.active[registration.slot()];
        if !*slot {
            return false;
        }
        *slot = false;
        self.released_total += 1;
        true
    }

    pub fn is_active(&self, registration: Registration) -> bool {
        self.active[registration.slot()]
    }

    /// Event listeners and observers currently attached (the frame callback excluded).
    pub fn listener_count(&self) -> usize {
        Registration::ALL
            .iter()
            .filter(|registration| **registration != Registration::FrameCallback)
            .filter(|registration| self.is_active(**registration))
            .count()
    }

    pub fn pending_frames(&self) -> usize {
        usize::from(self.is_active(Registration::FrameCallback))
    }

    pub fn registered_total(&self) -> usize {
        self.registered_total
    }

    pub fn released_total(&self) -> usize {
        self.released_total
    }

    fn release_all(&mut self) -> usize {
        Registration::ALL
            .iter()
            .filter(|registration| self.release(**registration))
            .count()
    }
}

/// What the scene renders into. Implemented by the `wgpu` backend and by test doubles.
pub trait SceneBackend {
    type Error;

    /// Resizes the output buffer to the viewport's device-pixel size.
    fn resize(&mut self, viewport: &Viewport);

    /// Draws one frame from the current state.
    fn render(&mut self, scene: &SceneDescription, state: &HeroState) -> Result<(), Self::Error>;

    /// Releases geometry, material and context resources. Called exactly once.
    fn release(&mut self);
}

/// Host container for the hero: where it sits and how it is scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    pub rect: ContainerRect,
    pub viewport: Viewport,
}

impl Container {
    pub fn new(rect: ContainerRect, viewport: Viewport) -> Self {
        Self { rect, viewport }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Mounted,
    Unmounted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The frame callback ran and a render was issued.
    Rendered(TimeSample),
    /// No frame callback was pending (unmounted, or already consumed).
    Idle,
}

/// A mounted hero scene and the resources it owns.
pub struct HeroInstance<B: SceneBackend> {
    scene: SceneDescription,
    state: HeroState,
    sampler: PointerSampler,
    container: Container,
    backend: Option<B>,
    ledger: RegistrationLedger,
    time: BoxedTimeSource,
    phase: LifecyclePhase,
}

impl<B: SceneBackend> HeroInstance<B> {
    /// Runs Scene Setup and registers listeners.
    ///
    /// Returns `Ok(None)` without touching the backend factory when no
    /// container is available.
    pub fn mount<F>(
        container: Option<Container>,
        motion: MotionPreference,
        time: BoxedTimeSource,
        build_backend: F,
    ) -> Result<Option<Self>>
    where
        F: FnOnce(&SceneDescription, &Viewport) -> Result<B>,
    {
        let Some(container) = container else {
            debug!("hero container unavailable; skipping scene setup");
            return Ok(None);
        };

        let scene = SceneDescription::hero(container.viewport.aspect());
        let backend = build_backend(&scene, &container.viewport)?;
        let state = HeroState::new(&scene, motion.is_reduced());

        let mut instance = Self {
            scene,
            state,
            sampler: PointerSampler::default(),
            container,
            backend: Some(backend),
            ledger: RegistrationLedger::default(),
            time,
            phase: LifecyclePhase::Mounted,
        };
        instance.ledger.register(Registration::MotionPreferenceChange);
        instance.ledger.register(Registration::PointerMove);
        instance.ledger.register(Registration::ResizeObserver);
        instance.ledger.register(Registration::FrameCallback);

        info!(
            width = container.viewport.width,
            height = container.viewport.height,
            pixel_ratio = container.viewport.pixel_ratio,
            motion = %motion,
            "hero mounted"
        );
        Ok(Some(instance))
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.phase == LifecyclePhase::Mounted
    }

    pub fn ledger(&self) -> &RegistrationLedger {
        &self.ledger
    }

    pub fn state(&self) -> &HeroState {
        &self.state
    }

    pub fn scene(&self) -> &SceneDescription {
        &self.scene
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.ledger.pending_frames() > 0
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if !self.ledger.is_active(Registration::PointerMove) {
            return;
        }
        let offset = self
            .sampler
            .handle_pointer_moved(&self.container.rect, x, y);
        self.state.set_pointer(offset);
    }

    pub fn resized(&mut self, rect: ContainerRect, viewport: Viewport) {
        if !self.ledger.is_active(Registration::ResizeObserver) {
            return;
        }
        self.container = Container::new(rect, viewport);
        self.state.set_aspect(viewport.aspect());
        if let Some(backend) = self.backend.as_mut() {
            backend.resize(&viewport);
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            aspect = viewport.aspect(),
            "hero resized"
        );
    }

    pub fn motion_preference_changed(&mut self, motion: MotionPreference) {
        if !self.ledger.is_active(Registration::MotionPreferenceChange) {
            return;
        }
        if motion.is_reduced() != self.state.reduced_motion() {
            info!(%motion, "motion preference changed");
        }
        self.state.set_reduced_motion(motion.is_reduced());
    }

    /// Runs the pending frame callback: update, re-arm, then render once.
    pub fn frame(&mut self) -> Result<FrameOutcome, B::Error> {
        if !self.ledger.release(Registration::FrameCallback) {
            return Ok(FrameOutcome::Idle);
        }

        let sample = self.time.sample();
        self.state.advance(sample.seconds);
        self.ledger.register(Registration::FrameCallback);

        if let Some(backend) = self.backend.as_mut() {
            backend.render(&self.scene, &self.state)?;
        }
        Ok(FrameOutcome::Rendered(sample))
    }

    /// Releases every registration and graphics resource. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        if self.phase == LifecyclePhase::Unmounted {
            return;
        }
        self.phase = LifecyclePhase::Unmounted;
        let released = self.ledger.release_all();
        if let Some(mut backend) = self.backend.take() {
            backend.release();
        }
        info!(
            released,
            frames = self.state.frames(),
            "hero unmounted"
        );
    }
}

impl<B: SceneBackend> Drop for HeroInstance<B> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::runtime::SteppedTimeSource;
    use crate::viewport::{MAX_PIXEL_RATIO, MIN_ASPECT};

    #[derive(Debug, Default)]
    struct Journal {
        events: Vec<String>,
        releases: usize,
        fail_next_render: bool,
    }

    struct RecordingBackend {
        journal: Rc<RefCell<Journal>>,
    }

    impl SceneBackend for RecordingBackend {
        type Error = String;

        fn resize(&mut self, viewport: &Viewport) {
            let (w, h) = viewport.buffer_size();
            self.journal.borrow_mut().events.push(format!("resize {w}x{h}"));
        }

        fn render(&mut self, _scene: &SceneDescription, state: &HeroState) -> Result<(), String> {
            let mut journal = self.journal.borrow_mut();
            if std::mem::take(&mut journal.fail_next_render) {
                return Err("surface lost".to_string());
            }
            drop(journal);
            self.journal
                .borrow_mut()
                .events
                .push(format!("render {:.3}", state.transform().rotation.y));
            Ok(())
        }

        fn release(&mut self) {
            self.journal.borrow_mut().releases += 1;
        }
    }

    fn container(width: f32, height: f32) -> Container {
        Container::new(
            ContainerRect::from_size(width, height),
            Viewport::new(width, height, 1.0, MAX_PIXEL_RATIO),
        )
    }

    fn mount(
        journal: &Rc<RefCell<Journal>>,
        motion: MotionPreference,
    ) -> HeroInstance<RecordingBackend> {
        let journal = journal.clone();
        HeroInstance::mount(
            Some(container(800.0, 400.0)),
            motion,
            Box::new(SteppedTimeSource::new(1.0)),
            move |_, _| Ok(RecordingBackend { journal }),
        )
        .unwrap()
        .expect("mounted")
    }

    #[test]
    fn missing_container_skips_setup() {
        let mut built = false;
        let result = HeroInstance::<RecordingBackend>::mount(
            None,
            MotionPreference::NoPreference,
            Box::new(SteppedTimeSource::new(1.0)),
            |_, _| {
                built = true;
                Err(anyhow::anyhow!("should not be called"))
            },
        )
        .unwrap();
        assert!(result.is_none());
        assert!(!built);
    }

    #[test]
    fn mount_registers_listeners_and_arms_the_frame_chain() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let hero = mount(&journal, MotionPreference::NoPreference);
        assert!(hero.is_mounted());
        assert_eq!(hero.ledger().listener_count(), 3);
        assert_eq!(hero.ledger().pending_frames(), 1);
        assert!((hero.state().camera().aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn frames_update_before_rendering_and_rearm() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let mut hero = mount(&journal, MotionPreference::NoPreference);
        assert!(matches!(hero.frame(), Ok(FrameOutcome::Rendered(_))));
        assert!(matches!(hero.frame(), Ok(FrameOutcome::Rendered(_))));
        assert_eq!(hero.ledger().pending_frames(), 1);
        let events = &journal.borrow().events;
        assert_eq!(events, &vec!["render 0.000".to_string(), "render 0.180".to_string()]);
    }

    #[test]
    fn unmount_releases_everything_exactly_once() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let mut hero = mount(&journal, MotionPreference::NoPreference);
        hero.frame().unwrap();
        hero.unmount();
        hero.unmount();

        assert_eq!(hero.phase(), LifecyclePhase::Unmounted);
        assert_eq!(hero.ledger().listener_count(), 0);
        assert_eq!(hero.ledger().pending_frames(), 0);
        assert_eq!(
            hero.ledger().registered_total(),
            hero.ledger().released_total()
        );
        assert_eq!(journal.borrow().releases, 1);
        assert!(hero.backend().is_none());
    }

    #[test]
    fn drop_tears_down_a_mounted_instance() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        {
            let _hero = mount(&journal, MotionPreference::NoPreference);
        }
        assert_eq!(journal.borrow().releases, 1);
    }

    #[test]
    fn events_after_unmount_are_ignored() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let mut hero = mount(&journal, MotionPreference::NoPreference);
        hero.unmount();
        hero.pointer_moved(0.0, 0.0);
        hero.resized(ContainerRect::from_size(10.0, 10.0), Viewport::new(10.0, 10.0, 1.0, 2.0));
        hero.motion_preference_changed(MotionPreference::Reduce);
        assert!(matches!(hero.frame(), Ok(FrameOutcome::Idle)));
        assert!(!hero.state().reduced_motion());
        assert!(journal.borrow().events.is_empty());
    }

    #[test]
    fn pointer_moves_feed_the_camera_target() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let mut hero = mount(&journal, MotionPreference::NoPreference);
        hero.pointer_moved(0.0, 0.0);
        let pointer = hero.state().pointer();
        assert!((pointer.x + 0.2).abs() < 1e-6);
        assert!((pointer.y - 0.15).abs() < 1e-6);
    }

    #[test]
    fn zero_height_resize_clamps_the_aspect() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let mut hero = mount(&journal, MotionPreference::NoPreference);
        hero.resized(
            ContainerRect::from_size(800.0, 0.0),
            Viewport::new(800.0, 0.0, 1.0, MAX_PIXEL_RATIO),
        );
        assert_eq!(hero.state().camera().aspect, MIN_ASPECT);
        assert_eq!(journal.borrow().events, vec!["resize 800x0".to_string()]);
        assert!(hero.frame().is_ok());
    }

    #[test]
    fn motion_toggle_applies_on_the_next_frame() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let mut hero = mount(&journal, MotionPreference::NoPreference);
        hero.frame().unwrap();
        hero.frame().unwrap();
        hero.motion_preference_changed(MotionPreference::Reduce);
        hero.frame().unwrap();
        let events = &journal.borrow().events;
        assert_eq!(events.last().map(String::as_str), Some("render 0.230"));
        assert_eq!(hero.state().elapsed(), 2.0);
    }

    #[test]
    fn failed_render_keeps_the_frame_chain_armed() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let mut hero = mount(&journal, MotionPreference::NoPreference);
        journal.borrow_mut().fail_next_render = true;

        assert_eq!(hero.frame(), Err("surface lost".to_string()));
        assert!(hero.has_pending_frame());
        assert_eq!(hero.ledger().pending_frames(), 1);
        assert!(journal.borrow().events.is_empty());

        assert!(matches!(hero.frame(), Ok(FrameOutcome::Rendered(_))));
        assert_eq!(journal.borrow().events, vec!["render 0.180".to_string()]);
        assert_eq!(hero.ledger().pending_frames(), 1);
    }
}

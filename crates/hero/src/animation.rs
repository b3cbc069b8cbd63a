//! Per-frame updater for the hero scene.
//!
//! `HeroState` is the single struct of animation state owned by a mounted
//! hero: event handlers write the pointer offset, motion preference and
//! aspect; the tick routine reads them once per frame.
//!
//! Rotation is tracked as a phase anchored at the last preference change, so
//! with a constant preference `rot_y(t) = rate·t` exactly, and a toggle only
//! changes the slope from the next frame on.

use crate::input::PointerOffset;
use crate::scene::{Camera, MeshTransform, SceneDescription};

pub const ROTATION_RATE: f32 = 0.18;
pub const REDUCED_ROTATION_RATE: f32 = 0.05;
/// Z spins at this fraction of the Y rate.
pub const Z_ROTATION_FACTOR: f32 = 0.6;
/// Fraction of the remaining distance the camera covers each frame.
pub const CAMERA_DAMPING: f32 = 0.04;

pub fn rotation_rate(reduced_motion: bool) -> f32 {
    if reduced_motion {
        REDUCED_ROTATION_RATE
    } else {
        ROTATION_RATE
    }
}

#[derive(Debug, Clone)]
pub struct HeroState {
    camera: Camera,
    transform: MeshTransform,
    pointer: PointerOffset,
    reduced_motion: bool,
    elapsed: f32,
    anchor_elapsed: f32,
    anchor_phase: f32,
    frames: u64,
}

impl HeroState {
    pub fn new(scene: &SceneDescription, reduced_motion: bool) -> Self {
        Self {
            camera: scene.camera,
            transform: scene.transform,
            pointer: PointerOffset::default(),
            reduced_motion,
            elapsed: 0.0,
            anchor_elapsed: 0.0,
            anchor_phase: 0.0,
            frames: 0,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn transform(&self) -> &MeshTransform {
        &self.transform
    }

    pub fn pointer(&self) -> PointerOffset {
        self.pointer
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn rotation_rate(&self) -> f32 {
        rotation_rate(self.reduced_motion)
    }

    pub fn set_pointer(&mut self, pointer: PointerOffset) {
        self.pointer = pointer;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    /// Switches the rotation rate; takes effect on the next [`advance`](Self::advance).
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        if reduced_motion == self.reduced_motion {
            return;
        }
        self.anchor_phase = self.phase_at(self.elapsed);
        self.anchor_elapsed = self.elapsed;
        self.reduced_motion = reduced_motion;
    }

    /// Runs one frame of the updater for the given elapsed time (seconds since mount).
    pub fn advance(&mut self, elapsed: f32) {
        let elapsed = if elapsed.is_finite() {
            elapsed.max(self.elapsed)
        } else {
            self.elapsed
        };
        self.elapsed = elapsed;

        let phase = self.phase_at(elapsed);
        self.transform.rotation.y = phase;
        self.transform.rotation.z = phase * Z_ROTATION_FACTOR;

        self.camera.position.x += (self.pointer.x - self.camera.position.x) * CAMERA_DAMPING;
        self.camera.position.y += (self.pointer.y - self.camera.position.y) * CAMERA_DAMPING;
        self.camera.look_at_origin();

        self.frames = self.frames.saturating_add(1);
    }

    fn phase_at(&self, elapsed: f32) -> f32 {
        self.anchor_phase + (elapsed - self.anchor_elapsed) * self.rotation_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MESH_BASE_TILT;

    fn state(reduced: bool) -> HeroState {
        HeroState::new(&SceneDescription::hero(1.0), reduced)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn rotation_follows_the_normal_rate() {
        let mut hero = state(false);
        for t in [0.0, 0.5, 1.0, 10.0, 123.25] {
            hero.advance(t);
            assert!(close(hero.transform().rotation.y, 0.18 * t));
            assert!(close(hero.transform().rotation.z, 0.108 * t));
        }
    }

    #[test]
    fn rotation_follows_the_reduced_rate() {
        let mut hero = state(true);
        for t in [0.0, 0.25, 3.0, 60.0] {
            hero.advance(t);
            assert!(close(hero.transform().rotation.y, 0.05 * t));
            assert!(close(hero.transform().rotation.z, 0.03 * t));
        }
    }

    #[test]
    fn base_tilt_is_preserved() {
        let mut hero = state(false);
        hero.advance(5.0);
        assert_eq!(hero.transform().rotation.x, MESH_BASE_TILT);
    }

    #[test]
    fn camera_converges_geometrically_toward_the_pointer() {
        let mut hero = state(false);
        let start = hero.camera().position;
        let target = PointerOffset { x: 0.2, y: -0.15 };
        hero.set_pointer(target);
        let frames = 50;
        for frame in 0..frames {
            hero.advance(frame as f32 / 60.0);
        }
        let decay = 0.96_f32.powi(frames);
        let expected_x = target.x - (target.x - start.x) * decay;
        let expected_y = target.y - (target.y - start.y) * decay;
        assert!(close(hero.camera().position.x, expected_x));
        assert!(close(hero.camera().position.y, expected_y));
        assert_eq!(hero.camera().position.z, start.z);
        assert_eq!(hero.camera().target, glam::Vec3::ZERO);
    }

    #[test]
    fn toggling_reduced_motion_keeps_accumulated_rotation() {
        let mut hero = state(false);
        hero.advance(10.0);
        let before = hero.transform().rotation.y;
        assert!(close(before, 1.8));

        hero.set_reduced_motion(true);
        assert_eq!(hero.elapsed(), 10.0);
        assert_eq!(hero.transform().rotation.y, before);

        hero.advance(12.0);
        assert!(close(hero.transform().rotation.y, 1.8 + 0.05 * 2.0));
        assert!(close(hero.transform().rotation.z, (1.8 + 0.1) * 0.6));

        hero.set_reduced_motion(false);
        hero.advance(13.0);
        assert!(close(hero.transform().rotation.y, 1.9 + 0.18));
    }

    #[test]
    fn time_never_runs_backwards() {
        let mut hero = state(false);
        hero.advance(4.0);
        let rotation = hero.transform().rotation.y;
        hero.advance(2.0);
        assert_eq!(hero.elapsed(), 4.0);
        assert_eq!(hero.transform().rotation.y, rotation);
        hero.advance(f32::NAN);
        assert_eq!(hero.elapsed(), 4.0);
    }

    #[test]
    fn frames_are_counted() {
        let mut hero = state(false);
        hero.advance(0.0);
        hero.advance(0.016);
        assert_eq!(hero.frames(), 2);
    }
}

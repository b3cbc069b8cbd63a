//! 3D hero for the HiredPath landing page.
//!
//! A gold torus knot slowly spins in a transparent window while the camera
//! eases toward the pointer. The flow is:
//!
//! ```text
//!   hiredpath CLI
//!          │ HeroConfig
//!          ▼
//!   Hero::run ──▶ HeroInstance::mount ──▶ winit event loop
//!                      │                       │ pointer / resize / motion
//!                      │                       ▼
//!                      └──▶ GpuBackend ◀── frame(): HeroState::advance ─▶ render
//! ```
//!
//! Everything above the `gpu` module is plain data and arithmetic, so the
//! updater, input mapping and lifecycle bookkeeping are tested without a
//! device. `HeroInstance` is generic over [`SceneBackend`] for that reason.

mod animation;
mod compile;
mod geometry;
mod gpu;
mod input;
mod lifecycle;
mod runtime;
mod scene;
mod types;
mod viewport;
mod window;

use anyhow::Result;

pub use animation::{
    rotation_rate, HeroState, CAMERA_DAMPING, REDUCED_ROTATION_RATE, ROTATION_RATE,
    Z_ROTATION_FACTOR,
};
pub use geometry::{MeshData, TorusKnot, Vertex};
pub use gpu::GpuBackend;
pub use input::{
    normalized_offset, ContainerRect, PointerOffset, PointerSampler, POINTER_SCALE_X,
    POINTER_SCALE_Y,
};
pub use lifecycle::{
    Container, FrameOutcome, HeroInstance, LifecyclePhase, Registration, RegistrationLedger,
    SceneBackend,
};
pub use runtime::{
    BoxedTimeSource, FrameScheduler, SteppedTimeSource, SystemTimeSource, TimeSample, TimeSource,
};
pub use scene::{
    srgb_hex_to_linear, Camera, HemisphereLight, Lighting, Material, MeshTransform, PointLight,
    SceneDescription, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START, MESH_BASE_TILT,
};
pub use types::{Antialiasing, HeroConfig, MotionPreference};
pub use viewport::{clamped_aspect, Viewport, MAX_PIXEL_RATIO, MIN_ASPECT};

/// Entry point used by the binary: owns the config and opens the window.
pub struct Hero {
    config: HeroConfig,
}

impl Hero {
    pub fn new(config: HeroConfig) -> Self {
        Self { config }
    }

    /// Blocks until the window is closed or the hero is unmounted.
    pub fn run(self) -> Result<()> {
        window::run_window(self.config)
    }
}

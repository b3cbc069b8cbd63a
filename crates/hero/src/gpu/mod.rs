//! GPU backend for the hero scene.
//!
//! - `context` owns wgpu instance/device/surface wiring and knows how to
//!   rebuild swapchain state when the container resizes.
//! - `pipeline` builds the single mesh pipeline (depth tested, optionally
//!   multisampled) from `hero.wgsl`.
//! - `uniforms` packs camera, transform, material and lights into one block
//!   that is rewritten each frame.
//! - `state` uploads the knot, owns the render targets and implements
//!   [`SceneBackend`](crate::lifecycle::SceneBackend).

mod context;
mod pipeline;
mod state;
mod uniforms;

pub use state::GpuBackend;

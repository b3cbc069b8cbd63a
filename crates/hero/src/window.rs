use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use tracing::{error, info, warn};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use crate::gpu::GpuBackend;
use crate::input::ContainerRect;
use crate::lifecycle::{Container, FrameOutcome, HeroInstance};
use crate::runtime::{FrameScheduler, SystemTimeSource};
use crate::types::HeroConfig;
use crate::viewport::Viewport;

const SOFTWARE_FPS_CAP: f32 = 30.0;

/// Keys the host maps onto hero signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HostKey {
    /// Flip the reported motion preference.
    ToggleMotion,
    /// Tear the hero down and close the window.
    Unmount,
}

pub(crate) fn host_key(event: &KeyEvent) -> Option<HostKey> {
    if event.state != ElementState::Pressed || event.repeat {
        return None;
    }
    match &event.logical_key {
        Key::Named(NamedKey::Escape) => Some(HostKey::Unmount),
        Key::Character(value) if value.eq_ignore_ascii_case("m") => Some(HostKey::ToggleMotion),
        _ => None,
    }
}

/// Container geometry for a window: the whole inner area, in physical pixels
/// so cursor positions can be normalised without rescaling.
pub(crate) fn container_for(
    size: PhysicalSize<u32>,
    scale_factor: f64,
    max_pixel_ratio: f32,
) -> Container {
    Container::new(
        ContainerRect::from_size(size.width as f32, size.height as f32),
        Viewport::from_physical(size.width, size.height, scale_factor, max_pixel_ratio),
    )
}

/// Opens the hero window and drives it until it is closed or unmounted.
pub(crate) fn run_window(config: HeroConfig) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;

    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(LogicalSize::new(config.surface_size.0, config.surface_size.1))
        .with_transparent(true)
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create hero window: {err}"))?;
    let window = Arc::new(window);

    let max_pixel_ratio = config.max_pixel_ratio;
    let container = container_for(window.inner_size(), window.scale_factor(), max_pixel_ratio);
    let antialiasing = config.antialiasing;
    let backend_window = window.clone();

    let mounted = HeroInstance::mount(
        Some(container),
        config.motion,
        Box::new(SystemTimeSource::new()),
        move |scene, viewport| GpuBackend::new(backend_window, scene, viewport, antialiasing),
    )?;
    let Some(mut hero) = mounted else {
        return Ok(());
    };

    let mut target_fps = config.target_fps;
    if target_fps.is_none() && hero.backend().is_some_and(GpuBackend::is_software_adapter) {
        warn!(
            cap = SOFTWARE_FPS_CAP,
            "software rasterizer detected; capping hero to {} FPS (override with --fps)",
            SOFTWARE_FPS_CAP
        );
        target_fps = Some(SOFTWARE_FPS_CAP);
    }
    let mut scheduler = FrameScheduler::new(target_fps);
    let mut motion = config.motion;

    window.request_redraw();

    let run_result = event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                hero.unmount();
                elwt.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => match host_key(&event) {
                Some(HostKey::Unmount) => {
                    hero.unmount();
                    elwt.exit();
                }
                Some(HostKey::ToggleMotion) => {
                    motion = motion.toggled();
                    hero.motion_preference_changed(motion);
                }
                None => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                hero.pointer_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::Resized(size) => {
                let container = container_for(size, window.scale_factor(), max_pixel_ratio);
                hero.resized(container.rect, container.viewport);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let container = container_for(window.inner_size(), scale_factor, max_pixel_ratio);
                hero.resized(container.rect, container.viewport);
            }
            WindowEvent::RedrawRequested => match hero.frame() {
                Ok(FrameOutcome::Rendered(_)) => scheduler.mark_rendered(Instant::now()),
                Ok(FrameOutcome::Idle) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    if let Some(backend) = hero.backend() {
                        backend.reconfigure();
                    }
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    error!("surface out of memory; closing hero");
                    hero.unmount();
                    elwt.exit();
                }
                Err(wgpu::SurfaceError::Timeout) => {
                    warn!("surface timeout; retrying next frame");
                }
                Err(other) => {
                    warn!(error = ?other, "surface error; retrying next frame");
                }
            },
            _ => {}
        },
        Event::AboutToWait => {
            if !hero.has_pending_frame() {
                elwt.set_control_flow(ControlFlow::Wait);
                return;
            }
            let now = Instant::now();
            if scheduler.ready_for_frame(now) {
                tracing::trace!("scheduler: issuing redraw now");
                window.request_redraw();
                elwt.set_control_flow(ControlFlow::Wait);
            } else if let Some(deadline) = scheduler.next_deadline() {
                elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
            } else {
                elwt.set_control_flow(ControlFlow::Wait);
            }
        }
        _ => {}
    });

    run_result.map_err(|err| anyhow!("window event loop error: {err}"))?;
    info!("hero window closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_uses_physical_rect_and_logical_viewport() {
        let container = container_for(PhysicalSize::new(2560, 1440), 2.0, 2.0);
        assert_eq!(container.rect.width, 2560.0);
        assert_eq!(container.rect.height, 1440.0);
        assert_eq!(container.viewport.width, 1280.0);
        assert_eq!(container.viewport.buffer_size(), (2560, 1440));
    }

    #[test]
    fn container_caps_dense_displays() {
        let container = container_for(PhysicalSize::new(3000, 1500), 3.0, 2.0);
        assert_eq!(container.viewport.pixel_ratio, 2.0);
        assert_eq!(container.viewport.buffer_size(), (2000, 1000));
    }

    #[test]
    fn zero_sized_window_keeps_a_finite_aspect() {
        let container = container_for(PhysicalSize::new(800, 0), 1.0, 2.0);
        assert!(container.viewport.aspect().is_finite());
        assert!(container.viewport.is_empty());
    }
}

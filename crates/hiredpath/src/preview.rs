//! `hiredpath motion <effect>`: drives one page effect with a scripted input
//! sequence and prints each frame as a JSON line.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use motion::{
    CardBounds, CountUp, ElementSpan, Parallax, RevealTracker, ScrollInput, SmoothScroll, Tilt,
    Typewriter,
};
use serde::Serialize;
use serde_json::json;
use siteconfig::SiteConfig;

use crate::cli::Effect;
use crate::content;

const PAGE_LIMIT: f32 = 3200.0;
const VIEWPORT_HEIGHT: f32 = 800.0;
/// Page offset the reveal and parallax scripts scroll by each frame.
const SCROLL_STEP: f32 = 12.0;
const CARD: CardBounds = CardBounds {
    left: 0.0,
    top: 0.0,
    width: 320.0,
    height: 200.0,
};

#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
    pub effect: Effect,
    pub frames: usize,
    pub fps: f32,
    pub reduced_motion: bool,
}

impl PreviewOptions {
    fn frame_time(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.fps)
    }
}

fn emit<T: Serialize>(out: &mut impl Write, frame: usize, dt: Duration, state: T) -> Result<()> {
    let line = json!({
        "frame": frame,
        "t": dt.as_secs_f64() * frame as f64,
        "state": state,
    });
    serde_json::to_writer(&mut *out, &line).context("failed to encode preview frame")?;
    out.write_all(b"\n").context("failed to write preview frame")?;
    Ok(())
}

/// Runs the scripted preview for `options.effect`, writing one line per frame.
pub fn run_preview(options: PreviewOptions, config: &SiteConfig, out: &mut impl Write) -> Result<()> {
    tracing::debug!(
        effect = options.effect.name(),
        frames = options.frames,
        fps = options.fps,
        reduced_motion = options.reduced_motion,
        "running motion preview"
    );
    match options.effect {
        Effect::Scroll => preview_scroll(options, config, out),
        Effect::Reveal => preview_reveal(options, config, out),
        Effect::Parallax => preview_parallax(options, config, out),
        Effect::Tilt => preview_tilt(options, config, out),
        Effect::Typewriter => preview_typewriter(options, config, out),
        Effect::CountUp => preview_count_up(options, config, out),
    }?;
    out.flush().context("failed to flush preview output")
}

fn preview_scroll(options: PreviewOptions, config: &SiteConfig, out: &mut impl Write) -> Result<()> {
    let mut scroll = SmoothScroll::new(config.scroll, PAGE_LIMIT, options.reduced_motion)?;
    let dt = options.frame_time();
    // One wheel flick, then a second one half way through.
    let second_flick = options.frames / 2;
    for frame in 0..options.frames {
        if frame == 0 {
            scroll.input(ScrollInput::Wheel, 600.0);
        } else if frame == second_flick {
            scroll.input(ScrollInput::Wheel, 400.0);
        }
        let state = scroll.tick(dt);
        emit(out, frame, dt, state)?;
    }
    Ok(())
}

fn preview_reveal(options: PreviewOptions, config: &SiteConfig, out: &mut impl Write) -> Result<()> {
    let mut tracker = RevealTracker::new(config.effects.reveal, options.reduced_motion)?;
    // Problem stats laid out below the fold.
    for index in 0..content::STATS.len() {
        tracker.observe(ElementSpan::new(VIEWPORT_HEIGHT + 100.0 + index as f32 * 360.0, 240.0));
    }
    let dt = options.frame_time();
    for frame in 0..options.frames {
        let scroll = (frame as f32 * SCROLL_STEP).min(PAGE_LIMIT);
        let changes = tracker.update(scroll, VIEWPORT_HEIGHT);
        let revealed: Vec<bool> = (0..tracker.len()).map(|i| tracker.is_revealed(i)).collect();
        emit(
            out,
            frame,
            dt,
            json!({ "scroll": scroll, "revealed": revealed, "changes": changes }),
        )?;
    }
    Ok(())
}

fn preview_parallax(options: PreviewOptions, config: &SiteConfig, out: &mut impl Write) -> Result<()> {
    let parallax = Parallax::new(0.0, config.effects.parallax_speed, None)?;
    let dt = options.frame_time();
    for frame in 0..options.frames {
        let scroll = (frame as f32 * SCROLL_STEP).min(PAGE_LIMIT);
        let offset = parallax.offset(scroll, options.reduced_motion);
        emit(out, frame, dt, json!({ "scroll": scroll, "offset": offset }))?;
    }
    Ok(())
}

fn preview_tilt(options: PreviewOptions, config: &SiteConfig, out: &mut impl Write) -> Result<()> {
    let mut tilt = Tilt::new(CARD, config.effects.tilt_max_degrees, options.reduced_motion)?;
    let dt = options.frame_time();
    // Sweep the pointer corner to corner, then leave the card.
    let sweep = (options.frames / 2).max(1);
    for frame in 0..options.frames {
        if frame < sweep {
            let progress = frame as f32 / sweep as f32;
            tilt.pointer_moved(
                CARD.left + CARD.width * progress,
                CARD.top + CARD.height * progress,
            );
        } else if frame == sweep {
            tilt.pointer_left();
        }
        let angles = tilt.tick(dt);
        emit(out, frame, dt, angles)?;
    }
    Ok(())
}

fn preview_typewriter(
    options: PreviewOptions,
    config: &SiteConfig,
    out: &mut impl Write,
) -> Result<()> {
    let mut typewriter =
        Typewriter::new(config.effects.typewriter.clone(), options.reduced_motion)?;
    let dt = options.frame_time();
    for frame in 0..options.frames {
        let state = typewriter.tick(dt);
        emit(out, frame, dt, state)?;
    }
    Ok(())
}

fn preview_count_up(options: PreviewOptions, config: &SiteConfig, out: &mut impl Write) -> Result<()> {
    let mut counter = CountUp::from_display(
        content::STATS[0].value,
        config.effects.count_up.duration,
        options.reduced_motion,
    )?;
    counter.trigger();
    let dt = options.frame_time();
    for frame in 0..options.frames {
        let state = counter.tick(dt);
        emit(out, frame, dt, state)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn lines(effect: Effect, frames: usize, reduced_motion: bool) -> Vec<Value> {
        lines_with(&SiteConfig::default(), effect, frames, reduced_motion)
    }

    fn lines_with(
        config: &SiteConfig,
        effect: Effect,
        frames: usize,
        reduced_motion: bool,
    ) -> Vec<Value> {
        let mut buffer = Vec::new();
        run_preview(
            PreviewOptions {
                effect,
                frames,
                fps: 60.0,
                reduced_motion,
            },
            config,
            &mut buffer,
        )
        .unwrap();
        String::from_utf8(buffer)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn emits_one_line_per_frame() {
        for effect in [
            Effect::Scroll,
            Effect::Reveal,
            Effect::Parallax,
            Effect::Tilt,
            Effect::Typewriter,
            Effect::CountUp,
        ] {
            let frames = lines(effect, 12, false);
            assert_eq!(frames.len(), 12, "{}", effect.name());
            assert_eq!(frames[11]["frame"], 11);
        }
    }

    #[test]
    fn scroll_eases_toward_the_wheel_target() {
        let frames = lines(Effect::Scroll, 30, false);
        let first = frames[0]["state"]["position"].as_f64().unwrap();
        let last = frames[29]["state"]["position"].as_f64().unwrap();
        assert!(first > 0.0 && first < 600.0);
        assert!(last > first);
        assert_eq!(frames[0]["state"]["target"].as_f64().unwrap(), 600.0);
    }

    #[test]
    fn reduced_motion_scroll_jumps() {
        let frames = lines(Effect::Scroll, 2, true);
        assert_eq!(frames[0]["state"]["position"].as_f64().unwrap(), 600.0);
    }

    #[test]
    fn count_up_finishes_on_the_displayed_value() {
        let frames = lines(Effect::CountUp, 150, false);
        assert_eq!(frames[0]["state"]["finished"], false);
        let last = &frames[149]["state"];
        assert_eq!(last["text"], "94.7%");
        assert_eq!(last["finished"], true);
    }

    #[test]
    fn reduced_motion_parallax_stays_put() {
        let frames = lines(Effect::Parallax, 20, true);
        assert!(frames
            .iter()
            .all(|frame| frame["state"]["offset"].as_f64().unwrap() == 0.0));
    }

    #[test]
    fn reveal_uncovers_stats_while_scrolling() {
        let frames = lines(Effect::Reveal, 240, false);
        let first: Vec<bool> = serde_json::from_value(frames[0]["state"]["revealed"].clone()).unwrap();
        assert!(first.iter().all(|revealed| !revealed));
        let last: Vec<bool> =
            serde_json::from_value(frames[239]["state"]["revealed"].clone()).unwrap();
        assert!(last.iter().all(|revealed| *revealed));
    }

    #[test]
    fn config_options_drive_the_effects() {
        let config = SiteConfig::from_toml_str(
            r#"
version = 1
[scroll]
smooth_wheel = false
[effects.typewriter]
phrases = ["Lead PM"]
type_interval = "10ms"
"#,
        )
        .unwrap();

        let scroll = lines_with(&config, Effect::Scroll, 1, false);
        assert_eq!(scroll[0]["state"]["position"].as_f64().unwrap(), 600.0);

        let typed = lines_with(&config, Effect::Typewriter, 10, false);
        assert_eq!(typed[9]["state"]["text"], "Lead PM");
    }
}

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hero::{Antialiasing, Hero, HeroConfig, MotionPreference};
use siteconfig::{AntialiasSetting, MotionSetting, SiteConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::RunArgs;
use crate::paths::AppPaths;

pub const ENV_REDUCED_MOTION: &str = "HIREDPATH_REDUCED_MOTION";

const DEFAULT_SURFACE: (u32, u32) = (1280, 720);

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads `--config` if given, else the discovered config file if it exists, else defaults.
pub fn load_config(explicit: Option<&Path>, paths: &AppPaths) -> Result<SiteConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let discovered = paths.config_file();
            if !discovered.exists() {
                tracing::debug!(
                    path = %discovered.display(),
                    "no config file found; using built-in defaults"
                );
                return Ok(SiteConfig::default());
            }
            discovered
        }
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    let config = SiteConfig::from_toml_str(&raw)
        .with_context(|| format!("failed to load config at {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded site config");
    Ok(config)
}

/// Resolves the reduced-motion signal: CLI flag, then environment, then config.
pub fn resolve_motion(
    cli_reduced: bool,
    env_value: Option<&OsStr>,
    config: MotionSetting,
) -> MotionPreference {
    if cli_reduced {
        return MotionPreference::Reduce;
    }
    if let Some(value) = env_value {
        match parse_motion_env(value) {
            Some(reduced) => return MotionPreference::from_reduced(reduced),
            None => tracing::warn!(
                value = %value.to_string_lossy(),
                "ignoring unrecognised {ENV_REDUCED_MOTION} value"
            ),
        }
    }
    MotionPreference::from_reduced(matches!(config, MotionSetting::Reduce))
}

fn parse_motion_env(value: &OsStr) -> Option<bool> {
    let normalized = value.to_string_lossy().trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" | "reduce" => Some(true),
        "0" | "false" | "no" | "off" | "no-preference" => Some(false),
        _ => None,
    }
}

pub fn motion_from_env(cli_reduced: bool, config: &SiteConfig) -> MotionPreference {
    let env_value = std::env::var_os(ENV_REDUCED_MOTION);
    resolve_motion(cli_reduced, env_value.as_deref(), config.hero.motion)
}

pub fn parse_surface_size(spec: &str) -> Result<(u32, u32)> {
    let trimmed = spec.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| anyhow::anyhow!("expected WxH format, e.g. 1920x1080"))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid width in size specification"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid height in size specification"))?;

    if width == 0 || height == 0 {
        anyhow::bail!("surface dimensions must be greater than zero");
    }

    Ok((width, height))
}

fn antialiasing_from_setting(setting: AntialiasSetting) -> Antialiasing {
    match setting.samples() {
        None => Antialiasing::Auto,
        Some(0 | 1) => Antialiasing::Off,
        Some(samples) => Antialiasing::Samples(samples),
    }
}

/// Merges CLI flags over the `[hero]` config section.
pub fn hero_config(
    args: &RunArgs,
    config: &SiteConfig,
    motion: MotionPreference,
) -> Result<HeroConfig> {
    let surface_size = match args.size.as_deref() {
        Some(spec) => parse_surface_size(spec)?,
        None => config.hero.size.unwrap_or(DEFAULT_SURFACE),
    };
    let target_fps = args
        .fps
        .or(config.hero.fps)
        .filter(|fps| fps.is_finite() && *fps > 0.0);
    let antialiasing = args
        .antialias
        .or_else(|| config.hero.antialias.map(antialiasing_from_setting))
        .unwrap_or_default();

    Ok(HeroConfig {
        surface_size,
        target_fps,
        antialiasing,
        motion,
        max_pixel_ratio: config.hero.max_pixel_ratio,
        title: config.page.title.clone(),
    })
}

pub fn run(args: RunArgs, config: &SiteConfig, motion: MotionPreference) -> Result<()> {
    let hero_config = hero_config(&args, config, motion)?;
    tracing::info!(
        width = hero_config.surface_size.0,
        height = hero_config.surface_size.1,
        fps = ?hero_config.target_fps,
        antialias = ?hero_config.antialiasing,
        motion = %hero_config.motion,
        "starting hero window"
    );
    Hero::new(hero_config).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn args() -> RunArgs {
        RunArgs {
            size: None,
            fps: None,
            antialias: None,
        }
    }

    #[test]
    fn parses_surface_sizes() {
        assert_eq!(parse_surface_size("1920x1080").unwrap(), (1920, 1080));
        assert_eq!(parse_surface_size(" 800 X 600 ").unwrap(), (800, 600));
        assert!(parse_surface_size("0x600").is_err());
        assert!(parse_surface_size("wide").is_err());
    }

    #[test]
    fn cli_flag_wins_over_env_and_config() {
        let env = OsString::from("0");
        assert_eq!(
            resolve_motion(true, Some(env.as_os_str()), MotionSetting::NoPreference),
            MotionPreference::Reduce
        );
    }

    #[test]
    fn env_overrides_config() {
        let env = OsString::from("no-preference");
        assert_eq!(
            resolve_motion(false, Some(env.as_os_str()), MotionSetting::Reduce),
            MotionPreference::NoPreference
        );
        let env = OsString::from("TRUE");
        assert_eq!(
            resolve_motion(false, Some(env.as_os_str()), MotionSetting::NoPreference),
            MotionPreference::Reduce
        );
    }

    #[test]
    fn unrecognised_env_falls_back_to_config() {
        let env = OsString::from("sometimes");
        assert_eq!(
            resolve_motion(false, Some(env.as_os_str()), MotionSetting::Reduce),
            MotionPreference::Reduce
        );
        assert_eq!(
            resolve_motion(false, None, MotionSetting::NoPreference),
            MotionPreference::NoPreference
        );
    }

    #[test]
    fn hero_config_defaults() {
        let config = hero_config(&args(), &SiteConfig::default(), MotionPreference::NoPreference)
            .unwrap();
        assert_eq!(config.surface_size, (1280, 720));
        assert_eq!(config.target_fps, None);
        assert_eq!(config.antialiasing, Antialiasing::Auto);
        assert_eq!(config.max_pixel_ratio, 2.0);
        assert_eq!(config.title, "HiredPath");
    }

    #[test]
    fn cli_flags_override_config_section() {
        let site = SiteConfig::from_toml_str(
            "version = 1\n[hero]\nsize = \"640x480\"\nfps = 24\nantialias = \"off\"\n",
        )
        .unwrap();

        let from_config = hero_config(&args(), &site, MotionPreference::Reduce).unwrap();
        assert_eq!(from_config.surface_size, (640, 480));
        assert_eq!(from_config.target_fps, Some(24.0));
        assert_eq!(from_config.antialiasing, Antialiasing::Off);
        assert_eq!(from_config.motion, MotionPreference::Reduce);

        let overridden = hero_config(
            &RunArgs {
                size: Some("1024x768".into()),
                fps: Some(0.0),
                antialias: Some(Antialiasing::Samples(4)),
            },
            &site,
            MotionPreference::NoPreference,
        )
        .unwrap();
        assert_eq!(overridden.surface_size, (1024, 768));
        assert_eq!(overridden.target_fps, None);
        assert_eq!(overridden.antialiasing, Antialiasing::Samples(4));
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let root = tempfile::TempDir::new().unwrap();
        let missing = root.path().join("missing.toml");
        let paths = AppPaths::new(root.path().join("config"));
        assert!(load_config(Some(&missing), &paths).is_err());
        assert_eq!(load_config(None, &paths).unwrap(), SiteConfig::default());
    }
}

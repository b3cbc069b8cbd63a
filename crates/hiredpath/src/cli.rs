use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use hero::Antialiasing;

#[derive(Parser, Debug)]
#[command(
    name = "hiredpath",
    author,
    version,
    about = "HiredPath landing page: 3D hero window and static page renderer",
    arg_required_else_help = false
)]
pub struct Cli {
    /// Read settings from this file instead of the discovered `hiredpath.toml`.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report `prefers-reduced-motion: reduce` to every effect.
    #[arg(long, global = true)]
    pub reduced_motion: bool,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Hero window size in logical pixels (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Optional FPS cap for the hero (0=uncapped).
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Anti-aliasing policy: `auto`, `off`, or an explicit MSAA sample count (e.g. `4`).
    #[arg(long, value_name = "MODE", value_parser = parse_antialias)]
    pub antialias: Option<Antialiasing>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the landing page to a standalone HTML document.
    Page(PageArgs),
    /// Simulate a page effect and print its frames as JSON lines.
    Motion(MotionArgs),
    /// Print resolved configuration paths.
    Paths,
}

#[derive(Parser, Debug)]
pub struct PageArgs {
    /// Output file; prints to stdout when omitted.
    #[arg(long, short, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct MotionArgs {
    /// Effect to simulate.
    #[arg(value_enum)]
    pub effect: Effect,

    /// Number of frames to emit.
    #[arg(long, default_value_t = 120)]
    pub frames: usize,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60.0, value_parser = parse_positive_fps)]
    pub fps: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Effect {
    Scroll,
    Reveal,
    Parallax,
    Tilt,
    Typewriter,
    CountUp,
}

impl Effect {
    pub fn name(self) -> &'static str {
        match self {
            Effect::Scroll => "scroll",
            Effect::Reveal => "reveal",
            Effect::Parallax => "parallax",
            Effect::Tilt => "tilt",
            Effect::Typewriter => "typewriter",
            Effect::CountUp => "count-up",
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_antialias(value: &str) -> Result<Antialiasing, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("anti-alias mode must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "auto" | "max" | "default" => Ok(Antialiasing::Auto),
        "off" | "none" | "disable" | "disabled" | "0" => Ok(Antialiasing::Off),
        _ => {
            let samples: u32 = normalized.parse().map_err(|_| {
                format!("invalid anti-alias sample count '{trimmed}'; use auto/off or 2/4/8/16")
            })?;

            if samples == 0 || samples == 1 {
                return Ok(Antialiasing::Off);
            }

            if !matches!(samples, 2 | 4 | 8 | 16) {
                return Err(format!(
                    "unsupported sample count {samples}; supported values are 2, 4, 8, or 16"
                ));
            }

            Ok(Antialiasing::Samples(samples))
        }
    }
}

fn parse_positive_fps(value: &str) -> Result<f32, String> {
    let fps: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid frame rate '{value}'"))?;
    if !(fps.is_finite() && fps > 0.0) {
        return Err("frame rate must be greater than zero".to_string());
    }
    Ok(fps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_antialias_modes() {
        assert_eq!(parse_antialias("auto").unwrap(), Antialiasing::Auto);
        assert_eq!(parse_antialias("OFF").unwrap(), Antialiasing::Off);
        assert_eq!(parse_antialias("1").unwrap(), Antialiasing::Off);
        assert_eq!(parse_antialias("8").unwrap(), Antialiasing::Samples(8));
        assert!(parse_antialias("3").is_err());
        assert!(parse_antialias("").is_err());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "hiredpath",
            "motion",
            "count-up",
            "--frames",
            "3",
            "--reduced-motion",
        ])
        .unwrap();
        assert!(cli.reduced_motion);
        match cli.command {
            Some(Command::Motion(args)) => {
                assert_eq!(args.effect, Effect::CountUp);
                assert_eq!(args.frames, 3);
                assert_eq!(args.fps, 60.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn zero_fps_is_rejected_for_simulation() {
        assert!(Cli::try_parse_from(["hiredpath", "motion", "tilt", "--fps", "0"]).is_err());
    }
}

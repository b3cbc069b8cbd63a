mod cli;
mod content;
mod page;
mod paths;
mod preview;
mod run;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Datelike;
use cli::{Command, MotionArgs, PageArgs};
use paths::AppPaths;
use preview::PreviewOptions;
use siteconfig::SiteConfig;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    let paths = AppPaths::discover()?;
    let config = run::load_config(cli.config.as_deref(), &paths)?;
    let motion = run::motion_from_env(cli.reduced_motion, &config);

    match cli.command {
        Some(Command::Page(args)) => write_page(&args, &config),
        Some(Command::Motion(args)) => print_motion(&args, &config, motion.is_reduced()),
        Some(Command::Paths) => print_paths(&paths, cli.config.as_deref()),
        None => run::run(cli.run, &config, motion),
    }
}

fn write_page(args: &PageArgs, config: &SiteConfig) -> Result<()> {
    let year = chrono::Local::now().year();
    let html = page::render_page(config, year)?;
    match &args.out {
        Some(path) => {
            fs::write(path, html)
                .with_context(|| format!("failed to write page to {}", path.display()))?;
            tracing::info!(path = %path.display(), "landing page written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .context("failed to write page to stdout")?;
        }
    }
    Ok(())
}

fn print_motion(args: &MotionArgs, config: &SiteConfig, reduced_motion: bool) -> Result<()> {
    let options = PreviewOptions {
        effect: args.effect,
        frames: args.frames,
        fps: args.fps,
        reduced_motion,
    };
    let mut stdout = io::stdout().lock();
    preview::run_preview(options, config, &mut stdout)
}

fn print_paths(paths: &AppPaths, explicit: Option<&Path>) -> Result<()> {
    println!("Config dir:  {}", paths.config_dir().display());
    match explicit {
        Some(path) => println!("Config file: {} (from --config)", path.display()),
        None => {
            let file = paths.config_file();
            let status = if file.exists() { "" } else { " (not found; using defaults)" };
            println!("Config file: {}{status}", file.display());
        }
    }
    Ok(())
}

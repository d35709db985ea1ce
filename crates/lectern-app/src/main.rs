//! LECTERN headless session replay.
//!
//! Replays a recorded reading session (document view notifications,
//! pointer crossings, menus, fullscreen) through the chrome coordination
//! core and prints the resulting chrome state as JSON.
//!
//! Usage: `lectern-app <session.json> [lectern.toml]`. The config path may
//! also come from `LECTERN_CONFIG`.

mod host;
mod reader;
mod script;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use lectern_types::config::LecternConfig;
use reader::Reader;
use script::Session;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let session_path = PathBuf::from(
        args.next()
            .context("usage: lectern-app <session.json> [lectern.toml]")?,
    );
    let config = load_config(args.next().or_else(|| std::env::var("LECTERN_CONFIG").ok()))?;

    let session = Session::load(&session_path)
        .with_context(|| format!("loading session {}", session_path.display()))?;
    log::info!(
        "Replaying {} steps ({} outline entries, {}x{} view)",
        session.steps.len(),
        session.outline.node_count(),
        session.bounds.width,
        session.bounds.height,
    );

    let mut reader = Reader::new(&config, session.outline, session.bounds);
    for step in &session.steps {
        log::debug!("Step: {step:?}");
        reader.step(step);
    }

    println!("{}", serde_json::to_string_pretty(&reader.summary())?);
    Ok(())
}

fn load_config(path: Option<String>) -> Result<LecternConfig> {
    let Some(path) = path else {
        log::warn!("No config given -- using defaults");
        return Ok(LecternConfig::default());
    };
    let config = LecternConfig::load(Path::new(&path))
        .with_context(|| format!("loading config {path}"))?;
    log::info!("Loaded config: {path}");
    Ok(config)
}

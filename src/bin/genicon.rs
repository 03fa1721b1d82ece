use std::env;
use std::path::PathBuf;

use aicon::icon::{self, IconSpec};
use anyhow::Context;

fn main() {
    env_logger::init();
    // Best-effort asset generation: failures are reported, never fatal.
    if let Err(e) = run() {
        log::error!("icon generation failed: {e:#}");
    }
}

fn run() -> anyhow::Result<()> {
    let out: PathBuf = env::args().nth(1).unwrap_or_else(|| "icon.png".to_string()).into();
    let img = icon::render(IconSpec::new(512)).context("render 512x512 icon")?;
    icon::write_icon(&img, &out).with_context(|| format!("write {}", out.display()))?;
    println!("✓ Created icon: {}", out.display());
    Ok(())
}

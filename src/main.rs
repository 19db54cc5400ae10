use anyhow::{Context, Result};
use clap::Parser;
use yule3d::config::AppConfig;
use yule3d::window::Window;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::parse();
    log::info!(
        "Opening a {}x{} card, track {:?}.",
        config.width,
        config.height,
        config.track()
    );

    Window::run(config).context("the card window failed")?;
    Ok(())
}

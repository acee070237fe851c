//! Draws a blue triangle over a yellow background. Escape quits.
use gl_bootstrap::{app, config::AppConfig, logging::init_logging};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::triangle();
    init_logging(config.logging.clone());

    if let Err(err) = app::run(config) {
        log::error!("{err:#}");
        return Err(err);
    }
    Ok(())
}

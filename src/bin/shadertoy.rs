//! Runs `shaders/fragment.glsl` over the whole window, feeding it
//! `u_resolution` and `u_time`. Escape quits.
use gl_bootstrap::{app, config::AppConfig, logging::init_logging};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::shadertoy();
    init_logging(config.logging.clone());

    if let Err(err) = app::run(config) {
        log::error!("{err:#}");
        return Err(err);
    }
    Ok(())
}

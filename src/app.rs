//! Startup sequence shared by both binaries.
use anyhow::Context;

use crate::{
    color::ClearColor,
    config::{AppConfig, ShaderErrorPolicy},
    frame::{FrameDriver, RunSummary},
    gl_wrappers::{gl_upd_viewport, Gl, Program},
    mesh::GpuMesh,
    render::Render,
    shader_source::{FALLBACK_FRAG_SOURCE, TRIANGLE_VERT_SOURCE},
    window::SdlSurface,
};

/// Build the program from `vert_source` and `frag_source`, applying `policy` on failure.
///
/// # Errors
/// Errors with the shader diagnostic under [`ShaderErrorPolicy::Abort`],
/// or if even the fallback program fails to build.
pub fn build_program<'gl, G: Gl>(
    gl: &'gl G,
    vert_source: &str,
    frag_source: &str,
    policy: ShaderErrorPolicy,
) -> anyhow::Result<Program<'gl, G>> {
    match Program::build(gl, vert_source, frag_source) {
        Ok(program) => Ok(program),
        Err(err) => match policy {
            ShaderErrorPolicy::Abort => Err(err).context("could not build the shader program"),
            ShaderErrorPolicy::Fallback => {
                log::error!("{err}");
                log::warn!("drawing with the fallback shader program");
                Program::build(gl, TRIANGLE_VERT_SOURCE, FALLBACK_FRAG_SOURCE)
                    .context("could not build the fallback shader program")
            }
        },
    }
}

/// Open the window, set up the scene and run the frame loop until it closes.
///
/// # Errors
/// Errors if the window or GL context cannot be created, or if the
/// shader program cannot be built and the policy says to abort.
pub fn run(config: AppConfig) -> anyhow::Result<RunSummary> {
    let mut surface = SdlSurface::open(&config.window)
        .map_err(anyhow::Error::msg)
        .context("failed to create the window")?;
    let gl = surface
        .load_gl()
        .map_err(anyhow::Error::msg)
        .context("failed to load OpenGL")?;

    let (width, height) = surface.drawable_size();
    gl_upd_viewport(&gl, width, height);

    let sources = config.shaders.load();
    let program = build_program(&gl, &sources.vertex, &sources.fragment, config.on_shader_error)?;
    let mesh = GpuMesh::upload(&gl, &config.mesh.data());
    let background = ClearColor::from_rgb8(config.background);

    let render = Render::new(&gl, program, mesh, background, [width as f32, height as f32]);
    let driver = FrameDriver::new(&gl, render, config.resolution);
    Ok(driver.run(&mut surface))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl_wrappers::{
        fake::{Call, FakeGl, TOY_FRAG, TRIANGLE_VERT},
        ShaderError, ShaderStage,
    };

    #[test]
    fn good_sources_build_under_either_policy() {
        let gl = FakeGl::new();
        assert!(build_program(&gl, TRIANGLE_VERT, TOY_FRAG, ShaderErrorPolicy::Abort).is_ok());
        assert!(build_program(&gl, TRIANGLE_VERT, TOY_FRAG, ShaderErrorPolicy::Fallback).is_ok());
    }

    #[test]
    fn abort_surfaces_the_shader_error() {
        let gl = FakeGl::new();
        let err = build_program(&gl, TRIANGLE_VERT, "", ShaderErrorPolicy::Abort)
            .err()
            .unwrap();
        let shader_err = err.downcast_ref::<ShaderError>().unwrap();
        assert!(matches!(
            shader_err,
            ShaderError::Compile {
                stage: ShaderStage::Fragment,
                ..
            }
        ));
    }

    #[test]
    fn fallback_replaces_a_missing_fragment_shader() {
        let gl = FakeGl::new();
        let program = build_program(&gl, TRIANGLE_VERT, "", ShaderErrorPolicy::Fallback).unwrap();
        // the fallback has no frame uniforms
        assert_eq!(program.uniform_location("u_time"), None);
        let links = gl
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::LinkProgram(_)))
            .count();
        assert_eq!(links, 1);
    }

    #[test]
    fn fallback_cannot_rescue_a_broken_driver() {
        let gl = FakeGl::failing_link("out of memory");
        let err = build_program(&gl, TRIANGLE_VERT, TOY_FRAG, ShaderErrorPolicy::Fallback)
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("fallback"));
    }
}

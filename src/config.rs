//! Startup configuration for both programs.
use std::path::PathBuf;

use crate::{
    logging::LoggingConfig,
    mesh::MeshData,
    shader_source::{ShaderSources, TRIANGLE_FRAG_SOURCE, TRIANGLE_VERT_SOURCE},
};

pub const OPENGL_MAJOR_VER: u8 = 3;
pub const OPENGL_MINOR_VER: u8 = 3;

pub const START_WIDTH: u32 = 640;
pub const START_HEIGHT: u32 = 480;

/// Directory holding `vertex.glsl` and `fragment.glsl`, relative to the working directory.
pub const SHADER_DIR: &str = "shaders";

/// Background behind the triangle, as 8-bit RGB.
pub const BACKGROUND_RGB: [u8; 3] = [235, 195, 52];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("Hello World"),
            width: START_WIDTH,
            height: START_HEIGHT,
            gl_major: OPENGL_MAJOR_VER,
            gl_minor: OPENGL_MINOR_VER,
        }
    }
}

/// What startup does when the shader program fails to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderErrorPolicy {
    /// Fail startup with the diagnostic.
    Abort,
    /// Log the diagnostic and draw with a solid-colour program instead.
    Fallback,
}

/// Whether the resolution uniform follows the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionPolicy {
    /// Pushed once, with the drawable size at startup.
    Fixed,
    /// Pushed again after every resize.
    FollowWindow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshKind {
    Triangle,
    Quad,
}

impl MeshKind {
    pub fn data(self) -> MeshData {
        match self {
            MeshKind::Triangle => MeshData::triangle(),
            MeshKind::Quad => MeshData::quad(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub background: [u8; 3],
    pub shaders: ShaderSources,
    pub mesh: MeshKind,
    pub on_shader_error: ShaderErrorPolicy,
    pub resolution: ResolutionPolicy,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// A blue triangle from embedded shaders.
    pub fn triangle() -> Self {
        Self {
            window: WindowConfig::default(),
            background: BACKGROUND_RGB,
            shaders: ShaderSources::Embedded {
                vertex: TRIANGLE_VERT_SOURCE,
                fragment: TRIANGLE_FRAG_SOURCE,
            },
            mesh: MeshKind::Triangle,
            on_shader_error: ShaderErrorPolicy::Abort,
            resolution: ResolutionPolicy::Fixed,
            logging: LoggingConfig::default(),
        }
    }

    /// A full-screen quad shaded by `shaders/*.glsl`, fed resolution and time.
    pub fn shadertoy() -> Self {
        Self {
            window: WindowConfig {
                title: String::from("Shader Toy"),
                ..WindowConfig::default()
            },
            shaders: ShaderSources::Files {
                dir: PathBuf::from(SHADER_DIR),
            },
            mesh: MeshKind::Quad,
            on_shader_error: ShaderErrorPolicy::Fallback,
            ..Self::triangle()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_share_window_defaults() {
        let triangle = AppConfig::triangle();
        let toy = AppConfig::shadertoy();
        assert_eq!(triangle.window.width, toy.window.width);
        assert_eq!((toy.window.gl_major, toy.window.gl_minor), (3, 3));
        assert_eq!(toy.background, BACKGROUND_RGB);
    }

    #[test]
    fn shadertoy_reads_shader_files_and_draws_a_quad() {
        let toy = AppConfig::shadertoy();
        assert_eq!(
            toy.shaders,
            ShaderSources::Files {
                dir: PathBuf::from("shaders")
            }
        );
        assert_eq!(toy.mesh, MeshKind::Quad);
        assert_eq!(toy.on_shader_error, ShaderErrorPolicy::Fallback);
        assert_eq!(toy.resolution, ResolutionPolicy::Fixed);
    }

    #[test]
    fn triangle_aborts_on_broken_embedded_shaders() {
        let triangle = AppConfig::triangle();
        assert_eq!(triangle.mesh.data().draw_count(), 3);
        assert_eq!(triangle.on_shader_error, ShaderErrorPolicy::Abort);
    }
}

//! Where shader source text comes from.
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const TRIANGLE_VERT_SOURCE: &str = include_str!("../glsl/vert_shader.glsl");
pub const TRIANGLE_FRAG_SOURCE: &str = include_str!("../glsl/frag_shader.glsl");
/// Solid magenta, linked in place of a program that failed to build.
pub const FALLBACK_FRAG_SOURCE: &str = include_str!("../glsl/fallback_frag_shader.glsl");

pub const VERTEX_FILE_NAME: &str = "vertex.glsl";
pub const FRAGMENT_FILE_NAME: &str = "fragment.glsl";

/// Read a shader source file once.
///
/// A missing or unreadable file yields an empty string. That is not an
/// error here: the empty source fails to compile later and gets reported
/// there, with the stage attached.
pub fn read_source(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(source) => {
            log::debug!("read {} bytes of shader source from {}", source.len(), path.display());
            source
        }
        Err(err) => {
            log::warn!("could not read shader source {}: {err}", path.display());
            String::new()
        }
    }
}

/// Vertex and fragment source text, ready to compile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcePair {
    pub vertex: String,
    pub fragment: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShaderSources {
    /// Sources compiled into the binary.
    Embedded {
        vertex: &'static str,
        fragment: &'static str,
    },
    /// `vertex.glsl` and `fragment.glsl` inside `dir`, read at startup.
    Files { dir: PathBuf },
}

impl ShaderSources {
    pub fn load(&self) -> SourcePair {
        match self {
            ShaderSources::Embedded { vertex, fragment } => SourcePair {
                vertex: (*vertex).to_owned(),
                fragment: (*fragment).to_owned(),
            },
            ShaderSources::Files { dir } => SourcePair {
                vertex: read_source(&dir.join(VERTEX_FILE_NAME)),
                fragment: read_source(&dir.join(FRAGMENT_FILE_NAME)),
            },
        }
    }
}

//! Standalone functions and modules to wrap the nitty-gritty of
//! OpenGL objects with Rust structs.
use std::{error::Error, fmt};

pub mod driver;
pub mod program;
pub mod shader;

#[cfg(test)]
pub(crate) mod fake;

pub use driver::*;
pub use program::*;
pub use shader::*;

/// Why a shader program could not be built.
///
/// Compile and link failures are kept apart: a stage can compile on its
/// own and still fail to link against the other one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShaderError {
    /// A single stage failed to compile.
    Compile { stage: ShaderStage, log: String },
    /// Both stages compiled but the program failed to link.
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "failed to compile the {stage} shader: {}", log.trim_end())
            }
            ShaderError::Link { log } => {
                write!(f, "failed to link the shader program: {}", log.trim_end())
            }
        }
    }
}

impl Error for ShaderError {}

/// Safely update the OpenGL viewport.
///
/// Sizes that do not fit a `GLsizei` are clamped.
pub fn gl_upd_viewport<G: Gl>(gl: &G, width: u32, height: u32) {
    let real_width: i32 = width.try_into().unwrap_or(i32::MAX);
    let real_height: i32 = height.try_into().unwrap_or(i32::MAX);
    gl.viewport(0, 0, real_width, real_height);
}

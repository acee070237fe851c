//! Exports [`Shader`] and [`CompiledShader`].
use std::{ffi::CString, fmt};

use gl::types::{GLenum, GLuint};

use super::{Gl, ShaderError};

/// Represents the pipeline stage of a shader object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// This shader is a Vertex shader.
    Vertex,
    /// This shader is a Fragment shader.
    Fragment,
}

impl ShaderStage {
    /// The OpenGL shader type for this stage.
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// An uncompiled OpenGL shader.
/// Contains the source code necessary to compile it.
pub struct Shader<'gl, G: Gl> {
    gl: &'gl G,
    /// GL ID for this shader.
    inner: GLuint,
    stage: ShaderStage,
    /// The source code for this shader.
    source: CString,
    /// Ownership of `inner` moved to a [`CompiledShader`].
    was_compiled: bool,
}

impl<'gl, G: Gl> Shader<'gl, G> {
    /// Wrap shader source code into a type-safe Rust struct.
    ///
    /// # Errors
    /// Errors with a compile error for `stage` if `source` contains an
    /// interior nul byte, since the driver could never see past it.
    pub fn new(gl: &'gl G, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        let source = CString::new(source).map_err(|err| ShaderError::Compile {
            stage,
            log: format!("source contains a nul byte at offset {}", err.nul_position()),
        })?;
        let inner = gl.create_shader(stage);
        log::debug!("created {stage} shader {inner}");
        Ok(Self {
            gl,
            inner,
            stage,
            source,
            was_compiled: false,
        })
    }
    /// Helper function for `Shader::new()` with vertex shaders.
    pub fn vertex(gl: &'gl G, source: &str) -> Result<Self, ShaderError> {
        Self::new(gl, ShaderStage::Vertex, source)
    }
    /// Helper function for `Shader::new()` with fragment shaders.
    pub fn fragment(gl: &'gl G, source: &str) -> Result<Self, ShaderError> {
        Self::new(gl, ShaderStage::Fragment, source)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Compile this shader.
    ///
    /// Returns a [`CompiledShader`], for use in [`Program`](super::Program)s.
    ///
    /// # Errors
    /// Errors if compilation was unsuccessful, with the info log from OpenGL.
    /// The shader object is deleted in that case.
    pub fn compile(mut self) -> Result<CompiledShader<'gl, G>, ShaderError> {
        self.gl.shader_source(self.inner, &self.source);
        self.gl.compile_shader(self.inner);

        if !self.gl.shader_compile_status(self.inner) {
            let log = self.gl.shader_info_log(self.inner);
            return Err(ShaderError::Compile {
                stage: self.stage,
                log,
            });
        }
        self.was_compiled = true;
        Ok(CompiledShader {
            gl: self.gl,
            id: self.inner,
            stage: self.stage,
        })
    }
}

impl<G: Gl> Drop for Shader<'_, G> {
    fn drop(&mut self) {
        if !self.was_compiled {
            self.gl.delete_shader(self.inner);
        }
    }
}

/// A compiled shader object.
/// This can be linked into a [`Program`](super::Program), which consumes it.
pub struct CompiledShader<'gl, G: Gl> {
    gl: &'gl G,
    /// GL ID for this compiled shader.
    id: GLuint,
    stage: ShaderStage,
}

impl<'gl, G: Gl> CompiledShader<'gl, G> {
    pub(super) fn gl(&self) -> &'gl G {
        self.gl
    }
    /// Get the internal GL ID of this shader.
    pub fn id(&self) -> GLuint {
        self.id
    }
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<G: Gl> Drop for CompiledShader<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

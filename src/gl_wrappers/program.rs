//! Exports [`Program`].
use std::ffi::CString;

use gl::types::{GLint, GLuint};

use super::{CompiledShader, Gl, Shader, ShaderError, ShaderStage};

/// Location of an active uniform in a linked [`Program`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformLocation(GLint);

impl UniformLocation {
    pub fn get(self) -> GLint {
        self.0
    }
}

/// Wrapper for a linked OpenGL program.
///
/// Only obtainable from a successful link, so holding one means both
/// stages compiled and linked.
///
/// <https://www.khronos.org/opengl/wiki/GLSL_Object#Program_objects>
pub struct Program<'gl, G: Gl> {
    gl: &'gl G,
    /// The internal OpenGL id for this object.
    id: GLuint,
}

impl<'gl, G: Gl> Program<'gl, G> {
    /// Link a vertex and a fragment shader into a new program.
    ///
    /// Both shaders are consumed and their GL objects deleted once the
    /// link attempt is over, whether or not it succeeded.
    ///
    /// # Errors
    /// Errors with the info log from OpenGL if linking failed.
    pub fn link(
        vert_shader: CompiledShader<'gl, G>,
        frag_shader: CompiledShader<'gl, G>,
    ) -> Result<Self, ShaderError> {
        debug_assert_eq!(vert_shader.stage(), ShaderStage::Vertex);
        debug_assert_eq!(frag_shader.stage(), ShaderStage::Fragment);

        let gl = vert_shader.gl();
        let program = Self {
            gl,
            id: gl.create_program(),
        };
        gl.attach_shader(program.id, vert_shader.id());
        gl.attach_shader(program.id, frag_shader.id());
        gl.link_program(program.id);
        let linked = gl.program_link_status(program.id);
        gl.detach_shader(program.id, vert_shader.id());
        gl.detach_shader(program.id, frag_shader.id());

        if !linked {
            return Err(ShaderError::Link {
                log: gl.program_info_log(program.id),
            });
        }
        log::debug!("linked program {}", program.id);
        Ok(program)
    }

    /// Compile both stages from source and link them.
    ///
    /// # Errors
    /// Reports the first failure point: vertex compile, fragment compile, or link.
    pub fn build(gl: &'gl G, vert_source: &str, frag_source: &str) -> Result<Self, ShaderError> {
        let vert_shader = Shader::vertex(gl, vert_source)?.compile()?;
        let frag_shader = Shader::fragment(gl, frag_source)?.compile()?;
        Self::link(vert_shader, frag_shader)
    }

    /// Get the internal id of this program.
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Make this the active program.
    pub fn bind(&self) {
        self.gl.use_program(self.id);
    }

    /// Get the location of a uniform in this program.
    ///
    /// Returns `None` if `name` is not an active uniform, which includes
    /// uniforms the driver optimized out and names containing a nul byte.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        let name = CString::new(name).ok()?;
        let location = self.gl.get_uniform_location(self.id, &name);
        if location < 0 {
            None
        } else {
            Some(UniformLocation(location))
        }
    }
}

impl<G: Gl> Drop for Program<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}

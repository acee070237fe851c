//! Exports the [`Gl`] trait and its native implementation, [`NativeGl`].
//!
//! Everything above this module talks to OpenGL through [`Gl`], so shader
//! building and the frame loop can run against a fake driver in tests.
use std::{
    ffi::{c_void, CStr},
    marker::PhantomData,
    ptr::null,
};

use gl::types::{GLenum, GLint, GLsizei, GLuint};

use super::ShaderStage;

/// Length of the buffer handed to the driver when fetching info logs.
/// Longer logs are truncated by the driver.
pub const INFO_LOG_CAPACITY: usize = 512;

/// The buffer binding points used by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferTarget {
    /// `GL_ARRAY_BUFFER`, vertex data.
    Array,
    /// `GL_ELEMENT_ARRAY_BUFFER`, index data.
    ElementArray,
}

impl BufferTarget {
    pub fn gl_enum(self) -> GLenum {
        match self {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// The slice of the OpenGL API this crate uses.
///
/// Object ids are plain GL names. `0` is never returned for a live object.
pub trait Gl {
    fn create_shader(&self, stage: ShaderStage) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &CStr);
    fn compile_shader(&self, shader: GLuint);
    fn shader_compile_status(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn detach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn program_link_status(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn delete_program(&self, program: GLuint);
    fn use_program(&self, program: GLuint);

    /// Returns `-1` if `name` is not an active uniform of `program`.
    fn get_uniform_location(&self, program: GLuint, name: &CStr) -> GLint;
    fn uniform_1f(&self, location: GLint, x: f32);
    fn uniform_2f(&self, location: GLint, x: f32, y: f32);

    fn gen_vertex_array(&self) -> GLuint;
    fn bind_vertex_array(&self, vao: GLuint);
    fn delete_vertex_array(&self, vao: GLuint);
    fn gen_buffer(&self) -> GLuint;
    fn bind_buffer(&self, target: BufferTarget, buffer: GLuint);
    /// Uploads `data` to the buffer bound at `target` with `GL_STATIC_DRAW`.
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: GLuint);
    /// Describes attribute `index` as `components` tightly packed floats.
    fn vertex_attrib_pointer_f32(&self, index: GLuint, components: GLint);
    fn enable_vertex_attrib_array(&self, index: GLuint);

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    /// Clears the colour buffer.
    fn clear(&self);
    /// Draws `count` vertices as `GL_TRIANGLES`.
    fn draw_arrays(&self, count: GLsizei);
    /// Draws `count` `u32` indices from the bound element buffer as `GL_TRIANGLES`.
    fn draw_elements(&self, count: GLsizei);
}

/// [`Gl`] backed by the loaded function pointers of the `gl` crate.
///
/// Not `Send`: the context it was loaded from is current on one thread only.
pub struct NativeGl {
    _not_send: PhantomData<*const ()>,
}

impl NativeGl {
    /// Load every GL function pointer through `loader`.
    ///
    /// # Errors
    /// Errors if the core shader entry points could not be resolved,
    /// which usually means no context is current.
    pub fn load_with<F>(loader: F) -> Result<Self, String>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        if !gl::CreateShader::is_loaded() || !gl::GenVertexArrays::is_loaded() {
            return Err(String::from(
                "Failed to load OpenGL function pointers. Is a context current?",
            ));
        }
        Ok(Self {
            _not_send: PhantomData,
        })
    }

    /// Logs and drains the GL error flag.
    fn check_error(&self, what: &str) {
        // SAFETY:
        // gl::GetError has no preconditions once loaded.
        let mut code = unsafe { gl::GetError() };
        while code != gl::NO_ERROR {
            log::warn!("OpenGL error 0x{code:04x} after {what}");
            code = unsafe { gl::GetError() };
        }
    }
}

fn read_info_log(fetch: impl FnOnce(GLsizei, *mut GLsizei, *mut u8)) -> String {
    let mut infolog: Vec<u8> = vec![0; INFO_LOG_CAPACITY];
    let mut length: GLsizei = 0;
    fetch(INFO_LOG_CAPACITY as GLsizei, &mut length, infolog.as_mut_ptr());
    infolog.truncate(usize::try_from(length).unwrap_or(0).min(INFO_LOG_CAPACITY));
    String::from_utf8_lossy(&infolog).into_owned()
}

// SAFETY (for every unsafe block below):
// a NativeGl only exists after the function pointers were loaded for a
// current context, and every pointer argument outlives the call.
impl Gl for NativeGl {
    fn create_shader(&self, stage: ShaderStage) -> GLuint {
        unsafe { gl::CreateShader(stage.gl_enum()) }
    }
    fn shader_source(&self, shader: GLuint, source: &CStr) {
        unsafe { gl::ShaderSource(shader, 1, &source.as_ptr(), null()) }
    }
    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) }
    }
    fn shader_compile_status(&self, shader: GLuint) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success == GLint::from(gl::TRUE)
    }
    fn shader_info_log(&self, shader: GLuint) -> String {
        read_info_log(|capacity, length, buf| unsafe {
            gl::GetShaderInfoLog(shader, capacity, length, buf.cast())
        })
    }
    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }
    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }
    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::DetachShader(program, shader) }
    }
    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }
    fn program_link_status(&self, program: GLuint) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success == GLint::from(gl::TRUE)
    }
    fn program_info_log(&self, program: GLuint) -> String {
        read_info_log(|capacity, length, buf| unsafe {
            gl::GetProgramInfoLog(program, capacity, length, buf.cast())
        })
    }
    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }
    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn get_uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }
    fn uniform_1f(&self, location: GLint, x: f32) {
        unsafe { gl::Uniform1f(location, x) }
    }
    fn uniform_2f(&self, location: GLint, x: f32, y: f32) {
        unsafe { gl::Uniform2f(location, x, y) }
    }

    fn gen_vertex_array(&self) -> GLuint {
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        vao
    }
    fn bind_vertex_array(&self, vao: GLuint) {
        unsafe { gl::BindVertexArray(vao) }
    }
    fn delete_vertex_array(&self, vao: GLuint) {
        unsafe { gl::DeleteVertexArrays(1, &vao) }
    }
    fn gen_buffer(&self) -> GLuint {
        let mut buffer = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        buffer
    }
    fn bind_buffer(&self, target: BufferTarget, buffer: GLuint) {
        unsafe { gl::BindBuffer(target.gl_enum(), buffer) }
    }
    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        // slices never exceed isize::MAX bytes
        let size = data.len() as isize;
        unsafe { gl::BufferData(target.gl_enum(), size, data.as_ptr().cast(), gl::STATIC_DRAW) }
    }
    fn delete_buffer(&self, buffer: GLuint) {
        unsafe { gl::DeleteBuffers(1, &buffer) }
    }
    fn vertex_attrib_pointer_f32(&self, index: GLuint, components: GLint) {
        let stride = components * size_of::<f32>() as GLint;
        unsafe { gl::VertexAttribPointer(index, components, gl::FLOAT, gl::FALSE, stride, null()) }
    }
    fn enable_vertex_attrib_array(&self, index: GLuint) {
        unsafe { gl::EnableVertexAttribArray(index) }
    }

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        unsafe { gl::Viewport(x, y, width, height) }
    }
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { gl::ClearColor(r, g, b, a) }
    }
    fn clear(&self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) }
    }
    fn draw_arrays(&self, count: GLsizei) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, 0, count) };
        self.check_error("gl::DrawArrays");
    }
    fn draw_elements(&self, count: GLsizei) {
        unsafe { gl::DrawElements(gl::TRIANGLES, count, gl::UNSIGNED_INT, null()) };
        self.check_error("gl::DrawElements");
    }
}

//! A recording [`Gl`] for tests. No context required.
//!
//! Compilation fails for sources without `void main` or with an `#error`
//! directive. A uniform is active when it is declared with `uniform` and
//! its name appears again somewhere in the linked sources.
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    ffi::CStr,
};

use gl::types::{GLint, GLsizei, GLuint};

use super::{BufferTarget, Gl, ShaderStage};

pub const TRIANGLE_VERT: &str = crate::shader_source::TRIANGLE_VERT_SOURCE;
pub const SOLID_FRAG: &str = crate::shader_source::TRIANGLE_FRAG_SOURCE;
pub const TOY_FRAG: &str = include_str!("../../shaders/fragment.glsl");

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, GLuint),
    ShaderSource(GLuint),
    CompileShader(GLuint),
    DeleteShader(GLuint),
    CreateProgram(GLuint),
    AttachShader(GLuint, GLuint),
    DetachShader(GLuint, GLuint),
    LinkProgram(GLuint),
    LinkStatus(GLuint),
    DeleteProgram(GLuint),
    UseProgram(GLuint),
    Uniform1f(GLint, f32),
    Uniform2f(GLint, f32, f32),
    GenVertexArray(GLuint),
    BindVertexArray(GLuint),
    DeleteVertexArray(GLuint),
    GenBuffer(GLuint),
    BindBuffer(BufferTarget, GLuint),
    BufferData(BufferTarget, usize),
    DeleteBuffer(GLuint),
    VertexAttribPointer(GLuint, GLint),
    EnableVertexAttribArray(GLuint),
    Viewport(GLint, GLint, GLsizei, GLsizei),
    ClearColor(f32, f32, f32, f32),
    Clear,
    DrawArrays(GLsizei),
    DrawElements(GLsizei),
}

struct FakeShader {
    source: String,
    log: Option<String>,
}

#[derive(Default)]
pub struct FakeGl {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<GLuint>,
    shaders: RefCell<HashMap<GLuint, FakeShader>>,
    attached: RefCell<HashMap<GLuint, Vec<GLuint>>>,
    /// Active uniforms of each successfully linked program, in location order.
    uniforms: RefCell<HashMap<GLuint, Vec<String>>>,
    link_failure: Option<String>,
}

impl FakeGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every link attempt fails with `log`.
    pub fn failing_link(log: &str) -> Self {
        Self {
            link_failure: Some(log.to_owned()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc(&self) -> GLuint {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

fn compile_log(source: &str) -> Option<String> {
    if let Some((number, line)) = source
        .lines()
        .enumerate()
        .find(|(_, line)| line.trim_start().starts_with("#error"))
    {
        return Some(format!("0:{}(1): error: {}\n", number + 1, line.trim()));
    }
    if !source.contains("void main") {
        return Some(String::from("0:1(1): error: missing entry point `main`\n"));
    }
    None
}

fn declared_uniforms(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let mut words = line.trim().strip_prefix("uniform ")?.split_whitespace();
            let _ty = words.next()?;
            let name = words.next()?.trim_end_matches(';');
            Some(name.to_owned())
        })
        .collect()
}

impl Gl for FakeGl {
    fn create_shader(&self, stage: ShaderStage) -> GLuint {
        let id = self.alloc();
        self.shaders.borrow_mut().insert(
            id,
            FakeShader {
                source: String::new(),
                log: None,
            },
        );
        self.record(Call::CreateShader(stage, id));
        id
    }
    fn shader_source(&self, shader: GLuint, source: &CStr) {
        if let Some(entry) = self.shaders.borrow_mut().get_mut(&shader) {
            entry.source = source.to_string_lossy().into_owned();
        }
        self.record(Call::ShaderSource(shader));
    }
    fn compile_shader(&self, shader: GLuint) {
        if let Some(entry) = self.shaders.borrow_mut().get_mut(&shader) {
            entry.log = compile_log(&entry.source);
        }
        self.record(Call::CompileShader(shader));
    }
    fn shader_compile_status(&self, shader: GLuint) -> bool {
        self.shaders
            .borrow()
            .get(&shader)
            .is_some_and(|entry| entry.log.is_none())
    }
    fn shader_info_log(&self, shader: GLuint) -> String {
        self.shaders
            .borrow()
            .get(&shader)
            .and_then(|entry| entry.log.clone())
            .unwrap_or_default()
    }
    fn delete_shader(&self, shader: GLuint) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> GLuint {
        let id = self.alloc();
        self.record(Call::CreateProgram(id));
        id
    }
    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.attached.borrow_mut().entry(program).or_default().push(shader);
        self.record(Call::AttachShader(program, shader));
    }
    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        if let Some(list) = self.attached.borrow_mut().get_mut(&program) {
            list.retain(|attached| *attached != shader);
        }
        self.record(Call::DetachShader(program, shader));
    }
    fn link_program(&self, program: GLuint) {
        self.record(Call::LinkProgram(program));
        if self.link_failure.is_some() {
            return;
        }
        let shaders = self.shaders.borrow();
        let sources: Vec<&str> = self
            .attached
            .borrow()
            .get(&program)
            .into_iter()
            .flatten()
            .filter_map(|id| shaders.get(id).map(|entry| entry.source.as_str()))
            .collect();
        let combined = sources.concat();
        let mut active = vec![];
        for name in sources.iter().flat_map(|source| declared_uniforms(source)) {
            if combined.matches(name.as_str()).count() > 1 && !active.contains(&name) {
                active.push(name);
            }
        }
        self.uniforms.borrow_mut().insert(program, active);
    }
    fn program_link_status(&self, program: GLuint) -> bool {
        self.record(Call::LinkStatus(program));
        self.uniforms.borrow().contains_key(&program)
    }
    fn program_info_log(&self, _program: GLuint) -> String {
        self.link_failure.clone().unwrap_or_default()
    }
    fn delete_program(&self, program: GLuint) {
        self.record(Call::DeleteProgram(program));
    }
    fn use_program(&self, program: GLuint) {
        self.record(Call::UseProgram(program));
    }

    fn get_uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        let name = name.to_string_lossy();
        self.uniforms
            .borrow()
            .get(&program)
            .and_then(|active| active.iter().position(|uniform| *uniform == name))
            .map_or(-1, |location| location as GLint)
    }
    fn uniform_1f(&self, location: GLint, x: f32) {
        self.record(Call::Uniform1f(location, x));
    }
    fn uniform_2f(&self, location: GLint, x: f32, y: f32) {
        self.record(Call::Uniform2f(location, x, y));
    }

    fn gen_vertex_array(&self) -> GLuint {
        let id = self.alloc();
        self.record(Call::GenVertexArray(id));
        id
    }
    fn bind_vertex_array(&self, vao: GLuint) {
        self.record(Call::BindVertexArray(vao));
    }
    fn delete_vertex_array(&self, vao: GLuint) {
        self.record(Call::DeleteVertexArray(vao));
    }
    fn gen_buffer(&self) -> GLuint {
        let id = self.alloc();
        self.record(Call::GenBuffer(id));
        id
    }
    fn bind_buffer(&self, target: BufferTarget, buffer: GLuint) {
        self.record(Call::BindBuffer(target, buffer));
    }
    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.len()));
    }
    fn delete_buffer(&self, buffer: GLuint) {
        self.record(Call::DeleteBuffer(buffer));
    }
    fn vertex_attrib_pointer_f32(&self, index: GLuint, components: GLint) {
        self.record(Call::VertexAttribPointer(index, components));
    }
    fn enable_vertex_attrib_array(&self, index: GLuint) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.record(Call::Viewport(x, y, width, height));
    }
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor(r, g, b, a));
    }
    fn clear(&self) {
        self.record(Call::Clear);
    }
    fn draw_arrays(&self, count: GLsizei) {
        self.record(Call::DrawArrays(count));
    }
    fn draw_elements(&self, count: GLsizei) {
        self.record(Call::DrawElements(count));
    }
}

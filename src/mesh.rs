//! Fixed geometry and its upload to the GPU.
use std::collections::BTreeSet;

use gl::types::{GLsizei, GLuint};

use crate::gl_wrappers::{BufferTarget, Gl};

/// Attribute slot of the position, `layout (location = 0)` in the shaders.
pub const POSITION_ATTRIB: GLuint = 0;

/// Immutable vertex positions with an optional index list.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    positions: Vec<[f32; 3]>,
    indices: Option<Vec<u32>>,
}

impl MeshData {
    /// # Panics
    /// Panics if an index points past the end of `positions`.
    pub fn new(positions: Vec<[f32; 3]>, indices: Option<Vec<u32>>) -> Self {
        if let Some(indices) = &indices {
            assert!(
                indices.iter().all(|&index| (index as usize) < positions.len()),
                "mesh index out of range for {} positions",
                positions.len()
            );
        }
        Self { positions, indices }
    }

    /// One triangle, drawn straight from the vertex list.
    pub fn triangle() -> Self {
        Self::new(
            vec![
                // Left
                [-0.5, -0.5, 0.0],
                // Up
                [0.0, 0.5, 0.0],
                // Right
                [0.5, -0.5, 0.0],
            ],
            None,
        )
    }

    /// Two indexed triangles covering clip space.
    pub fn quad() -> Self {
        Self::new(
            vec![
                [-1.0, -1.0, 0.0],
                [-1.0, 1.0, 0.0],
                [1.0, -1.0, 0.0],
                [1.0, 1.0, 0.0],
            ],
            Some(vec![1, 0, 2, 1, 2, 3]),
        )
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Entries the draw call walks: indices if present, else vertices.
    pub fn draw_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.positions.len(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.draw_count() / 3
    }

    /// Distinct vertices a draw call touches.
    pub fn referenced_vertices(&self) -> BTreeSet<u32> {
        match &self.indices {
            Some(indices) => indices.iter().copied().collect(),
            None => (0..self.positions.len() as u32).collect(),
        }
    }
}

/// How a [`GpuMesh`] is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Arrays { count: GLsizei },
    Elements { count: GLsizei },
}

/// A [`MeshData`] uploaded into a vertex array and its buffers.
///
/// Dropping it deletes the buffers first, then the vertex array.
pub struct GpuMesh<'gl, G: Gl> {
    gl: &'gl G,
    vao: GLuint,
    vbo: GLuint,
    ebo: Option<GLuint>,
    draw: DrawCall,
}

impl<'gl, G: Gl> GpuMesh<'gl, G> {
    pub fn upload(gl: &'gl G, mesh: &MeshData) -> Self {
        let vao = gl.gen_vertex_array();
        let vbo = gl.gen_buffer();

        // bind the Vertex Array Object first, then bind and set vertex buffers, and then configure attributes
        gl.bind_vertex_array(vao);
        gl.bind_buffer(BufferTarget::Array, vbo);
        gl.buffer_data(BufferTarget::Array, bytemuck::cast_slice(mesh.positions()));

        // the element buffer binding is vertex array state, keep it bound
        let ebo = mesh.indices().map(|indices| {
            let ebo = gl.gen_buffer();
            gl.bind_buffer(BufferTarget::ElementArray, ebo);
            gl.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(indices));
            ebo
        });

        gl.vertex_attrib_pointer_f32(POSITION_ATTRIB, 3);
        gl.enable_vertex_attrib_array(POSITION_ATTRIB);

        // reset bound arrays
        gl.bind_vertex_array(0);
        gl.bind_buffer(BufferTarget::Array, 0);

        let count = GLsizei::try_from(mesh.draw_count()).unwrap_or(GLsizei::MAX);
        let draw = if ebo.is_some() {
            DrawCall::Elements { count }
        } else {
            DrawCall::Arrays { count }
        };
        log::debug!("uploaded mesh: vao {vao}, vbo {vbo}, ebo {ebo:?}, {draw:?}");
        Self {
            gl,
            vao,
            vbo,
            ebo,
            draw,
        }
    }

    pub fn draw_call(&self) -> DrawCall {
        self.draw
    }

    /// Issue the one draw call for this mesh.
    pub fn draw(&self) {
        self.gl.bind_vertex_array(self.vao);
        match self.draw {
            DrawCall::Arrays { count } => self.gl.draw_arrays(count),
            DrawCall::Elements { count } => self.gl.draw_elements(count),
        }
    }
}

impl<G: Gl> Drop for GpuMesh<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.vbo);
        if let Some(ebo) = self.ebo {
            self.gl.delete_buffer(ebo);
        }
        self.gl.delete_vertex_array(self.vao);
    }
}

use crate::{
    color::ClearColor,
    gl_wrappers::{Gl, Program, UniformLocation},
    mesh::GpuMesh,
};

/// Uniform carrying the drawable size in pixels, `vec2`.
pub const RESOLUTION_UNIFORM: &str = "u_resolution";
/// Uniform carrying seconds since startup, `float`.
pub const TIME_UNIFORM: &str = "u_time";

/// Locations of the per-frame uniforms. `None` means the program does not use it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameUniforms {
    pub resolution: Option<UniformLocation>,
    pub time: Option<UniformLocation>,
}

impl FrameUniforms {
    pub fn resolve<G: Gl>(program: &Program<'_, G>) -> Self {
        let uniforms = Self {
            resolution: program.uniform_location(RESOLUTION_UNIFORM),
            time: program.uniform_location(TIME_UNIFORM),
        };
        log::debug!("frame uniforms: {uniforms:?}");
        uniforms
    }
}

/// The program and mesh drawn every frame.
///
/// Drop order matters: the program goes first, then the mesh buffers and
/// vertex array.
pub struct Render<'gl, G: Gl> {
    program: Program<'gl, G>,
    mesh: GpuMesh<'gl, G>,
    gl: &'gl G,
    background: ClearColor,
    uniforms: FrameUniforms,
    resolution: [f32; 2],
    resolution_pushed: bool,
}

impl<'gl, G: Gl> Render<'gl, G> {
    pub fn new(
        gl: &'gl G,
        program: Program<'gl, G>,
        mesh: GpuMesh<'gl, G>,
        background: ClearColor,
        resolution: [f32; 2],
    ) -> Self {
        let uniforms = FrameUniforms::resolve(&program);
        Self {
            program,
            mesh,
            gl,
            background,
            uniforms,
            resolution,
            resolution_pushed: false,
        }
    }

    pub fn uniforms(&self) -> FrameUniforms {
        self.uniforms
    }

    /// Change the resolution pushed on the next frame.
    pub fn set_resolution(&mut self, resolution: [f32; 2]) {
        if resolution != self.resolution {
            self.resolution = resolution;
            self.resolution_pushed = false;
        }
    }

    pub fn clear(&self) {
        let ClearColor { r, g, b, a } = self.background;
        self.gl.clear_color(r, g, b, a);
        self.gl.clear();
    }

    /// Bind the program, feed it the frame uniforms and draw the mesh.
    ///
    /// Uniforms the program does not have are skipped. The resolution is
    /// only pushed when it changed; uniform values stay with the program.
    pub fn render_frame(&mut self, elapsed: f32) {
        self.program.bind();
        if let Some(location) = self.uniforms.resolution {
            if !self.resolution_pushed {
                let [width, height] = self.resolution;
                self.gl.uniform_2f(location.get(), width, height);
                self.resolution_pushed = true;
            }
        }
        if let Some(location) = self.uniforms.time {
            self.gl.uniform_1f(location.get(), elapsed);
        }
        self.mesh.draw();
    }
}

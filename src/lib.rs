//! Minimal OpenGL bootstrap: compile and link a shader pair, upload a
//! fixed mesh and draw it every frame until the window closes.
pub mod app;
pub mod clock;
pub mod color;
pub mod config;
pub mod frame;
pub mod gl_wrappers;
pub mod logging;
pub mod mesh;
pub mod render;
pub mod shader_source;
pub mod window;

pub use gl;
pub use sdl2;

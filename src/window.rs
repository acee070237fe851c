//! The window collaborator: a [`Surface`] the frame loop presents to,
//! and its SDL implementation.
use sdl2::{event::WindowEvent, keyboard::Scancode, video};

use crate::{config::WindowConfig, gl_wrappers::NativeGl};

/// Something the window system told us between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The drawable area changed size, in pixels.
    Resized { width: u32, height: u32 },
}

/// A window with a current GL context.
pub trait Surface {
    /// The user asked the window to close.
    fn should_close(&self) -> bool;
    /// Escape is currently held down.
    fn escape_pressed(&self) -> bool;
    /// Present the back buffer.
    fn swap_buffers(&mut self);
    /// Drain pending window events without blocking.
    fn poll_events(&mut self) -> Vec<SurfaceEvent>;
}

/// An SDL window with an OpenGL core-profile context.
pub struct SdlSurface {
    // dropped before the window it was created for
    _gl_ctx: video::GLContext,
    window: video::Window,
    video_ctx: sdl2::VideoSubsystem,
    event_pump: sdl2::EventPump,
    _sdl_ctx: sdl2::Sdl,
    main_id: u32,
    close_requested: bool,
}

impl SdlSurface {
    /// Create the window and make its GL context current.
    ///
    /// # Errors
    /// Errors if SDL, the window, or the GL context could not be created.
    pub fn open(config: &WindowConfig) -> Result<Self, String> {
        let sdl_ctx = sdl2::init()?;

        let video_ctx = sdl_ctx.video()?;
        video_ctx.gl_load_library_default()?;

        let gl_attr = video_ctx.gl_attr();
        gl_attr.set_context_flags().forward_compatible().set();
        gl_attr.set_context_major_version(config.gl_major);
        gl_attr.set_context_minor_version(config.gl_minor);
        gl_attr.set_context_profile(video::GLProfile::Core);

        let window = video_ctx
            .window(&config.title, config.width, config.height)
            .position_centered()
            .resizable()
            .opengl()
            .build()
            .map_err(|err| format!("Error creating window: {err}"))?;

        let gl_ctx = window.gl_create_context()?;
        window.gl_make_current(&gl_ctx)?;

        let event_pump = sdl_ctx.event_pump()?;
        let main_id = window.id();
        log::info!(
            "opened {}x{} window \"{}\" with OpenGL {}.{} core",
            config.width,
            config.height,
            config.title,
            config.gl_major,
            config.gl_minor
        );

        Ok(Self {
            _gl_ctx: gl_ctx,
            window,
            video_ctx,
            event_pump,
            _sdl_ctx: sdl_ctx,
            main_id,
            close_requested: false,
        })
    }

    /// Load GL function pointers for this window's context.
    ///
    /// # Errors
    /// Errors if the loader could not resolve the core entry points.
    pub fn load_gl(&self) -> Result<NativeGl, String> {
        NativeGl::load_with(|s| self.video_ctx.gl_get_proc_address(s).cast())
    }

    /// Size of the drawable area in pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }
}

impl Surface for SdlSurface {
    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn escape_pressed(&self) -> bool {
        self.event_pump
            .keyboard_state()
            .is_scancode_pressed(Scancode::Escape)
    }

    fn swap_buffers(&mut self) {
        self.window.gl_swap_window();
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        use sdl2::event::Event as Ev;

        let mut events = vec![];
        for event in self.event_pump.poll_iter() {
            match event {
                Ev::Quit { .. } => self.close_requested = true,
                Ev::Window {
                    window_id,
                    win_event: WindowEvent::Close,
                    ..
                } if window_id == self.main_id => self.close_requested = true,
                Ev::Window {
                    window_id,
                    win_event: WindowEvent::SizeChanged(width, height),
                    ..
                } if window_id == self.main_id => {
                    events.push(SurfaceEvent::Resized {
                        width: width.try_into().unwrap_or(0),
                        height: height.try_into().unwrap_or(0),
                    });
                }
                _ => {}
            }
        }
        events
    }
}

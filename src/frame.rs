//! The per-frame loop, as an explicit Running/Closing state machine.
use std::fmt;

use crate::{
    clock::FrameClock,
    config::ResolutionPolicy,
    gl_wrappers::{gl_upd_viewport, Gl},
    render::Render,
    window::{Surface, SurfaceEvent},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Running,
    /// Terminal. No more frames are drawn.
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    /// The window system asked to close.
    CloseRequested,
    /// Escape was pressed.
    Escape,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CloseReason::CloseRequested => "window closed",
            CloseReason::Escape => "escape pressed",
        })
    }
}

/// What a finished run looked like.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    /// Frames presented.
    pub frames: u64,
    /// Seconds between the clock origin and closing.
    pub elapsed: f32,
    pub reason: CloseReason,
}

/// Owns the render state for the duration of the loop.
pub struct FrameDriver<'gl, G: Gl> {
    render: Render<'gl, G>,
    gl: &'gl G,
    clock: FrameClock,
    resolution: ResolutionPolicy,
    state: DriverState,
    close_reason: Option<CloseReason>,
    frames: u64,
    last_elapsed: f32,
}

impl<'gl, G: Gl> FrameDriver<'gl, G> {
    /// Start the clock and enter the running state.
    pub fn new(gl: &'gl G, render: Render<'gl, G>, resolution: ResolutionPolicy) -> Self {
        Self::with_clock(gl, render, resolution, FrameClock::start())
    }

    pub fn with_clock(
        gl: &'gl G,
        render: Render<'gl, G>,
        resolution: ResolutionPolicy,
        clock: FrameClock,
    ) -> Self {
        Self {
            render,
            gl,
            clock,
            resolution,
            state: DriverState::Running,
            close_reason: None,
            frames: 0,
            last_elapsed: 0.0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_reason
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn close(&mut self, reason: CloseReason) {
        if self.state == DriverState::Running {
            log::info!("closing: {reason}");
            self.state = DriverState::Closing;
            self.close_reason = Some(reason);
        }
    }

    /// Run one iteration of the loop. Does nothing once closing.
    pub fn step<S: Surface>(&mut self, surface: &mut S) -> DriverState {
        if self.state == DriverState::Closing {
            return self.state;
        }
        if surface.should_close() {
            self.close(CloseReason::CloseRequested);
            return self.state;
        }

        let elapsed = self.clock.elapsed();
        self.last_elapsed = elapsed;

        if surface.escape_pressed() {
            self.close(CloseReason::Escape);
            return self.state;
        }

        self.render.clear();
        self.render.render_frame(elapsed);

        surface.swap_buffers();
        self.frames += 1;

        for event in surface.poll_events() {
            match event {
                SurfaceEvent::Resized { width, height } => {
                    log::debug!("resized to {width}x{height}");
                    gl_upd_viewport(self.gl, width, height);
                    if self.resolution == ResolutionPolicy::FollowWindow {
                        self.render.set_resolution([width as f32, height as f32]);
                    }
                }
            }
        }
        self.state
    }

    /// Step until closing, then release the program and mesh.
    pub fn run<S: Surface>(mut self, surface: &mut S) -> RunSummary {
        while self.step(surface) == DriverState::Running {}

        let summary = RunSummary {
            frames: self.frames,
            elapsed: self.last_elapsed,
            // the loop above only exits through close()
            reason: self.close_reason.unwrap_or(CloseReason::CloseRequested),
        };
        log::info!(
            "rendered {} frames in {:.2}s ({})",
            summary.frames,
            summary.elapsed,
            summary.reason
        );
        summary
    }
}

//! Window creation and the main loop.
//!
//! Startup happens inside winit's `resumed` callback because that is where a
//! window can first be created; a failure there is recorded and the event
//! loop exited so `main` can map it to the right exit code. After startup
//! the loop is purely: sample the clock, render, present, repeat, until the
//! window is closed. Everything runs on the main thread.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::clock::AnimationClock;
use crate::config::Config;
use crate::error::Error;
use crate::gpu::GpuContext;
use crate::renderer::{Renderer, VertexShaderOverrides};

const WINDOW_TITLE: &str = "Brick House With Roof";

/// How to respond to a failed surface acquire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SurfaceAction {
    /// The surface no longer matches the window; reconfigure it and try
    /// again on the next redraw.
    Reconfigure,
    /// Transient failure; drop this frame and try again on the next redraw.
    SkipFrame,
}

fn surface_error_action(err: &wgpu::SurfaceError) -> SurfaceAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceAction::Reconfigure,
        _ => SurfaceAction::SkipFrame,
    }
}

pub struct App {
    config: Config,
    overrides: VertexShaderOverrides,
    clock: AnimationClock,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<Renderer>,
    error: Option<Error>,
}

impl App {
    /// Runs the scene until the window is closed.
    ///
    /// Returns the startup error, if any; the caller maps it to an exit
    /// code. A clean close returns `Ok`.
    pub fn run(config: Config, overrides: VertexShaderOverrides) -> Result<(), Error> {
        let event_loop = EventLoop::new().map_err(|e| Error::WindowInit(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            clock: AnimationClock::new(config.base_dir),
            config,
            overrides,
            window: None,
            gpu: None,
            renderer: None,
            error: None,
        };
        event_loop
            .run_app(&mut app)
            .map_err(|e| Error::WindowInit(e.to_string()))?;

        match app.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Error> {
        if self.config.width <= 0 || self.config.height <= 0 {
            return Err(Error::WindowInit(format!(
                "invalid window size {}x{}",
                self.config.width, self.config.height
            )));
        }

        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(
                self.config.width as u32,
                self.config.height as u32,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| Error::WindowInit(e.to_string()))?,
        );

        let gpu = GpuContext::new(window.clone())?;
        let renderer = Renderer::new(&gpu, &self.overrides)?;
        log::info!(
            "scene ready at {}x{}",
            self.config.width,
            self.config.height
        );

        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.window = Some(window);
        Ok(())
    }

    fn draw(&mut self) {
        let (Some(gpu), Some(renderer)) = (&mut self.gpu, &mut self.renderer) else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(err) => {
                match surface_error_action(&err) {
                    SurfaceAction::Reconfigure => gpu.surface.configure(&gpu.device, &gpu.config),
                    SurfaceAction::SkipFrame => log::warn!("skipping frame: {err}"),
                }
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        renderer.render(gpu, &mut encoder, &view, self.clock.sample());

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.setup(event_loop) {
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.draw();
                // Requested even when the frame was skipped, so a lost or
                // outdated surface never stalls the animation.
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_surfaces_reconfigure() {
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Lost),
            SurfaceAction::Reconfigure
        );
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Outdated),
            SurfaceAction::Reconfigure
        );
    }

    #[test]
    fn transient_surface_errors_drop_one_frame() {
        // Either way the next redraw is already scheduled; skipping a frame
        // must never be terminal.
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Timeout),
            SurfaceAction::SkipFrame
        );
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::OutOfMemory),
            SurfaceAction::SkipFrame
        );
    }
}

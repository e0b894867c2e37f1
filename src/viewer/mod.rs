//! Windowed viewer for a [`NeuralNetwork`].
//!
//! The window title doubles as the text overlay: it cycles through the
//! headline phrases until a node is first hovered, then settles on the
//! hover prompt.

mod renderer;

use std::sync::Arc;

use glam::Vec2;
use tracing::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::NetworkConfig;
use crate::error::ViewerError;
use crate::network::NeuralNetwork;
use crate::overlay::{HoverLatch, PhraseCarousel, DEFAULT_PHRASES, HOVER_PROMPT};
use crate::time::FrameClock;

pub use renderer::Renderer;

/// Frames between FPS log lines.
const STATS_INTERVAL: u64 = 600;

/// Open a window and animate a network built from `config` until the
/// window is closed.
pub fn run(config: NetworkConfig) -> Result<(), ViewerError> {
    let network = NeuralNetwork::new(config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(network);
    event_loop.run_app(&mut app)?;
    app.teardown();

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Winit application driving one network.
pub struct App {
    network: NeuralNetwork,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    pointer: Option<Vec2>,
    clock: FrameClock,
    carousel: PhraseCarousel,
    latch: HoverLatch,
    title: &'static str,
    error: Option<ViewerError>,
}

impl App {
    pub fn new(mut network: NeuralNetwork) -> Self {
        let latch = HoverLatch::new();
        network.set_hover_callback(latch.observer());

        let mut app = Self {
            network,
            window: None,
            renderer: None,
            pointer: None,
            clock: FrameClock::new(),
            carousel: PhraseCarousel::new(DEFAULT_PHRASES.len()),
            latch,
            title: "",
            error: None,
        };
        app.title = app.overlay_text();
        app
    }

    /// Text currently shown by the overlay.
    fn overlay_text(&self) -> &'static str {
        if self.latch.is_latched() {
            HOVER_PROMPT
        } else {
            DEFAULT_PHRASES
                .get(self.carousel.index())
                .copied()
                .unwrap_or(HOVER_PROMPT)
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        error!("viewer error: {err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn teardown(&mut self) {
        self.carousel.halt();
        self.renderer = None;
        self.window = None;
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        self.network.step(self.pointer);

        if self.latch.is_latched() {
            self.carousel.halt();
        } else {
            self.carousel.advance(dt);
        }

        let text = self.overlay_text();
        if text != self.title {
            self.title = text;
            if let Some(window) = &self.window {
                window.set_title(text);
            }
        }

        if self.clock.frame() % STATS_INTERVAL == 0 {
            debug!(
                fps = self.clock.fps(),
                frame = self.network.frame(),
                connections = self.network.graph().segment_count(),
                respawns = self.network.router().respawns(),
                "frame stats"
            );
        }

        let Some(renderer) = &mut self.renderer else {
            return;
        };
        match renderer.render(&self.network) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, closing viewer");
                event_loop.exit();
            }
            Err(e) => warn!("render error: {e:?}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        match pollster::block_on(Renderer::new(window.clone(), &self.network)) {
            Ok(renderer) => {
                self.network.set_aspect(renderer.aspect());
                self.renderer = Some(renderer);
                self.window = Some(window);
                info!("viewer started");
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                    self.network.set_aspect(renderer.aspect());
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(window) = &self.window {
                    self.pointer = pointer_ndc(position, window.inner_size());
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer = None;
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Convert a cursor position in physical pixels to normalized device
/// coordinates: `-1..1` on both axes with +Y up.
fn pointer_ndc(position: PhysicalPosition<f64>, size: PhysicalSize<u32>) -> Option<Vec2> {
    if size.width == 0 || size.height == 0 {
        return None;
    }
    let x = (position.x / size.width as f64) * 2.0 - 1.0;
    let y = -(position.y / size.height as f64) * 2.0 + 1.0;
    Some(Vec2::new(x as f32, y as f32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_ndc_corners() {
        let size = PhysicalSize::new(800, 600);
        assert_eq!(
            pointer_ndc(PhysicalPosition::new(0.0, 0.0), size),
            Some(Vec2::new(-1.0, 1.0))
        );
        assert_eq!(
            pointer_ndc(PhysicalPosition::new(400.0, 300.0), size),
            Some(Vec2::ZERO)
        );
        assert_eq!(
            pointer_ndc(PhysicalPosition::new(800.0, 600.0), size),
            Some(Vec2::new(1.0, -1.0))
        );
    }

    #[test]
    fn test_pointer_ndc_empty_window() {
        assert_eq!(
            pointer_ndc(PhysicalPosition::new(10.0, 10.0), PhysicalSize::new(0, 600)),
            None
        );
    }

    #[test]
    fn test_overlay_switches_to_prompt_on_hover() {
        let network = NeuralNetwork::new(NetworkConfig::default().with_seed(9)).unwrap();
        let app = App::new(network);
        assert_eq!(app.overlay_text(), DEFAULT_PHRASES[0]);

        app.latch.observe(true);
        assert_eq!(app.overlay_text(), HOVER_PROMPT);
    }
}

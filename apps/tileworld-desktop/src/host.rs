use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use glam::IVec2;
use tileworld_input::{HostEvent, Key, Modifiers, WindowEvent as HostWindowEvent};
use tileworld_render_wgpu::{CanvasError, GpuCanvas};
use tileworld_runtime::HostWindow;
use tracing::{debug, info};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::keymap;

const STARTUP_POLL: Duration = Duration::from_millis(16);

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] OsError),
    #[error("failed to set up GPU canvas: {0}")]
    Canvas(#[from] CanvasError),
    #[error("window closed before it was ready")]
    ClosedDuringStartup,
}

/// Collects winit callbacks into a queue of host events.
struct WinitApp {
    attributes: WindowAttributes,
    window: Option<Arc<Window>>,
    error: Option<OsError>,
    events: VecDeque<HostEvent>,
    cursor: IVec2,
    modifiers: Modifiers,
}

impl WinitApp {
    fn new(attributes: WindowAttributes) -> Self {
        Self {
            attributes,
            window: None,
            error: None,
            events: VecDeque::new(),
            cursor: IVec2::ZERO,
            modifiers: Modifiers::NONE,
        }
    }

    fn toggle_fullscreen(&self) {
        if let Some(window) = &self.window {
            let next = match window.fullscreen() {
                Some(_) => None,
                None => Some(Fullscreen::Borderless(None)),
            };
            info!(fullscreen = next.is_some(), "toggling fullscreen");
            window.set_fullscreen(next);
        }
    }

    fn on_key(&mut self, event: KeyEvent) {
        let key = keymap::key(event.physical_key);
        let pressed = event.state == ElementState::Pressed;
        if key == Key::F11 && pressed && !event.repeat {
            self.toggle_fullscreen();
        }
        self.events.push_back(HostEvent::Key {
            key,
            pressed,
            repeat: event.repeat,
            modifiers: self.modifiers,
        });
    }
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(err) => {
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let translated = match event {
            WindowEvent::CloseRequested => HostEvent::Quit,
            WindowEvent::Resized(size) => HostEvent::resized(size.width, size.height),
            WindowEvent::RedrawRequested => HostEvent::Window(HostWindowEvent::Exposed),
            WindowEvent::Focused(true) => HostEvent::Window(HostWindowEvent::FocusGained),
            WindowEvent::Focused(false) => HostEvent::Window(HostWindowEvent::FocusLost),
            WindowEvent::Occluded(true) => HostEvent::Window(HostWindowEvent::Minimized),
            WindowEvent::Occluded(false) => HostEvent::Window(HostWindowEvent::Restored),
            WindowEvent::CursorEntered { .. } => HostEvent::Window(HostWindowEvent::MouseEntered),
            WindowEvent::CursorLeft { .. } => HostEvent::Window(HostWindowEvent::MouseLeft),
            WindowEvent::ModifiersChanged(state) => {
                self.modifiers = keymap::modifiers(state.state());
                return;
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.on_key(event);
                return;
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = IVec2::new(position.x as i32, position.y as i32);
                HostEvent::MouseMove {
                    position: self.cursor,
                }
            }
            WindowEvent::MouseWheel { delta, .. } => HostEvent::MouseWheel {
                delta: keymap::wheel(delta),
            },
            WindowEvent::MouseInput { state, button, .. } => HostEvent::MouseButton {
                button: keymap::button(button),
                pressed: state == ElementState::Pressed,
                position: self.cursor,
            },
            _ => return,
        };
        self.events.push_back(translated);
    }
}

/// A winit window driven by polling, so the scheduler keeps control of the
/// loop.
pub struct WinitHost {
    event_loop: EventLoop<()>,
    app: WinitApp,
    window: Arc<Window>,
    canvas: GpuCanvas,
    closed: bool,
}

impl WinitHost {
    /// Open a window and attach a GPU canvas to it.
    pub fn open(title: &str, width: u32, height: u32) -> Result<Self, HostError> {
        let mut event_loop = EventLoop::new()?;
        let attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(width, height));
        let mut app = WinitApp::new(attributes);

        let window = loop {
            let status = event_loop.pump_app_events(Some(STARTUP_POLL), &mut app);
            if let Some(err) = app.error.take() {
                return Err(err.into());
            }
            if let Some(window) = &app.window {
                break Arc::clone(window);
            }
            if let PumpStatus::Exit(_) = status {
                return Err(HostError::ClosedDuringStartup);
            }
        };

        let size = window.inner_size();
        let canvas = GpuCanvas::new(Arc::clone(&window), size.width, size.height)?;
        info!(width = size.width, height = size.height, "window opened");

        Ok(Self {
            event_loop,
            app,
            window,
            canvas,
            closed: false,
        })
    }

    fn pump(&mut self) {
        if self.closed {
            return;
        }
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app)
        {
            debug!(code, "event loop exited");
            self.closed = true;
            self.app.events.push_back(HostEvent::Quit);
        }
    }
}

impl HostWindow for WinitHost {
    type Canvas = GpuCanvas;

    fn poll_event(&mut self) -> Option<HostEvent> {
        if self.app.events.is_empty() {
            self.pump();
        }
        let event = self.app.events.pop_front()?;
        if let HostEvent::Window(HostWindowEvent::Resized { width, height }) = event {
            self.canvas.resize(width, height);
        }
        Some(event)
    }

    fn display_size(&self) -> (u32, u32) {
        self.canvas.size()
    }

    fn canvas(&mut self) -> &mut GpuCanvas {
        &mut self.canvas
    }

    fn present(&mut self) {
        self.window.pre_present_notify();
        self.canvas.present();
    }
}

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};
use softbuffer::Surface;

use crate::ui::state::{ViewerState, button_at, display_area_for};

pub mod render;
pub mod state;

// ---------------------------------------------------------------------------
// Application handler (winit 0.30 style)
// ---------------------------------------------------------------------------

pub struct App {
    pub state: ViewerState,
    pub window_size: LogicalSize<u32>,
    pub window: Option<Arc<Window>>,
    pub context: Option<softbuffer::Context<Arc<Window>>>,
    pub surface: Option<Surface<Arc<Window>, Arc<Window>>>,
    /// When the slideshow timer fires next. Only re-armed after a tick's
    /// decode and fit are done, so ticks never pile up.
    pub next_tick: Instant,
    pub mouse_pos: (f64, f64),
}

impl App {
    pub fn new(state: ViewerState, window_size: LogicalSize<u32>) -> Self {
        let next_tick = Instant::now() + state.interval;
        Self {
            state,
            window_size,
            window: None,
            context: None,
            surface: None,
            next_tick,
            mouse_pos: (0.0, 0.0),
        }
    }

    fn request_redraw(&self) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("Slideshow viewer")
            .with_inner_size(self.window_size);
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));
        let context = softbuffer::Context::new(Arc::clone(&window)).expect("create context");
        let mut surface = Surface::new(&context, Arc::clone(&window)).expect("create surface");

        let size = window.inner_size();
        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            let _ = surface.resize(w, h);
        }
        self.state
            .set_display_area(display_area_for(size.width, size.height));

        window.request_redraw();
        self.window = Some(window);
        self.context = Some(context);
        self.surface = Some(surface);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let w = NonZeroU32::new(width.max(1));
                let h = NonZeroU32::new(height.max(1));
                if let (Some(surface), Some(w), Some(h)) = (self.surface.as_mut(), w, h) {
                    let _ = surface.resize(w, h);
                }
                self.state.set_display_area(display_area_for(width, height));
                self.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    match &event.logical_key {
                        Key::Named(named) => {
                            self.state.keys_pressed.insert(*named);
                        }
                        Key::Character(s) => {
                            if let Some(c) = s.chars().next() {
                                self.state.chars_pressed.insert(c.to_ascii_lowercase());
                            }
                        }
                        _ => {}
                    }
                    self.request_redraw();
                }
            }

            WindowEvent::CursorMoved {
                position: PhysicalPosition { x, y },
                ..
            } => {
                self.mouse_pos = (x, y);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left && state == ElementState::Released {
                    if let Some(ref window) = self.window {
                        let size = window.inner_size();
                        let (x, y) = self.mouse_pos;
                        if let Some(b) = button_at(x, y, size.width, size.height) {
                            self.state.clicks.push(b);
                            window.request_redraw();
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(window) = self.window.as_ref() else {
                    return;
                };
                if self.state.update() {
                    event_loop.exit();
                    return;
                }

                if let Some(ref mut surface) = self.surface {
                    let size = window.inner_size();
                    let fb_w = size.width.max(1);
                    let fb_h = size.height.max(1);
                    if let Ok(mut buffer) = surface.buffer_mut() {
                        self.state.render(&mut buffer, fb_w, fb_h);
                        let _ = buffer.present();
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if Instant::now() >= self.next_tick {
            if self.state.on_tick() {
                self.request_redraw();
            }
            self.next_tick = Instant::now() + self.state.interval;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}

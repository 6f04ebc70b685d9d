use std::error::Error;
use std::time::{Duration, Instant};

use log::{debug, error};
use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;

pub const DEFAULT_TICK_RATE: u32 = 15;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub clamp_to_monitor: bool,
    pub vsync: bool,
    /// Game updates per second.
    pub tick_rate: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            desired_size: PhysicalSize::new(500, 500),
            clamp_to_monitor: true,
            vsync: true,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl AppConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
    pub surface_size: SurfaceSize,
}

/// Input gathered between two ticks.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    /// Key presses in arrival order. OS key-repeat presses are included.
    pub keys_pressed: Vec<VirtualKeyCode>,
    pub resized: bool,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.resized = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    Continue,
    Exit,
}

pub trait GameApp {
    type State;

    fn init_state(&mut self) -> Self::State;

    /// Called once per tick with everything that arrived since the previous tick.
    fn update_state(&mut self, state: &mut Self::State, input: &InputFrame) -> AppFlow;

    fn render(&mut self, state: &Self::State, renderer: &mut dyn Renderer2d);
}

pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let monitor_size = if config.clamp_to_monitor {
        event_loop.primary_monitor().map(|m| m.size())
    } else {
        None
    };
    let initial_size = if let Some(monitor) = monitor_size {
        PhysicalSize::new(
            config.desired_size.width.min(monitor.width),
            config.desired_size.height.min(monitor.height),
        )
    } else {
        config.desired_size
    };
    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(initial_size)
        .with_resizable(true)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width.max(1), window_size.height.max(1));

    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let pixels = PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture)
        .enable_vsync(config.vsync)
        .build()?;
    let renderer = PixelsRenderer2d::new(pixels, surface_size)?;

    let mut ctx = AppContext {
        window,
        renderer,
        surface_size,
    };
    let mut state = game.init_state();
    let mut input = InputFrame::default();
    let tick = config.tick_interval();
    let mut next_tick = Instant::now();
    let mut exiting = false;

    debug!(
        "window {}x{}, tick every {:?}",
        surface_size.width, surface_size.height, tick
    );

    event_loop.run(move |event, _, control_flow| {
        if exiting {
            *control_flow = ControlFlow::Exit;
            return;
        }

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    exiting = true;
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    resize_surface(&mut ctx, *size);
                    input.resized = true;
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    resize_surface(&mut ctx, **new_inner_size);
                    input.resized = true;
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => {
                    input.keys_pressed.push(*key);
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                let now = Instant::now();
                if now >= next_tick {
                    if game.update_state(&mut state, &input) == AppFlow::Exit {
                        exiting = true;
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    input.clear();
                    ctx.window.request_redraw();
                    next_tick = now + tick;
                }
                *control_flow = ControlFlow::WaitUntil(next_tick);
            }
            Event::RedrawRequested(_) => {
                ctx.renderer.draw_frame(|gfx| game.render(&state, gfx));
                if let Err(err) = ctx.renderer.present() {
                    error!("present failed: {err}");
                }
            }
            _ => {}
        }
    });
}

fn resize_surface(ctx: &mut AppContext, size: PhysicalSize<u32>) {
    ctx.surface_size = SurfaceSize::new(size.width, size.height);
    if let Err(err) = ctx.renderer.resize(ctx.surface_size) {
        error!("resize failed: {err}");
    }
    ctx.window.request_redraw();
}

use std::collections::HashSet;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::input::Controls;
use crate::scaler::{ScaleLut, blit_nearest_stretch, build_scale_lut};
use crate::world::PointGrid;

mod camera;
mod config;
mod error;
mod input;
mod projector;
mod renderer;
mod scaler;
mod world;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    grid: PointGrid,
    camera: Camera,
    controls: Controls,
    window_size: (u32, u32),

    // Telemetry
    frame_counter: u32,
    plotted: usize,
    last_report: Instant,

    // Internal raster, the camera's surface size
    fb_small: Vec<u32>,
    fb_w: usize,
    fb_h: usize,

    scale_lut: ScaleLut,

    // Fixed-cadence ticking
    keys_down: HashSet<KeyCode>,
    frame_period: Duration,
    next_tick: Instant,
}

impl App {
    fn new(config: ViewerConfig) -> Result<Self, error::CameraError> {
        let camera = Camera::new(config.camera.clone())?;
        let grid = PointGrid::new(&config.grid);
        let (fb_w, fb_h) = camera.surface_size();
        let (fb_w, fb_h) = (fb_w as usize, fb_h as usize);
        if grid.is_empty() {
            log::warn!("point grid is empty; nothing will be drawn");
        }
        log::info!(
            "{} grid points, raster {}x{}, draw limit {}",
            grid.len(),
            fb_w,
            fb_h,
            camera.draw_limit()
        );

        Ok(Self {
            window: None,
            surface: None,
            grid,
            camera,
            controls: config.controls.clone(),
            window_size: config.window_size(),

            frame_counter: 0,
            plotted: 0,
            last_report: Instant::now(),

            fb_small: vec![0; fb_w * fb_h],
            fb_w,
            fb_h,

            scale_lut: ScaleLut::empty(),

            keys_down: HashSet::new(),
            frame_period: Duration::from_secs_f64(1.0 / config.frames_per_second.max(1) as f64),
            next_tick: Instant::now(),
        })
    }
}

impl ApplicationHandler for App {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_tick += self.frame_period;
            // Don't try to catch up after a stall
            let now = Instant::now();
            if self.next_tick < now {
                self.next_tick = now + self.frame_period;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let (w, h) = self.window_size;
        let attributes = Window::default_attributes()
            .with_title("Point Grid")
            .with_inner_size(LogicalSize::new(w as f64, h as f64));

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Rc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        let surface = match surface {
            Ok(s) => s,
            Err(e) => {
                log::error!("failed to create softbuffer surface: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.rebuild_lut(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        window.request_redraw();
        self.window = Some(window);

        self.next_tick = Instant::now() + self.frame_period;
        log::info!("window ready at {}x{}", size.width, size.height);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => {
                if let PhysicalKey::Code(code) = physical_key {
                    use winit::event::ElementState;
                    match state {
                        ElementState::Pressed => {
                            self.keys_down.insert(code);
                        }
                        ElementState::Released => {
                            self.keys_down.remove(&code);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                // All camera mutation for this frame happens before projection
                self.controls.apply(&self.keys_down, &mut self.camera);

                let (window, surface) = match (&self.window, &mut self.surface) {
                    (Some(w), Some(s)) if w.id() == id => (w, s),
                    _ => return,
                };

                let size = window.inner_size();
                let (Some(dw), Some(dh)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                else {
                    return; // Minimized window, skip drawing
                };

                if let Err(e) = surface.resize(dw, dh) {
                    log::error!("surface resize failed: {e}");
                    return;
                }

                self.plotted = renderer::render_frame(
                    &mut self.fb_small,
                    self.fb_w,
                    self.fb_h,
                    &self.grid,
                    &self.camera,
                );

                let mut buf = match surface.buffer_mut() {
                    Ok(b) => b,
                    Err(e) => {
                        log::error!("failed to map surface buffer: {e}");
                        return;
                    }
                };
                blit_nearest_stretch(
                    &mut buf,
                    dw.get() as usize,
                    &self.fb_small,
                    self.fb_w,
                    &self.scale_lut,
                );
                if let Err(e) = buf.present() {
                    log::error!("present failed: {e}");
                }

                self.frame_counter += 1;
                self.report();
            }

            WindowEvent::Resized(new_size) => {
                self.rebuild_lut(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }
}

impl App {
    /// Once a second: frame rate and camera diagnostics to the log and title bar.
    fn report(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_report).as_secs_f32();
        if elapsed < 1.0 {
            return;
        }

        let fps = self.frame_counter as f32 / elapsed;
        let [x, y, z] = self.camera.position();
        let status = format!(
            "pos ({x:.1}, {y:.1}, {z:.1})  yaw {:.1}  pitch {:.1}  roll {:.1}  depth {:.2}",
            self.camera.yaw().to_degrees(),
            self.camera.pitch().to_degrees(),
            self.camera.roll().to_degrees(),
            self.camera.depth_scale(),
        );
        log::debug!("FPS: {fps:.1}  points: {}  {status}", self.plotted);
        if let Some(window) = &self.window {
            window.set_title(&format!("Point Grid  {fps:.0} fps  {status}"));
        }

        self.frame_counter = 0;
        self.last_report = now;
    }

    fn rebuild_lut(&mut self, dst_w: usize, dst_h: usize) {
        self.scale_lut = build_scale_lut(dst_w, dst_h, self.fb_w, self.fb_h);
        log::debug!("scale lut rebuilt for {:?}", self.scale_lut.dst_size());
    }
}

fn main() {
    env_logger::init();

    let mut app = match App::new(ViewerConfig::default()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(l) => l,
        Err(e) => {
            log::error!("failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now()));

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("event loop error: {e}");
    }
}

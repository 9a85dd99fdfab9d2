//! Sideshow - a carnival shooting-gallery demo
//!
//! A duck drifts across an animated water tank inside a booth, drops off
//! the far end, and comes back around for another run while the camera
//! orbits the set.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use glam::Mat4;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use sideshow::cli::Args;
use sideshow::params::{MotionVariant, RecordingConfig, RenderConfig};
use sideshow::props;
use sideshow::rendering::{RenderSystem, Uniforms};
use sideshow::scene::SimulationState;
use sideshow::water::WaterGrid;

/// Pointer-drag bookkeeping for the orbit controls.
#[derive(Default)]
struct MouseState {
    left_down: bool,
    right_down: bool,
    last_position: Option<(f64, f64)>,
}

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    sim: SimulationState,
    water_grid: WaterGrid,

    // Configuration
    render_config: RenderConfig,
    recording_config: Option<RecordingConfig>,

    // Input and time tracking
    mouse: MouseState,
    last_frame: Option<Instant>,
    frame_count: usize,
}

impl App {
    fn new(variant: MotionVariant, args: &Args) -> Self {
        let sim = SimulationState::new(variant, args.initial_scene());
        let water_grid = WaterGrid::new(&sim.water);

        Self {
            window: None,
            render_system: None,
            sim,
            water_grid,
            render_config: RenderConfig::default(),
            recording_config: args.create_recording_config(),
            mouse: MouseState::default(),
            last_frame: None,
            frame_count: 0,
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Sideshow - Shooting Gallery")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                std::process::exit(1);
            }
        };

        let static_mesh = props::static_set(&self.sim.layout);
        let duck_mesh = props::duck();
        let target_mesh = props::standalone_target();
        self.water_grid.update(&self.sim.water, self.sim.scene.water);

        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.render_config,
            &static_mesh,
            &self.water_grid.mesh,
            &duck_mesh,
            &target_mesh,
            self.recording_config.clone(),
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("Failed to initialize rendering: {e:#}");
                std::process::exit(1);
            }
        };

        println!("\nSideshow is running!");
        println!("  1/w  toggle wavy or flat water");
        println!("  2/d  toggle duck or bare target");
        println!("  3/c  cycle camera viewpoint");
        println!("  r    restart the run");
        println!("  drag orbit (left) / zoom (right), ESC quits\n");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.last_frame = None;
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.render_config.window_width = size.width;
                self.render_config.window_height = size.height;
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::Digit1 | KeyCode::KeyW => self.sim.toggle_water(),
                KeyCode::Digit2 | KeyCode::KeyD => self.sim.toggle_object(),
                KeyCode::Digit3 | KeyCode::KeyC => self.sim.cycle_camera(),
                KeyCode::KeyR => self.sim.reset_object(),
                _ => {}
            },
            WindowEvent::MouseInput { state, button, .. } => {
                let down = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.mouse.left_down = down,
                    MouseButton::Right => self.mouse.right_down = down,
                    _ => {}
                }
                if !self.mouse.left_down && !self.mouse.right_down {
                    self.mouse.last_position = None;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current = (position.x, position.y);
                if let Some((last_x, last_y)) = self.mouse.last_position {
                    let dx = (current.0 - last_x) as f32;
                    let dy = (current.1 - last_y) as f32;
                    if self.mouse.left_down {
                        self.sim.camera.drag_orbit(dx, dy);
                    }
                    if self.mouse.right_down {
                        self.sim.camera.drag_zoom(dy);
                    }
                }
                if self.mouse.left_down || self.mouse.right_down {
                    self.mouse.last_position = Some(current);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

impl App {
    /// Advance the simulation by the elapsed frame time and draw.
    fn render_frame(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        let Some(ref mut render_system) = self.render_system else {
            return;
        };

        // Elapsed real time since the previous frame, clamped so clock
        // anomalies and the first frame never run the simulation backward
        let now = Instant::now();
        let dt = match self.last_frame {
            Some(last) => (now - last).as_secs_f32().max(0.0),
            None => 0.0,
        };
        self.last_frame = Some(now);

        self.sim.tick(dt);
        self.water_grid.update(&self.sim.water, self.sim.scene.water);

        let (view_proj, _eye) = self
            .sim
            .camera
            .create_view_proj_matrix(&self.render_config);
        let lights = self.sim.layout.light_positions;

        render_system.update_water_vertices(&self.water_grid.mesh.vertices);
        render_system.update_scene_uniforms(&Uniforms::new(view_proj, Mat4::IDENTITY, lights));

        let pose = self.sim.object_pose();
        let model = Mat4::from_translation(pose.position) * Mat4::from_rotation_x(pose.pitch_rad);
        render_system.update_actor_uniforms(&Uniforms::new(view_proj, model, lights));

        match render_system.render(self.frame_count, self.sim.scene.object) {
            Ok(()) => self.frame_count += 1,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Render device out of memory");
                event_loop.exit();
            }
            Err(e) => {
                log::warn!("Dropped a frame: {e:?}");
            }
        }

        if let Some(ref recording) = self.recording_config {
            if self.frame_count >= recording.total_frames() {
                println!(
                    "Recorded {} frames to {}",
                    self.frame_count,
                    recording.frames_dir()
                );
                event_loop.exit();
            }
        }
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let variant = args.parse_variant();

    println!("Sideshow - carnival shooting-gallery demo");
    println!("Initializing systems...");

    let mut app = App::new(variant, &args);
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let _ = event_loop.run_app(&mut app);
}

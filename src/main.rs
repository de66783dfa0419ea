//! Propane combustion - real-time particle simulation
//!
//! Molecules of propane and oxygen drift around a box; close encounters
//! gradually burn propane into carbon dioxide and water.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use combustion::config::AppConfig;
use combustion::input::{InputAction, InputMapper};
use combustion::systems::{FrameError, HudState, RenderSystem, SimulationSystem, WindowSystem};
use combustion_input::{ControlChange, ControlPanel};
use combustion_sim::{Simulation, SimulationParams};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    renderer: Option<RenderSystem>,
    simulation: Simulation,
    sim_system: SimulationSystem,
    controls: ControlPanel,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let field = config.play_field();
        let mut simulation = match config.simulation.seed {
            Some(seed) => {
                log::info!("Using fixed seed {}", seed);
                Simulation::seeded(field, seed)
            }
            None => Simulation::from_entropy(field),
        };
        simulation.set_labels_visible(config.rendering.show_labels);

        let controls = ControlPanel::new(
            config.simulation.temperature,
            config.simulation.propane_count,
            config.simulation.oxygen_count,
            config.controls.to_control_limits(),
        );

        let sim_system = SimulationSystem::new(config.simulation.max_dt, config.debug.log_passes);

        let mut app = Self {
            config,
            window: None,
            renderer: None,
            simulation,
            sim_system,
            controls,
        };
        app.reset();
        app
    }

    /// Parameters from the config, with the control panel's current values
    fn current_params(&self) -> SimulationParams {
        SimulationParams {
            temperature: self.controls.temperature(),
            propane_count: self.controls.propane_count(),
            oxygen_count: self.controls.oxygen_count(),
            ..self.config.to_simulation_params()
        }
    }

    fn reset(&mut self) {
        let params = self.current_params();
        self.simulation.reset(params);
        self.sim_system.restart_clock();
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ToggleLabels => {
                let visible = self.simulation.toggle_labels();
                log::info!("Labels: {}", if visible { "ON" } else { "OFF" });
            }
            InputAction::TogglePause => {
                let paused = self.simulation.toggle_pause();
                log::info!("{}", if paused { "Paused" } else { "Resumed" });
            }
            InputAction::Reset => self.reset(),
        }
    }

    fn handle_control(&mut self, change: ControlChange) {
        match change {
            ControlChange::Temperature(t) => self.simulation.set_temperature(t),
            // Initial counts only make sense for a fresh mixture
            ControlChange::Counts { .. } => self.reset(),
        }
    }

    fn hud(&self) -> HudState {
        HudState {
            tally: self.simulation.tally(),
            temperature: self.simulation.temperature(),
            paused: self.simulation.is_paused(),
            labels: self.simulation.labels_visible(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let canvas = (self.config.window.width as f32, self.config.window.height as f32);
        let renderer = match RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            canvas,
            self.config.window.vsync,
        ) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!(
            "Controls: Up/Down temperature, [/] propane, -/= oxygen, L labels, P pause, R reset, Esc quit"
        );

        // Time spent creating the window must not reach the simulation
        self.sim_system.restart_clock();
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    // Commands toggle, so held keys must not repeat them
                    if !event.repeat {
                        if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                            self.handle_action(action, event_loop);
                            return;
                        }
                    }
                    if let Some(change) = self.controls.process_keyboard(key, event.state) {
                        self.handle_control(change);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.sim_system.update(&mut self.simulation);

                let hud = self.hud();
                if let Some(window) = &mut self.window {
                    window.update_title(&hud);
                }

                if let Some(renderer) = &mut self.renderer {
                    let labels = self.simulation.labels_visible();
                    match renderer.render_frame(self.simulation.population(), labels) {
                        Ok(()) => {}
                        Err(FrameError::SurfaceLost) => {
                            log::debug!("Surface reconfigured");
                        }
                        Err(FrameError::OutOfMemory) => {
                            log::error!("GPU out of memory, exiting");
                            event_loop.exit();
                            return;
                        }
                        Err(e) => {
                            log::warn!("{}", e);
                        }
                    }
                }

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() {
    // Config first: it carries the default log level
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting propane combustion simulation");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}

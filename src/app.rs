/*
 * Application Module
 *
 * This module defines the application model for the desktop host: window
 * setup, loading parameters, and driving one simulation tick per frame.
 * The simulation area is the window rectangle at the time a run starts.
 *
 * Parameters come from the file named by the first command-line argument,
 * or from `boids.toml` in the working directory when it exists. A file that
 * cannot be read or parsed is reported and the defaults are used instead.
 */

use std::env;
use std::path::{Path, PathBuf};

use nannou::prelude::*;
use nannou_egui::Egui;

use boid_flocks::debug::DebugInfo;
use boid_flocks::{Bounds, FlockParams, FlockSetup, Simulation};

use crate::renderer;
use crate::ui::{self, ControlPanel};

const DEFAULT_CONFIG: &str = "boids.toml";

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    pub controls: ControlPanel,
    pub egui: Egui,
    pub debug_info: DebugInfo,
}

/// The window rectangle as a simulation area.
fn window_area(rect: Rect) -> Bounds {
    Bounds::from_xy(rect.left(), rect.bottom(), rect.right(), rect.top())
}

fn config_path() -> Option<PathBuf> {
    match env::args().nth(1) {
        Some(arg) => Some(PathBuf::from(arg)),
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            default.exists().then(|| default.to_path_buf())
        }
    }
}

fn load_params() -> FlockParams {
    let Some(path) = config_path() else {
        log::debug!("no {} found, using default parameters", DEFAULT_CONFIG);
        return FlockParams::default();
    };

    match FlockParams::load(&path) {
        Ok(params) => params,
        Err(err) => {
            log::warn!(
                "ignoring {}: {}; using default parameters",
                path.display(),
                err
            );
            FlockParams::default()
        }
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // 80% of the primary monitor, or a fixed size when there is none
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        })
        .unwrap_or((1280.0, 800.0));

    let window_id = app
        .new_window()
        .title("Predator and Prey Flocking")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to create window");

    let window = app.window(window_id).expect("window was just created");
    let egui = Egui::from_window(&window);

    let params = load_params();
    let setup = FlockSetup {
        area: window_area(window.rect()),
        ..FlockSetup::default()
    };
    let controls = ControlPanel::new(&setup, &params);

    let simulation =
        Simulation::new(&setup, params).expect("window must have a non-empty drawing area");

    Model {
        simulation,
        controls,
        egui,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    let changes = ui::update_ui(&mut model.egui, &mut model.controls, &model.debug_info);

    if changes.visual_range_changed {
        if let Err(err) = model.simulation.set_visual_range(model.controls.visual_range) {
            log::warn!("rejected visual range: {}", err);
            model.controls.visual_range = model.simulation.params().visual_range;
        }
    }

    if changes.needs_reinitialize() {
        restart(app, model);
    }

    if !model.controls.pause_simulation {
        model.debug_info.last_tick = model.simulation.step();
    }
}

// Start a new run from the panel's population over the current window
fn restart(app: &App, model: &mut Model) {
    let setup = model.controls.setup(window_area(app.window_rect()));
    let params = model.simulation.params().clone();

    match model.simulation.reinitialize(&setup, params) {
        Ok(()) => log::info!(
            "restarted with {} boids, {} predators, {} prey flocks",
            setup.total,
            setup.predators,
            setup.prey_flocks
        ),
        Err(err) => log::warn!("keeping the current run: {}", err),
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

/*
 * UI Module
 *
 * This module contains the control panel and the functions that show it
 * with nannou_egui. Population sliders (total, predators, prey flocks)
 * restart the run when they change; visual range is applied live.
 * Change detection compares against a snapshot taken before the frame.
 */

use nannou_egui::{egui, Egui};

use boid_flocks::debug::DebugInfo;
use boid_flocks::{Bounds, FlockParams, FlockSetup};

/// Values the panel edits directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    pub total_boids: usize,
    pub predators: usize,
    pub prey_flocks: usize,
    pub visual_range: f32,
    pub show_debug: bool,
    pub pause_simulation: bool,
    previous_values: Option<PanelSnapshot>,
}

// A snapshot of panel values used for change detection
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanelSnapshot {
    total_boids: usize,
    predators: usize,
    prey_flocks: usize,
    visual_range: f32,
}

/// What the host has to do after a frame of UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelChanges {
    pub reset_requested: bool,
    pub population_changed: bool,
    pub visual_range_changed: bool,
}

impl PanelChanges {
    pub fn needs_reinitialize(&self) -> bool {
        self.reset_requested || self.population_changed
    }
}

impl ControlPanel {
    pub fn new(setup: &FlockSetup, params: &FlockParams) -> Self {
        Self {
            total_boids: setup.total,
            predators: setup.predators,
            prey_flocks: setup.prey_flocks,
            visual_range: params.visual_range,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }

    /// Setup for a new run over `area`, using the current slider values.
    pub fn setup(&self, area: Bounds) -> FlockSetup {
        FlockSetup::new(
            area,
            self.total_boids,
            self.predators.min(self.total_boids),
            self.prey_flocks,
        )
    }

    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(PanelSnapshot {
            total_boids: self.total_boids,
            predators: self.predators,
            prey_flocks: self.prey_flocks,
            visual_range: self.visual_range,
        });
    }

    pub fn detect_changes(&self) -> PanelChanges {
        let mut changes = PanelChanges::default();

        // If we don't have previous values, nothing has changed
        if let Some(prev) = &self.previous_values {
            changes.population_changed = self.total_boids != prev.total_boids
                || self.predators != prev.predators
                || self.prey_flocks != prev.prey_flocks;
            changes.visual_range_changed = self.visual_range != prev.visual_range;
        }

        changes
    }
}

// Update the UI and report what changed
pub fn update_ui(egui: &mut Egui, panel: &mut ControlPanel, debug_info: &DebugInfo) -> PanelChanges {
    let mut reset_requested = false;

    panel.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                ui.add(
                    egui::Slider::new(&mut panel.total_boids, FlockParams::total_boids_range())
                        .text("Number of Boids"),
                );
                ui.add(
                    egui::Slider::new(&mut panel.predators, FlockParams::predators_range())
                        .text("Predators"),
                );
                ui.add(
                    egui::Slider::new(&mut panel.prey_flocks, FlockParams::prey_flocks_range())
                        .text("Prey Flocks"),
                );

                if ui.button("Reset Boids").clicked() {
                    reset_requested = true;
                }
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(
                    egui::Slider::new(&mut panel.visual_range, FlockParams::visual_range_range())
                        .text("Visual Range"),
                );
            });

            ui.collapsing("Performance", |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!(
                    "Frame time: {:.2} ms",
                    debug_info.frame_time.as_secs_f64() * 1000.0
                ));
                ui.label(format!("Index: {}", debug_info.last_tick.index_name));
                ui.label(format!("Tick: {}", debug_info.last_tick.tick));
            });

            ui.checkbox(&mut panel.show_debug, "Show Debug Info");
            ui.checkbox(&mut panel.pause_simulation, "Pause Simulation");
        });

    PanelChanges {
        reset_requested,
        ..panel.detect_changes()
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    boids_len: usize,
) {
    let margin = 20.0;
    let line_height = 20.0;
    let stats = &debug_info.last_tick;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Total Boids: {}", boids_len),
        format!("Index: {} ({} entries)", stats.index_name, stats.index_entries),
        format!("Candidates: {}", stats.candidates),
        format!("Neighbors: {} ({:.0}%)", stats.neighbors, stats.hit_ratio() * 100.0),
    ];

    // Background panel in the top-right corner, clear of the egui window
    let panel_width = 240.0;
    let panel_height = line_height * debug_texts.len() as f32 + margin;
    draw.rect()
        .x_y(
            window_rect.right() - panel_width / 2.0,
            window_rect.top() - panel_height / 2.0,
        )
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width / 2.0;
    let text_y = window_rect.top() - margin;

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);
        draw.text(text)
            .x_y(text_x, y)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}

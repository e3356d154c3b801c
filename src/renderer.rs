/*
 * Renderer Module
 *
 * This module handles the rendering of the boid simulation.
 * Each boid is drawn as a triangle pointing along its velocity, colored by
 * species: predators in red, prey flocks cycling through green, blue and
 * purple. The simulation area shares the window's coordinate system, so no
 * camera transform is needed.
 */

use nannou::prelude::*;

use boid_flocks::{Boid, Species};

use crate::app::Model;
use crate::ui;
use crate::BOID_SIZE;

const PREDATOR_COLOR: (u8, u8, u8) = (255, 38, 0);

const FLOCK_COLORS: [(u8, u8, u8); 3] = [(23, 118, 0), (29, 29, 255), (151, 27, 206)];

pub fn species_color(species: Species) -> Rgb<u8> {
    let (r, g, b) = match species {
        Species::Predator => PREDATOR_COLOR,
        Species::Prey(flock) => {
            FLOCK_COLORS[flock.saturating_sub(1) as usize % FLOCK_COLORS.len()]
        }
    };
    rgb(r, g, b)
}

// Draw a single boid as an oriented triangle
fn draw_boid(draw: &mut Draw, boid: &Boid) {
    let size = if boid.is_predator() {
        BOID_SIZE * 1.5
    } else {
        BOID_SIZE
    };
    let points = [
        pt2(size, 0.0),
        pt2(-size, size / 2.0),
        pt2(-size, -size / 2.0),
    ];

    draw.polygon()
        .color(species_color(boid.species))
        .points(points)
        .xy(boid.position)
        .rotate(boid.heading());
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let mut draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();

    model.simulation.render_with(&mut draw, draw_boid);

    if model.controls.show_debug {
        ui::draw_debug_info(
            &draw,
            &model.debug_info,
            window_rect,
            model.simulation.flock().len(),
        );
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::error!("failed to draw frame: {:?}", err);
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("failed to draw controls: {:?}", err);
    }
}

/*
 * Predator and Prey Flocking
 *
 * Desktop host for the flocking library. Prey boids gather with their own
 * flock, match its heading and keep their distance; predators chase any
 * prey they can see, and prey scatter from them.
 *
 * The control panel changes the population (which restarts the run) and
 * the visual range (applied immediately). Set RUST_LOG to change the log
 * level; the default is `info`.
 */

mod app;
mod renderer;
mod ui;

// Half the length of a prey triangle
const BOID_SIZE: f32 = 6.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(app::model).update(app::update).run();
}

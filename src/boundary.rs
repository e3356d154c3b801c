/*
 * Boundary Module
 *
 * Soft containment: a boid inside the margin band along an edge has its
 * velocity nudged back towards the interior. Each edge is checked on its
 * own, so a boid in a corner is pushed along both axes. This does not clamp
 * positions; a fast boid can overshoot the edge for a few ticks before it
 * turns around.
 */

use crate::boid::Boid;
use crate::bounds::Bounds;

pub fn contain(boid: &mut Boid, area: &Bounds, margin: f32, turning_force: f32) {
    if boid.position.x < area.min.x + margin {
        boid.velocity.x += turning_force;
    }
    if boid.position.x > area.max.x - margin {
        boid.velocity.x -= turning_force;
    }
    if boid.position.y < area.min.y + margin {
        boid.velocity.y += turning_force;
    }
    if boid.position.y > area.max.y - margin {
        boid.velocity.y -= turning_force;
    }
}

/// Worst-case distance a boid moving at `speed_limit` can travel past the
/// margin band's inner edge before containment reverses it. Only the
/// turning force is assumed to act.
pub fn overshoot_slack(speed_limit: f32, turning_force: f32) -> f32 {
    if turning_force <= 0.0 {
        return f32::INFINITY;
    }
    speed_limit + speed_limit * speed_limit / (2.0 * turning_force)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boid::Species;
    use nannou::prelude::{vec2, Vec2};

    fn area() -> Bounds {
        Bounds::from_xy(0.0, 0.0, 1000.0, 1000.0)
    }

    fn at(x: f32, y: f32) -> Boid {
        Boid::new(vec2(x, y), Vec2::ZERO, Species::Prey(1))
    }

    #[test]
    fn interior_is_untouched() {
        let mut boid = at(500.0, 500.0);
        contain(&mut boid, &area(), 100.0, 0.4);
        assert_eq!(boid.velocity, Vec2::ZERO);
    }

    #[test]
    fn each_edge_pushes_inwards() {
        let mut left = at(50.0, 500.0);
        contain(&mut left, &area(), 100.0, 0.4);
        assert_eq!(left.velocity, vec2(0.4, 0.0));

        let mut top = at(500.0, 950.0);
        contain(&mut top, &area(), 100.0, 0.4);
        assert_eq!(top.velocity, vec2(0.0, -0.4));
    }

    #[test]
    fn corners_push_on_both_axes() {
        let mut corner = at(990.0, 10.0);
        contain(&mut corner, &area(), 100.0, 0.4);
        assert_eq!(corner.velocity, vec2(-0.4, 0.4));
    }

    #[test]
    fn outside_the_area_still_turns_back() {
        let mut lost = at(-30.0, 1200.0);
        contain(&mut lost, &area(), 100.0, 0.4);
        assert_eq!(lost.velocity, vec2(0.4, -0.4));
    }

    #[test]
    fn slack_grows_with_speed() {
        assert!(overshoot_slack(8.0, 0.4) > overshoot_slack(5.0, 0.4));
        assert!(overshoot_slack(5.0, 0.0).is_infinite());
    }
}

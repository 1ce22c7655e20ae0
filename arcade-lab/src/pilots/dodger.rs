use arcade_core::asteroids::Rock;
use arcade_core::{ShipCommand, Vec2, World};

use super::Pilot;

const THREAT_RADIUS: f64 = 160.0;
const AIM_TOLERANCE_DEG: f64 = 10.0;
const THRUST_COOLDOWN_TICKS: u32 = 8;

/// Points the nose away from the closest incoming rock and burns.
#[derive(Default)]
pub struct Dodger {
    cooldown: u32,
}

fn center(position: Vec2, size: f64) -> Vec2 {
    Vec2::new(position.x + size / 2.0, position.y + size / 2.0)
}

/// Heading (degrees, counter-clockwise from up) that points along `dir`.
fn heading_of(dir: Vec2) -> f64 {
    (-dir.x).atan2(dir.y).to_degrees()
}

/// Signed shortest turn from `from` to `to`, in `(-180, 180]`.
fn turn_between(from: f64, to: f64) -> f64 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

fn closest_threat<'a>(ship_center: Vec2, rocks: &'a [Rock]) -> Option<(&'a Rock, Vec2)> {
    rocks
        .iter()
        .map(|rock| {
            let rock_center = center(rock.position, rock.size);
            let away = Vec2::new(ship_center.x - rock_center.x, ship_center.y - rock_center.y);
            (rock, away)
        })
        .filter(|(rock, away)| {
            // Closing in when the rock's velocity points at the ship.
            away.length() < THREAT_RADIUS
                && rock.velocity.x * away.x + rock.velocity.y * away.y > 0.0
        })
        .min_by(|(_, a), (_, b)| a.length().total_cmp(&b.length()))
}

impl Pilot for Dodger {
    fn id(&self) -> &'static str {
        "dodger"
    }

    fn description(&self) -> &'static str {
        "Turns away from the nearest incoming rock and thrusts clear"
    }

    fn reset(&mut self, _seed: u32) {
        self.cooldown = 0;
    }

    fn next_command(&mut self, world: &World) -> Option<ShipCommand> {
        self.cooldown = self.cooldown.saturating_sub(1);

        let ship = world.ship();
        let (_, away) = closest_threat(center(ship.position, ship.size), world.rocks())?;

        let turn = turn_between(ship.angle, heading_of(away));
        if turn.abs() > AIM_TOLERANCE_DEG {
            return Some(if turn > 0.0 {
                ShipCommand::RotateLeft
            } else {
                ShipCommand::RotateRight
            });
        }

        if self.cooldown == 0 {
            self.cooldown = THRUST_COOLDOWN_TICKS;
            return Some(ShipCommand::FireEngine);
        }
        None
    }
}

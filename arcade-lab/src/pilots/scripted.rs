use arcade_core::{SeededRng, ShipCommand, World};

use super::Pilot;

pub struct Idle;

impl Pilot for Idle {
    fn id(&self) -> &'static str {
        "idle"
    }

    fn description(&self) -> &'static str {
        "Never presses a key; the ship sits where it spawned"
    }

    fn reset(&mut self, _seed: u32) {}

    fn next_command(&mut self, _world: &World) -> Option<ShipCommand> {
        None
    }
}

/// Turns left every tick and gives a kick every half second.
#[derive(Default)]
pub struct Spinner {
    tick: u32,
}

impl Pilot for Spinner {
    fn id(&self) -> &'static str {
        "spinner"
    }

    fn description(&self) -> &'static str {
        "Spins counter-clockwise, thrusting every 30 ticks"
    }

    fn reset(&mut self, _seed: u32) {
        self.tick = 0;
    }

    fn next_command(&mut self, _world: &World) -> Option<ShipCommand> {
        self.tick += 1;
        if self.tick % 30 == 0 {
            Some(ShipCommand::FireEngine)
        } else {
            Some(ShipCommand::RotateLeft)
        }
    }
}

#[derive(Default)]
pub struct Thruster {
    tick: u32,
}

impl Pilot for Thruster {
    fn id(&self) -> &'static str {
        "thruster"
    }

    fn description(&self) -> &'static str {
        "Fires the engine every 20 ticks and veers right every 45"
    }

    fn reset(&mut self, _seed: u32) {
        self.tick = 0;
    }

    fn next_command(&mut self, _world: &World) -> Option<ShipCommand> {
        self.tick += 1;
        if self.tick % 45 == 0 {
            Some(ShipCommand::RotateRight)
        } else if self.tick % 20 == 0 {
            Some(ShipCommand::FireEngine)
        } else {
            None
        }
    }
}

/// Mashes keys at random, about one press in ten ticks.
pub struct RandomKeys {
    rng: SeededRng,
}

impl Default for RandomKeys {
    fn default() -> Self {
        Self {
            rng: SeededRng::new(0),
        }
    }
}

impl Pilot for RandomKeys {
    fn id(&self) -> &'static str {
        "random"
    }

    fn description(&self) -> &'static str {
        "Random key presses seeded from the run seed"
    }

    fn reset(&mut self, seed: u32) {
        // Decorrelate from the world's own stream.
        self.rng = SeededRng::new(seed ^ 0x5EED_CAFE);
    }

    fn next_command(&mut self, _world: &World) -> Option<ShipCommand> {
        if !self.rng.chance(0.1) {
            return None;
        }
        match self.rng.next_int(3) {
            0 => Some(ShipCommand::RotateLeft),
            1 => Some(ShipCommand::RotateRight),
            _ => Some(ShipCommand::FireEngine),
        }
    }
}

use arcade_core::{ShipCommand, World};

mod dodger;
mod scripted;

pub use dodger::Dodger;
pub use scripted::{Idle, RandomKeys, Spinner, Thruster};

/// Stands in for the keyboard: at most one key press per tick.
pub trait Pilot {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn reset(&mut self, seed: u32);
    fn next_command(&mut self, world: &World) -> Option<ShipCommand>;
}

pub fn pilot_ids() -> &'static [&'static str] {
    &["idle", "spinner", "thruster", "random", "dodger"]
}

pub fn create_pilot(id: &str) -> Option<Box<dyn Pilot + Send>> {
    match id {
        "idle" => Some(Box::new(Idle)),
        "spinner" => Some(Box::new(Spinner::default())),
        "thruster" => Some(Box::new(Thruster::default())),
        "random" => Some(Box::new(RandomKeys::default())),
        "dodger" => Some(Box::new(Dodger::default())),
        _ => None,
    }
}

pub fn describe_pilots() -> Vec<(&'static str, &'static str)> {
    pilot_ids()
        .iter()
        .filter_map(|id| create_pilot(id))
        .map(|pilot| (pilot.id(), pilot.description()))
        .collect()
}

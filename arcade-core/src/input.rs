use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::life::Pattern;

/// One keyboard command for the ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipCommand {
    RotateLeft,
    RotateRight,
    FireEngine,
}

impl ShipCommand {
    /// Keys of the desktop build: `q` rotates left, `w` right, `e` thrusts.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'q' => Some(Self::RotateLeft),
            'w' => Some(Self::RotateRight),
            'e' => Some(Self::FireEngine),
            _ => None,
        }
    }
}

/// Pointer, text-field and button events for the Life board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifeInput {
    Toggle { row: usize, col: usize },
    /// Raw contents of the density text field.
    Restart(String),
    ToggleRunning,
    Clear,
    Stamp(Pattern),
}

/// FIFO of host events, drained once per tick by the owning engine.
#[derive(Clone, Debug)]
pub struct InputQueue<T> {
    pending: VecDeque<T>,
}

impl<T> Default for InputQueue<T> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }
}

impl<T> InputQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: T) {
        self.pending.push_back(event);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.pending.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_keys_map_to_commands() {
        assert_eq!(ShipCommand::from_key('q'), Some(ShipCommand::RotateLeft));
        assert_eq!(ShipCommand::from_key('W'), Some(ShipCommand::RotateRight));
        assert_eq!(ShipCommand::from_key('e'), Some(ShipCommand::FireEngine));
        assert_eq!(ShipCommand::from_key('x'), None);
    }

    #[test]
    fn queue_drains_in_arrival_order() {
        let mut queue = InputQueue::new();
        queue.push(ShipCommand::FireEngine);
        queue.push(ShipCommand::RotateLeft);
        assert_eq!(queue.len(), 2);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![ShipCommand::FireEngine, ShipCommand::RotateLeft]
        );
        assert!(queue.is_empty());
    }
}

use serde::{Deserialize, Serialize};

use crate::constants::{
    ENGINE_IMPULSE, FRICTION_FACTOR, ROCK_INTERVAL_SECONDS, ROCK_SIZE, ROTATE_STEP_DEG, SHIP_SIZE,
    WORLD_HEIGHT, WORLD_WIDTH, WORLD_X, WORLD_Y,
};
use crate::error::ArcadeError;
use crate::input::ShipCommand;
use crate::vector::Vec2;

mod world;

pub use world::World;

/// Rectangular play area, `y` growing upwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, ArcadeError> {
        let finite = x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite();
        if !finite || width <= 0.0 || height <= 0.0 {
            return Err(ArcadeError::InvalidBounds { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// `true` once `point` is more than `margin` past any edge.
    pub fn is_beyond(&self, point: Vec2, margin: f64) -> bool {
        point.x < self.left() - margin
            || point.x > self.right() + margin
            || point.y < self.bottom() - margin
            || point.y > self.top() + margin
    }

    /// Puts an escaped point on the opposite edge, each axis on its own.
    pub fn wrap(&self, mut point: Vec2) -> Vec2 {
        if point.x < self.left() {
            point.x = self.right();
        }
        if point.x > self.right() {
            point.x = self.left();
        }
        if point.y < self.bottom() {
            point.y = self.top();
        }
        if point.y > self.top() {
            point.y = self.bottom();
        }
        point
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x: WORLD_X,
            y: WORLD_Y,
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of side `size` whose lower-left corner is `origin`.
    pub fn square(origin: Vec2, size: f64) -> Self {
        Self {
            min: origin,
            max: Vec2::new(origin.x + size, origin.y + size),
        }
    }

    /// Nonzero-area overlap only; boxes sharing an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Lower-left corner of the bounding box.
    pub position: Vec2,
    pub velocity: Vec2,
    /// Heading in degrees, counter-clockwise, 0 pointing up.
    pub angle: f64,
    pub size: f64,
}

impl Ship {
    pub fn new(position: Vec2, size: f64) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            size,
        }
    }

    pub fn rotate_left(&mut self) {
        self.angle += ROTATE_STEP_DEG;
    }

    pub fn rotate_right(&mut self) {
        self.angle -= ROTATE_STEP_DEG;
    }

    /// One impulse along the current heading.
    pub fn fire_engine(&mut self) {
        self.velocity += Vec2::new(0.0, ENGINE_IMPULSE).rotate(self.angle);
    }

    pub fn apply(&mut self, command: ShipCommand) {
        match command {
            ShipCommand::RotateLeft => self.rotate_left(),
            ShipCommand::RotateRight => self.rotate_right(),
            ShipCommand::FireEngine => self.fire_engine(),
        }
    }

    /// Integrates one tick: move, damp, then wrap.
    pub fn advance(&mut self, bounds: &Bounds) {
        self.position += self.velocity;
        self.velocity *= FRICTION_FACTOR;
        self.position = bounds.wrap(self.position);
    }

    #[inline]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::square(self.position, self.size)
    }
}

pub type RockId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rock {
    pub id: RockId,
    /// Lower-left corner of the bounding box.
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f64,
    /// Degrees added to `angle` every tick.
    pub rotation_velocity: f64,
    pub size: f64,
    pub glyph: char,
    pub color: [f32; 4],
}

impl Rock {
    /// Integrates one tick. Rocks neither slow down nor wrap.
    pub fn advance(&mut self) {
        self.position += self.velocity;
        self.angle += self.rotation_velocity;
    }

    #[inline]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::square(self.position, self.size)
    }
}

/// What a ship–rock collision does besides zeroing the score and spawn timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Rocks already on the field stay where they are.
    #[default]
    SoftReset,
    ClearRocks,
}

impl CollisionPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "soft_reset" | "soft" => Some(Self::SoftReset),
            "clear_rocks" | "clear" => Some(Self::ClearRocks),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SoftReset => "soft_reset",
            Self::ClearRocks => "clear_rocks",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub bounds: Bounds,
    pub ship_size: f64,
    pub rock_size: f64,
    pub rock_interval: f64,
    pub collision_policy: CollisionPolicy,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            ship_size: SHIP_SIZE,
            rock_size: ROCK_SIZE,
            rock_interval: ROCK_INTERVAL_SECONDS,
            collision_policy: CollisionPolicy::default(),
        }
    }
}

/// Per-tick summary for the rendering side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub collided: bool,
    pub spawned: Option<RockId>,
    pub culled: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub elapsed: f64,
    pub score: f64,
    pub best_score: f64,
    pub collisions: u32,
    pub rock_timer: f64,
    /// Spawner RNG state after the last tick.
    pub rng_state: u32,
    pub ship: Ship,
    pub rocks: Vec<Rock>,
}

#[cfg(test)]
mod tests;

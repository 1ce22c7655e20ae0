use super::*;
use crate::constants::{
    ROCK_CULL_MARGIN, ROCK_GLYPHS, ROCK_SPAWN_OFFSET, ROCK_SPEED_MAX, ROCK_SPEED_MIN,
    ROCK_SPIN_MAX_DEG,
};
use crate::input::InputQueue;
use crate::rng::SeededRng;

const ROCK_VEC_CAPACITY: usize = 64;

/// Ship, rocks, spawner and score for one asteroid-avoidance run.
#[derive(Clone, Debug)]
pub struct World {
    config: WorldConfig,
    ship: Ship,
    rocks: Vec<Rock>,
    next_rock_id: RockId,
    rock_timer: f64,
    score: f64,
    best_score: f64,
    collisions: u32,
    tick: u64,
    elapsed: f64,
    commands: InputQueue<ShipCommand>,
    rng: SeededRng,
}

impl World {
    pub fn new(config: WorldConfig, seed: u32) -> Result<Self, ArcadeError> {
        let bounds = Bounds::new(
            config.bounds.x,
            config.bounds.y,
            config.bounds.width,
            config.bounds.height,
        )?;
        for (what, size) in [("ship", config.ship_size), ("rock", config.rock_size)] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ArcadeError::InvalidSize { what, size });
            }
        }
        if !config.rock_interval.is_finite() || config.rock_interval <= 0.0 {
            return Err(ArcadeError::InvalidInterval {
                seconds: config.rock_interval,
            });
        }

        let half = config.ship_size / 2.0;
        let center = bounds.center();
        let ship = Ship::new(Vec2::new(center.x - half, center.y - half), config.ship_size);

        Ok(Self {
            config,
            ship,
            rocks: Vec::with_capacity(ROCK_VEC_CAPACITY),
            next_rock_id: 0,
            rock_timer: 0.0,
            score: 0.0,
            best_score: 0.0,
            collisions: 0,
            tick: 0,
            elapsed: 0.0,
            commands: InputQueue::new(),
            rng: SeededRng::new(seed),
        })
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.config.bounds
    }

    #[inline]
    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    #[inline]
    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    #[inline]
    pub fn rocks(&self) -> &[Rock] {
        &self.rocks
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    #[inline]
    pub fn collisions(&self) -> u32 {
        self.collisions
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    #[inline]
    pub fn rock_timer(&self) -> f64 {
        self.rock_timer
    }

    #[inline]
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Queues a command for the next tick.
    pub fn push_command(&mut self, command: ShipCommand) {
        self.commands.push(command);
    }

    /// Clears the per-run state: score and spawn timer.
    pub fn restart(&mut self) {
        self.rock_timer = 0.0;
        self.score = 0.0;
    }

    pub fn tick(&mut self, dt: f64) -> TickReport {
        self.tick += 1;
        self.elapsed += dt;

        for command in self.commands.drain() {
            self.ship.apply(command);
        }

        self.move_objects();
        let culled = self.cull_rocks();

        let collided = self.ship_rock_collision();
        if collided {
            self.collisions += 1;
            self.restart();
            if matches!(self.config.collision_policy, CollisionPolicy::ClearRocks) {
                self.rocks.clear();
            }
        }

        let mut spawned = None;
        self.rock_timer += dt;
        if self.rock_timer >= self.config.rock_interval {
            spawned = Some(self.spawn_rock());
            self.rock_timer = 0.0;
        }

        self.score += dt;
        self.best_score = self.best_score.max(self.score);

        TickReport {
            collided,
            spawned,
            culled,
        }
    }

    fn move_objects(&mut self) {
        let bounds = self.config.bounds;
        self.ship.advance(&bounds);
        for rock in &mut self.rocks {
            rock.advance();
        }
    }

    /// Removes rocks that drifted past the cull margin. Returns how many went.
    pub fn cull_rocks(&mut self) -> usize {
        let bounds = self.config.bounds;
        let before = self.rocks.len();
        self.rocks
            .retain(|rock| !bounds.is_beyond(rock.position, ROCK_CULL_MARGIN));
        before - self.rocks.len()
    }

    pub fn ship_rock_collision(&self) -> bool {
        let ship_box = self.ship.bounding_box();
        self.rocks
            .iter()
            .any(|rock| rock.bounding_box().overlaps(&ship_box))
    }

    /// Places a rock directly, bypassing the spawner.
    pub fn insert_rock(&mut self, position: Vec2, velocity: Vec2) -> RockId {
        let id = self.next_rock_id;
        self.next_rock_id += 1;
        self.rocks.push(Rock {
            id,
            position,
            velocity,
            angle: 0.0,
            rotation_velocity: 0.0,
            size: self.config.rock_size,
            glyph: char::from(ROCK_GLYPHS[0]),
            color: [1.0, 1.0, 1.0, 1.0],
        });
        id
    }

    /// Spawns one rock just outside a random edge, heading inwards.
    pub fn spawn_rock(&mut self) -> RockId {
        let bounds = self.config.bounds;
        let mut x = self.rng.next_f64(bounds.left(), bounds.right());
        let mut y = self.rng.next_f64(bounds.bottom(), bounds.top());
        let mut vx = self.rng.next_f64(ROCK_SPEED_MIN, ROCK_SPEED_MAX);
        let mut vy = self.rng.next_f64(ROCK_SPEED_MIN, ROCK_SPEED_MAX);

        match self.rng.next_int(4) {
            0 => {
                x = bounds.left() - ROCK_SPAWN_OFFSET;
                vx = vx.abs();
            }
            1 => {
                x = bounds.right() + ROCK_SPAWN_OFFSET;
                vx = -vx.abs();
            }
            2 => {
                y = bounds.bottom() - ROCK_SPAWN_OFFSET;
                vy = vy.abs();
            }
            _ => {
                y = bounds.top() + ROCK_SPAWN_OFFSET;
                vy = -vy.abs();
            }
        }

        let rotation_velocity = self.rng.next_f64(0.0, ROCK_SPIN_MAX_DEG);
        let glyph = char::from(ROCK_GLYPHS[self.rng.next_int(ROCK_GLYPHS.len() as u32) as usize]);
        let color = [
            self.rng.next_unit() as f32,
            self.rng.next_unit() as f32,
            self.rng.next_unit() as f32,
            1.0,
        ];

        let id = self.next_rock_id;
        self.next_rock_id += 1;
        self.rocks.push(Rock {
            id,
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            angle: 0.0,
            rotation_velocity,
            size: self.config.rock_size,
            glyph,
            color,
        });
        id
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            elapsed: self.elapsed,
            score: self.score,
            best_score: self.best_score,
            collisions: self.collisions,
            rock_timer: self.rock_timer,
            rng_state: self.rng.state(),
            ship: self.ship,
            rocks: self.rocks.clone(),
        }
    }
}

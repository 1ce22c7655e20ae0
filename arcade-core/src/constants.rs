//! Tuning values carried over from the two desktop toys.

// Life board
pub const LIFE_ROWS: usize = 50;
pub const LIFE_COLS: usize = 50;
pub const LIFE_STEP_SECONDS: f64 = 0.5; // 2 Hz
pub const LIFE_DEFAULT_DENSITY: f64 = 5.0; // one in five cells alive on restart

// Play area (default window size)
pub const WORLD_X: f64 = 0.0;
pub const WORLD_Y: f64 = 0.0;
pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 600.0;

// Frame clock
pub const ASTEROIDS_TICK_HZ: u32 = 60;
pub const ASTEROIDS_TICK_SECONDS: f64 = 1.0 / 60.0;

// Ship
pub const ROTATE_STEP_DEG: f64 = 10.0;
pub const FRICTION_FACTOR: f64 = 0.95;
pub const ENGINE_IMPULSE: f64 = 10.0; // along the heading, (0, 10) at 0 degrees
pub const SHIP_SIZE: f64 = 30.0;

// Rocks
pub const ROCK_SIZE: f64 = 40.0;
pub const ROCK_INTERVAL_SECONDS: f64 = 0.5;
pub const ROCK_SPAWN_OFFSET: f64 = 100.0;
pub const ROCK_CULL_MARGIN: f64 = 200.0;
pub const ROCK_SPEED_MIN: f64 = 1.0;
pub const ROCK_SPEED_MAX: f64 = 2.0;
pub const ROCK_SPIN_MAX_DEG: f64 = ROTATE_STEP_DEG / 2.0;
pub const ROCK_GLYPHS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

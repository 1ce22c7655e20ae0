pub mod asteroids;
pub mod clock;
pub mod constants;
pub mod error;
pub mod input;
pub mod life;
pub mod rng;
pub mod vector;

pub use asteroids::{CollisionPolicy, TickReport, World, WorldConfig, WorldSnapshot};
pub use clock::Ticker;
pub use error::ArcadeError;
pub use input::{InputQueue, LifeInput, ShipCommand};
pub use life::{Density, LifeBoard, LifeConfig, LifeSession, LifeSnapshot};
pub use rng::SeededRng;
pub use vector::Vec2;

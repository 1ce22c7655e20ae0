pub mod benchmark;
pub mod config;
pub mod life;
pub mod pilots;
pub mod runner;
pub mod util;

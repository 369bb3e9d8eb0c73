//! Sensor module - reading types and reading sources

mod traits;
mod simulator;
mod replay;

pub use traits::{Reading, ReadingSource, WaterQuality};
pub use simulator::TankSimulator;
pub use replay::ReplaySource;

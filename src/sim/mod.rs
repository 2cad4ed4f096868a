pub mod lorenz;
pub mod trajectory;

pub use lorenz::LorenzParams;
pub use trajectory::{Simulation, Trajectory};

pub mod node;
pub mod settings;
pub mod simulation;

pub use settings::*;

//! Tunable parameters of the snowball sampling protocol.
//!
//! The same parameter set is consumed by the bootstrapper (`alpha` is the weight
//! required to accept a container) and by the steady state sampling protocol which
//! runs after bootstrapping, so it is validated once before either is built.
mod parameters;

pub use parameters::{ConfigError, Parameters};

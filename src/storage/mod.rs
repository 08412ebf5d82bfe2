//! Database storage layer using [`sled`](http://docs.rs/sled/) as backend

/// A chain of accepted containers which can be bootstrapped
pub mod chain;

pub use chain::ChainStore;

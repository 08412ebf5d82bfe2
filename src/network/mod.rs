//! An in-process transport connecting bootstrappers through a [Router] actor.
//!
//! Requests to a peer which is not registered fail right away, which the requesting
//! bootstrapper treats as an empty answer.
mod router;
mod sender;

pub use router::*;
pub use sender::LocalSender;

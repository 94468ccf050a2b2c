//! Translation layer between a media playback engine and a user interface.
//!
//! The [Mediator] forwards UI commands to an [engine::Engine] after checking
//! and clamping them, and turns the engine's events into
//! [protocol::Notification]s: playback state, time and length, chapter and
//! track menus.

pub mod chapters;
pub mod config;
pub mod engine;
pub mod errors;
pub mod listener;
mod mediator;
pub mod node;
pub mod sim;
pub mod timefmt;
pub mod tracks;

#[cfg(test)]
pub(crate) mod testing;

pub use self::{
    config::Config,
    engine::{Engine, EngineEvent},
    errors::{MediatorError, MediatorResult},
    listener::Listener,
    mediator::Mediator,
};

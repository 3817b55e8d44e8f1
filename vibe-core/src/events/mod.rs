//! Pipeline event system: handler trait, payload types, dispatcher.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::VibeEventHandler;
pub use types::*;

//! Wire types for the notifications events endpoint.

pub mod event;

pub use event::{Event, EventId, EventsPage};

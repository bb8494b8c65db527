//! GitHub webhook payload types.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod event_type;
pub mod types;

pub use event_type::{EventType, EventTypeError};

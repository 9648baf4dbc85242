//! Reducers that fold creature token events into entities.
//!
//! [`EventProcessor`] decodes logs, runs the matching reducer inside a
//! store transaction and commits or discards its writes.

pub mod decode;
mod handlers;
pub mod helpers;
mod pipeline;

pub use decode::{decode_log, FACTORY_TOPICS, TOKEN_TOPICS};
pub use handlers::{dispatch, Applied};
pub use pipeline::EventProcessor;

//! Trace event types, newline-delimited-JSON I/O, and the optional
//! TOML configuration surface that builds a runtime memory hierarchy
//! and predictor list.

mod config;
mod error;
mod event;
mod reader;
mod writer;

pub use config::Config;
pub use error::{ConfigLoadError, TraceError};
pub use event::{to_register_ids, RegisterIdRepr, TraceEvent};
pub use reader::{EventSource, TraceReader, VecEventSource};
pub use writer::TraceWriter;

//! Emitting a newline-delimited-JSON trace — the inverse of `TraceReader`,
//! used by test fixtures and anything that records a trace rather than
//! replaying one.

use std::io::{self, Write};

use crate::event::TraceEvent;

pub struct TraceWriter<W> {
    sink: W,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn write_event(&mut self, event: &TraceEvent) -> io::Result<()> {
        let line = serde_json::to_string(event).map_err(io::Error::other)?;
        writeln!(self.sink, "{line}")
    }
}

//! Replaying a newline-delimited-JSON trace as an `EventSource`.

use std::io::BufRead;

use crate::error::TraceError;
use crate::event::TraceEvent;

/// A source of trace events, delivered one at a time in execution order.
///
/// The CPU accountant's driver loop is generic over this trait so tests
/// can feed it an in-memory `Vec<TraceEvent>` without touching a file,
/// and the real binary can feed it a file or stdin identically.
pub trait EventSource {
    /// Returns the next event, or `None` once the source is exhausted.
    fn next_event(&mut self) -> Result<Option<TraceEvent>, TraceError>;
}

/// Reads one `TraceEvent` per line from any `BufRead`.
pub struct TraceReader<R> {
    lines: std::io::Lines<R>,
    line_number: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> EventSource for TraceReader<R> {
    fn next_event(&mut self) -> Result<Option<TraceEvent>, TraceError> {
        loop {
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            self.line_number += 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let event = serde_json::from_str(trimmed).map_err(|source| TraceError::Decode {
                line_number: self.line_number,
                source,
            })?;
            return Ok(Some(event));
        }
    }
}

/// Replays a fixed, in-memory sequence of events — useful for tests.
pub struct VecEventSource {
    events: std::vec::IntoIter<TraceEvent>,
}

impl VecEventSource {
    #[must_use]
    pub fn new(events: Vec<TraceEvent>) -> Self {
        Self { events: events.into_iter() }
    }
}

impl EventSource for VecEventSource {
    fn next_event(&mut self) -> Result<Option<TraceEvent>, TraceError> {
        Ok(self.events.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_events_one_per_line_skipping_blanks() {
        let input = concat!(
            "{\"kind\":\"mem_read\",\"ip\":1,\"addr\":16}\n",
            "\n",
            "{\"kind\":\"cond_branch\",\"ip\":2,\"target\":3,\"taken\":true}\n",
            "{\"kind\":\"finalize\"}\n",
        );
        let mut reader = TraceReader::new(Cursor::new(input));

        assert!(matches!(
            reader.next_event().unwrap(),
            Some(TraceEvent::MemRead { ip: 1, addr: 16, .. })
        ));
        assert!(matches!(
            reader.next_event().unwrap(),
            Some(TraceEvent::CondBranch { ip: 2, target: 3, taken: true })
        ));
        assert!(matches!(reader.next_event().unwrap(), Some(TraceEvent::Finalize)));
        assert!(reader.next_event().unwrap().is_none());
    }

    #[test]
    fn malformed_line_reports_its_line_number() {
        let input = "{\"kind\":\"mem_read\",\"ip\":1,\"addr\":16}\nnot json\n";
        let mut reader = TraceReader::new(Cursor::new(input));
        reader.next_event().unwrap();
        let err = reader.next_event().unwrap_err();
        assert!(matches!(err, TraceError::Decode { line_number: 2, .. }));
    }
}

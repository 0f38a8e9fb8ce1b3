//! Opaque register identifiers.

/// An opaque register identifier, comparable for equality.
///
/// The accountant never interprets the value — it only tests membership
/// in the most-recent-memory-write set. The instruction decoder that
/// would assign these is out of scope for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterId(pub u32);

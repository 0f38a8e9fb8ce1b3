//! Shared "hits / total = quotient" line formatting.
//!
//! Division by zero is allowed to produce `NaN`/`inf` through the host
//! float formatter — the integers still print correctly either way, so
//! no special-casing is needed here.

use std::io::{self, Write};

pub fn write_ratio_line(
    sink: &mut dyn Write,
    label: &str,
    hits: u64,
    total: u64,
) -> io::Result<()> {
    let quotient = hits as f64 / total as f64;
    writeln!(sink, "\t{label}: {hits} / {total} = {quotient}")
}

//! Per-domain inventory probes
//!
//! Each probe consults an ordered list of sources, merges readings with a
//! fill-only-empty/zero policy, and always returns a record: missing data
//! becomes documented defaults (0, "Unknown", empty), never an error. The
//! source errors swallowed along the way ride along in the outcome so the
//! collector can log them and tests can assert on them.

pub mod board;
pub mod cpu;
pub mod gpu;
pub mod os;
pub mod ram;
pub mod storage;

use crate::sources::{SourceError, SourceResult};

/// A probe result: the record plus every degradation behind it
pub struct ProbeOutcome<T> {
    pub record: T,
    pub degradations: Vec<SourceError>,
}

/// Unwrap a source call, filing the error as a degradation note
pub(crate) fn take<T>(result: SourceResult<T>, notes: &mut Vec<SourceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            notes.push(err);
            None
        }
    }
}

/// Fill-only-zero merge step for counters
pub(crate) fn fill_zero(current: &mut u32, candidate: Option<u32>) {
    if *current == 0 {
        if let Some(value) = candidate {
            if value > 0 {
                *current = value;
            }
        }
    }
}

/// Overwrite merge step for strings: a later source wins only with a
/// non-empty trimmed value
pub(crate) fn overwrite_nonempty(current: &mut String, candidate: Option<String>) {
    if let Some(value) = candidate {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            *current = trimmed.to_string();
        }
    }
}

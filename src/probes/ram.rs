//! RAM probe

use crate::inventory::RamRecord;
use crate::probes::{take, ProbeOutcome};
use crate::sources::{SourceError, SourceId, SourceSet};

/// Generic memory counters, with the vendor operating-system totals as the
/// only fallback. A total of 0 after both sources means "undetermined" and
/// is reported as-is.
pub fn probe(sources: &SourceSet) -> ProbeOutcome<RamRecord> {
    let mut notes = Vec::new();

    let generic = take(sources.generic().memory(), &mut notes).unwrap_or_default();
    let mut total = generic.total_bytes;
    let mut available = generic.available_bytes;

    if total == 0 {
        match sources.vendor() {
            Some(vendor) => {
                if let Some(reading) = take(vendor.memory(), &mut notes) {
                    if reading.total_bytes > 0 {
                        total = reading.total_bytes;
                    }
                    if reading.available_bytes > 0 {
                        available = reading.available_bytes;
                    }
                }
            }
            None => notes.push(SourceError::unavailable(SourceId::Vendor, "memory")),
        }
    }

    ProbeOutcome {
        record: RamRecord {
            total_bytes: total,
            available_bytes: available,
        },
        degradations: notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testkit::{fake_set, FakeSource};
    use crate::sources::{MemoryReading, SourceId};

    #[test]
    fn vendor_is_not_consulted_when_generic_total_is_known() {
        let generic = FakeSource {
            memory_reading: Some(Ok(MemoryReading {
                total_bytes: 16 << 30,
                available_bytes: 8 << 30,
            })),
            ..FakeSource::default()
        };
        let vendor = FakeSource {
            source_id: Some(SourceId::Vendor),
            memory_reading: Some(Ok(MemoryReading {
                total_bytes: 1,
                available_bytes: 1,
            })),
            ..FakeSource::default()
        };

        let outcome = probe(&fake_set(generic, Some(vendor), FakeSource::default()));
        assert_eq!(outcome.record.total_bytes, 16 << 30);
        assert_eq!(outcome.record.available_bytes, 8 << 30);
        assert!(outcome.degradations.is_empty());
    }

    #[test]
    fn vendor_fills_in_when_generic_total_is_zero() {
        let generic = FakeSource {
            memory_reading: Some(Ok(MemoryReading::default())),
            ..FakeSource::default()
        };
        let vendor = FakeSource {
            source_id: Some(SourceId::Vendor),
            memory_reading: Some(Ok(MemoryReading {
                total_bytes: 32 << 30,
                available_bytes: 20 << 30,
            })),
            ..FakeSource::default()
        };

        let outcome = probe(&fake_set(generic, Some(vendor), FakeSource::default()));
        assert_eq!(outcome.record.total_bytes, 32 << 30);
        assert_eq!(outcome.record.available_bytes, 20 << 30);
    }

    #[test]
    fn zero_total_after_both_sources_is_reported_as_zero() {
        let generic = FakeSource {
            memory_reading: Some(Ok(MemoryReading::default())),
            ..FakeSource::default()
        };
        let outcome = probe(&fake_set(generic, None, FakeSource::default()));
        assert_eq!(outcome.record.total_bytes, 0);
        assert_eq!(outcome.record.available_bytes, 0);
        assert_eq!(outcome.degradations.len(), 1);
    }
}

//! CPU probe
//!
//! Field-by-field fallback: generic metrics first, vendor instrumentation
//! to fill (or, for model/frequency, overwrite) where it knows better, and
//! the bare OS core count as the last resort.

use crate::inventory::CpuRecord;
use crate::probes::{fill_zero, overwrite_nonempty, take, ProbeOutcome};
use crate::sources::{SourceError, SourceId, SourceSet};

pub fn probe(sources: &SourceSet) -> ProbeOutcome<CpuRecord> {
    let mut notes = Vec::new();

    let generic = take(sources.generic().cpu(), &mut notes).unwrap_or_default();

    let mut model = generic.model.unwrap_or_default();
    let mut physical = generic.physical_cores.unwrap_or(0);
    let mut logical = generic.logical_cores.unwrap_or(0);
    // Max clock is preferred over the momentary reading
    let mut frequency = generic.max_frequency_mhz.or(generic.current_frequency_mhz);
    let mut manufacturer = String::new();

    match sources.vendor() {
        Some(vendor) => {
            if let Some(reading) = take(vendor.cpu(), &mut notes) {
                overwrite_nonempty(&mut model, reading.model);
                manufacturer = reading.manufacturer.unwrap_or_default();
                if let Some(mhz) = reading.max_frequency_mhz {
                    frequency = Some(mhz);
                }
                fill_zero(&mut physical, reading.physical_cores);
                fill_zero(&mut logical, reading.logical_cores);
            }
        }
        None => notes.push(SourceError::unavailable(SourceId::Vendor, "cpu")),
    }

    if logical == 0 {
        if let Some(count) = take(sources.basic().logical_cpus(), &mut notes) {
            logical = count;
        }
    }
    if physical == 0 && logical > 0 {
        // Approximation, not a measurement: assumes two threads per core.
        // Wrong for CPUs without SMT, where physical == logical.
        physical = if logical > 1 { logical / 2 } else { logical };
    }

    if model.is_empty() {
        model = "Unknown".to_string();
    }

    ProbeOutcome {
        record: CpuRecord {
            model,
            physical_cores: physical,
            logical_cores: logical,
            frequency,
            manufacturer,
        },
        degradations: notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testkit::{fake_set, FakeSource};
    use crate::sources::{CpuReading, SourceId};

    fn generic_with(reading: CpuReading) -> FakeSource {
        FakeSource {
            cpu_reading: Some(Ok(reading)),
            ..FakeSource::default()
        }
    }

    #[test]
    fn physical_cores_fall_back_to_half_of_logical() {
        let generic = generic_with(CpuReading {
            model: Some("Test CPU".to_string()),
            physical_cores: Some(0),
            logical_cores: Some(8),
            ..CpuReading::default()
        });
        let basic = FakeSource {
            source_id: Some(SourceId::BasicOs),
            logical_cpu_reading: Some(Ok(8)),
            ..FakeSource::default()
        };

        let outcome = probe(&fake_set(generic, None, basic));
        assert_eq!(outcome.record.physical_cores, 4);
        assert_eq!(outcome.record.logical_cores, 8);
    }

    #[test]
    fn single_logical_core_is_not_halved() {
        let generic = generic_with(CpuReading {
            logical_cores: Some(1),
            ..CpuReading::default()
        });
        let outcome = probe(&fake_set(generic, None, FakeSource::default()));
        assert_eq!(outcome.record.physical_cores, 1);
        assert_eq!(outcome.record.logical_cores, 1);
    }

    #[test]
    fn vendor_fills_only_zero_counts_and_overwrites_model() {
        let generic = generic_with(CpuReading {
            model: Some("generic name".to_string()),
            physical_cores: Some(6),
            logical_cores: Some(0),
            current_frequency_mhz: Some(2800.0),
            ..CpuReading::default()
        });
        let vendor = FakeSource {
            source_id: Some(SourceId::Vendor),
            cpu_reading: Some(Ok(CpuReading {
                model: Some("  AMD Ryzen 5 5600X  ".to_string()),
                manufacturer: Some("AuthenticAMD".to_string()),
                physical_cores: Some(12),
                logical_cores: Some(12),
                max_frequency_mhz: Some(3700.0),
                ..CpuReading::default()
            })),
            ..FakeSource::default()
        };

        let outcome = probe(&fake_set(generic, Some(vendor), FakeSource::default()));
        assert_eq!(outcome.record.model, "AMD Ryzen 5 5600X");
        assert_eq!(outcome.record.manufacturer, "AuthenticAMD");
        // 6 came from the generic source and stays; only the zero field fills
        assert_eq!(outcome.record.physical_cores, 6);
        assert_eq!(outcome.record.logical_cores, 12);
        assert_eq!(outcome.record.frequency, Some(3700.0));
    }

    #[test]
    fn failing_sources_never_escape_the_probe() {
        let generic = FakeSource {
            cpu_reading: Some(Err(crate::sources::SourceError::query_failed(
                SourceId::Generic,
                "cpu",
                "refused",
            ))),
            ..FakeSource::default()
        };
        let outcome = probe(&fake_set(generic, None, FakeSource::default()));
        assert_eq!(outcome.record.model, "Unknown");
        assert_eq!(outcome.record.physical_cores, 0);
        assert_eq!(outcome.record.logical_cores, 0);
        assert!(outcome.record.frequency.is_none());
        // generic failure + vendor absent + basic primitive absent
        assert_eq!(outcome.degradations.len(), 3);
    }
}

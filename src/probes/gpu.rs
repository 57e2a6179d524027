//! GPU probe
//!
//! Vendor enumeration only; there is no cross-platform adapter source.
//! Synthetic fallback adapters are filtered out, and a sentinel record
//! stands in whenever nothing real survives.

use crate::inventory::GpuRecord;
use crate::probes::{take, ProbeOutcome};
use crate::sources::{SourceError, SourceId, SourceSet};

/// Name fragments of software/fallback display adapters, matched
/// case-sensitively
const SYNTHETIC_ADAPTER_MARKERS: [&str; 2] = ["Basic Display", "Basic Render"];

pub fn probe(sources: &SourceSet) -> ProbeOutcome<Vec<GpuRecord>> {
    let mut notes = Vec::new();
    let mut records = Vec::new();

    match sources.vendor() {
        Some(vendor) => {
            if let Some(adapters) = take(vendor.video_adapters(), &mut notes) {
                for adapter in adapters {
                    let Some(name) = adapter.name else { continue };
                    if is_synthetic_adapter(&name) {
                        continue;
                    }
                    records.push(GpuRecord {
                        name,
                        vendor: adapter.vendor.unwrap_or_default(),
                        vram_bytes: clamp_vram(adapter.vram),
                    });
                }
            }
        }
        None => notes.push(SourceError::unavailable(SourceId::Vendor, "video adapters")),
    }

    if records.is_empty() {
        records.push(GpuRecord::unknown());
    }

    ProbeOutcome {
        record: records,
        degradations: notes,
    }
}

fn is_synthetic_adapter(name: &str) -> bool {
    SYNTHETIC_ADAPTER_MARKERS
        .iter()
        .any(|marker| name.contains(marker))
}

/// Absent, zero, and negative readings all mean "unreported". Negative
/// values are real in the wild: the counter is 32-bit signed in some
/// drivers and wraps for adapters with 4 GB of VRAM or more.
pub(crate) fn clamp_vram(raw: Option<i64>) -> u64 {
    match raw {
        Some(value) if value > 0 => value as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testkit::{fake_set, FakeSource};
    use crate::sources::{AdapterReading, SourceId};

    fn vendor_with(adapters: Vec<AdapterReading>) -> FakeSource {
        FakeSource {
            source_id: Some(SourceId::Vendor),
            adapter_readings: Some(Ok(adapters)),
            ..FakeSource::default()
        }
    }

    #[test]
    fn synthetic_adapters_are_filtered_out() {
        let vendor = vendor_with(vec![
            AdapterReading {
                name: Some("NVIDIA X".to_string()),
                vendor: Some("NVIDIA".to_string()),
                vram: Some(8 << 30),
            },
            AdapterReading {
                name: Some("Microsoft Basic Display Adapter".to_string()),
                ..AdapterReading::default()
            },
        ]);

        let outcome = probe(&fake_set(FakeSource::default(), Some(vendor), FakeSource::default()));
        assert_eq!(outcome.record.len(), 1);
        assert_eq!(outcome.record[0].name, "NVIDIA X");
        assert_eq!(outcome.record[0].vram_bytes, 8 << 30);
    }

    #[test]
    fn all_filtered_yields_exactly_one_sentinel() {
        let vendor = vendor_with(vec![AdapterReading {
            name: Some("Microsoft Basic Render Driver".to_string()),
            ..AdapterReading::default()
        }]);

        let outcome = probe(&fake_set(FakeSource::default(), Some(vendor), FakeSource::default()));
        assert_eq!(outcome.record, vec![GpuRecord::unknown()]);
    }

    #[test]
    fn missing_vendor_source_yields_sentinel() {
        let outcome = probe(&fake_set(
            FakeSource::default(),
            None,
            FakeSource::default(),
        ));
        assert_eq!(outcome.record, vec![GpuRecord::unknown()]);
        assert_eq!(outcome.degradations.len(), 1);
        assert!(outcome.degradations[0].is_unavailable());
    }

    #[test]
    fn wrapped_negative_vram_is_clamped_to_zero() {
        assert_eq!(clamp_vram(Some(-2147483648)), 0);
        assert_eq!(clamp_vram(Some(0)), 0);
        assert_eq!(clamp_vram(None), 0);
        assert_eq!(clamp_vram(Some(4 << 30)), 4 << 30);
    }
}

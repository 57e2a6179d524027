//! Motherboard and host-identity probes

use crate::inventory::{BoardRecord, IdentityRecord};
use crate::probes::{take, ProbeOutcome};
use crate::sources::{SourceError, SourceId, SourceSet};

/// Single vendor lookup; "Unknown"/"Unknown" on absence or failure
pub fn probe(sources: &SourceSet) -> ProbeOutcome<BoardRecord> {
    let mut notes = Vec::new();
    let mut record = BoardRecord::default();

    match sources.vendor() {
        Some(vendor) => {
            if let Some(reading) = take(vendor.baseboard(), &mut notes) {
                if let Some(manufacturer) = reading.manufacturer.filter(|m| !m.is_empty()) {
                    record.manufacturer = manufacturer;
                }
                if let Some(product) = reading.product.filter(|p| !p.is_empty()) {
                    record.model = product;
                }
            }
        }
        None => notes.push(SourceError::unavailable(SourceId::Vendor, "baseboard")),
    }

    ProbeOutcome {
        record,
        degradations: notes,
    }
}

/// Hostname from the generic identity lookup (empty on failure, never
/// fatal) plus the machine architecture
pub fn probe_identity(sources: &SourceSet) -> ProbeOutcome<IdentityRecord> {
    let mut notes = Vec::new();

    let hostname = take(sources.generic().hostname(), &mut notes).unwrap_or_default();

    let mut architecture = take(sources.generic().os(), &mut notes)
        .and_then(|reading| reading.architecture)
        .unwrap_or_default();
    if architecture.is_empty() {
        if let Some(basic) = take(sources.basic().os(), &mut notes) {
            architecture = basic.architecture.unwrap_or_default();
        }
    }

    ProbeOutcome {
        record: IdentityRecord {
            hostname,
            architecture,
        },
        degradations: notes,
    }
}

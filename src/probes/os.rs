//! Operating system probe

use crate::inventory::OsRecord;
use crate::probes::{take, ProbeOutcome};
use crate::sources::{SourceError, SourceId, SourceSet};

/// Read platform name/version/release from the generic source and the
/// vendor edition string where a vendor provider exists. An edition lookup
/// failure degrades the record, never the probe.
pub fn probe(sources: &SourceSet) -> ProbeOutcome<OsRecord> {
    let mut notes = Vec::new();

    let generic = take(sources.generic().os(), &mut notes).unwrap_or_default();
    let name = generic.name.unwrap_or_default();
    let version = generic.version.unwrap_or_default();
    let release = generic.release.unwrap_or_default();

    let mut architecture = generic.architecture.unwrap_or_default();
    if architecture.is_empty() {
        if let Some(basic) = take(sources.basic().os(), &mut notes) {
            architecture = basic.architecture.unwrap_or_default();
        }
    }

    let mut edition = String::new();
    match sources.vendor() {
        Some(vendor) => {
            if let Some(reading) = take(vendor.os(), &mut notes) {
                edition = normalize_edition(reading.edition.as_deref().unwrap_or(""));
            }
        }
        None => notes.push(SourceError::unavailable(SourceId::Vendor, "os")),
    }

    let build = build_number(&version);

    ProbeOutcome {
        record: OsRecord {
            name,
            version,
            release,
            architecture,
            edition,
            build,
        },
        degradations: notes,
    }
}

/// Build number is the third dot-separated component of the version
/// string; absent when the version has fewer than three components.
pub(crate) fn build_number(version: &str) -> Option<String> {
    version
        .split('.')
        .nth(2)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
}

/// Vendor captions read like "Microsoft Windows 11 Pro"; the leading
/// vendor/product tokens duplicate the platform name in the report.
pub(crate) fn normalize_edition(caption: &str) -> String {
    let caption = caption.trim();
    let caption = caption.strip_prefix("Microsoft ").unwrap_or(caption);
    let caption = caption.strip_prefix("Windows ").unwrap_or(caption);
    caption.trim().to_string()
}

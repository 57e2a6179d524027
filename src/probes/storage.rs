//! Storage probe
//!
//! Step 1 enumerates mounted partitions through the generic source and
//! filters out optical media and partitions without a filesystem type. A
//! usage failure on one partition skips that partition only. Step 2 is
//! vendor enrichment: physical disks are classified by media descriptor and
//! joined disk -> partition -> drive letter onto the records from step 1.
//! Enrichment going missing leaves every record tagged Unknown; it never
//! drops a record.

use std::collections::HashMap;

use crate::inventory::{DriveKind, StorageRecord};
use crate::probes::{take, ProbeOutcome};
use crate::sources::{
    AssociationReading, DataSource, DiskClassReading, SourceError, SourceId, SourceSet,
};

pub fn probe(sources: &SourceSet) -> ProbeOutcome<Vec<StorageRecord>> {
    let mut notes = Vec::new();
    let mut records = Vec::new();

    if let Some(partitions) = take(sources.generic().partitions(), &mut notes) {
        for partition in partitions {
            if partition.optical || partition.fs_type.is_empty() {
                continue;
            }
            match partition.usage {
                Ok(usage) => records.push(StorageRecord {
                    mount: partition.mount,
                    device: partition.device,
                    fs_type: partition.fs_type,
                    total_bytes: usage.total_bytes,
                    free_bytes: usage.free_bytes,
                    kind: DriveKind::Unknown,
                }),
                // Partial results are valid results
                Err(err) => notes.push(err),
            }
        }
    }

    match sources.vendor() {
        Some(vendor) => enrich_drive_kinds(vendor, &mut records, &mut notes),
        None => notes.push(SourceError::unavailable(SourceId::Vendor, "disk classes")),
    }

    ProbeOutcome {
        record: records,
        degradations: notes,
    }
}

/// Tag records with the physical drive technology behind their mount
fn enrich_drive_kinds(
    vendor: &dyn DataSource,
    records: &mut [StorageRecord],
    notes: &mut Vec<SourceError>,
) {
    let Some(classes) = take(vendor.disk_classes(), notes) else {
        return;
    };
    let Some(disk_links) = take(vendor.disk_partition_links(), notes) else {
        return;
    };
    let Some(logical_links) = take(vendor.logical_disk_links(), notes) else {
        return;
    };

    for (letter, kind) in join_drive_letters(&classes, &disk_links, &logical_links) {
        for record in records.iter_mut() {
            if record.mount.contains(&letter) {
                record.kind = kind;
            }
        }
    }
}

/// Classify a physical disk from its vendor media descriptor
pub(crate) fn classify_disk(media_type: Option<&str>, interface_type: Option<&str>) -> DriveKind {
    let Some(media) = media_type.filter(|m| !m.is_empty()) else {
        return DriveKind::Unknown;
    };

    if media.contains("SSD") || media.to_ascii_uppercase().contains("SOLID") {
        return DriveKind::Ssd;
    }
    if media.contains("Fixed") {
        if interface_type.is_some_and(|i| i.contains("NVMe")) {
            return DriveKind::NvmeSsd;
        }
        return DriveKind::Hdd;
    }
    DriveKind::Unknown
}

/// Three-way join across disk index, partition identifier and drive letter.
///
/// Association rows carry object paths like
/// `...Win32_DiskPartition.DeviceID="Disk #0, Partition #1"`; the quoted
/// partition identifier is the join key between the two link tables.
pub(crate) fn join_drive_letters(
    classes: &[DiskClassReading],
    disk_links: &[AssociationReading],
    logical_links: &[AssociationReading],
) -> Vec<(String, DriveKind)> {
    let kinds: HashMap<u32, DriveKind> = classes
        .iter()
        .filter_map(|class| {
            class.index.map(|index| {
                (
                    index,
                    classify_disk(class.media_type.as_deref(), class.interface_type.as_deref()),
                )
            })
        })
        .collect();

    let mut out = Vec::new();
    for link in disk_links {
        let Some(partition_id) = quoted_value(&link.dependent) else {
            continue;
        };
        let Some(disk_index) = parse_disk_index(partition_id) else {
            continue;
        };
        let kind = kinds.get(&disk_index).copied().unwrap_or(DriveKind::Unknown);

        for logical in logical_links {
            if !logical.antecedent.contains(partition_id) {
                continue;
            }
            if let Some(letter) = quoted_value(&logical.dependent) {
                out.push((letter.to_string(), kind));
            }
        }
    }
    out
}

/// Quoted key value of a management object path
fn quoted_value(path: &str) -> Option<&str> {
    let start = path.find('"')? + 1;
    let end = path.rfind('"')?;
    (end > start).then(|| &path[start..end])
}

/// Disk index out of a partition identifier like "Disk #0, Partition #1"
fn parse_disk_index(partition_id: &str) -> Option<u32> {
    partition_id
        .split("Disk #")
        .nth(1)?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testkit::{fake_set, FakeSource};
    use crate::sources::{PartitionReading, PartitionUsage, SourceId};

    fn partition(mount: &str, fs_type: &str, total: u64, free: u64) -> PartitionReading {
        PartitionReading {
            mount: mount.to_string(),
            device: format!("dev-{mount}"),
            fs_type: fs_type.to_string(),
            optical: false,
            usage: Ok(PartitionUsage {
                total_bytes: total,
                free_bytes: free,
            }),
        }
    }

    #[test]
    fn empty_fs_and_optical_partitions_are_excluded() {
        let mut optical = partition("D:\\", "udf", 10, 0);
        optical.optical = true;
        let generic = FakeSource {
            partition_readings: Some(Ok(vec![
                partition("C:\\", "NTFS", 500 << 30, 100 << 30),
                partition("E:\\", "", 10, 5),
                optical,
            ])),
            ..FakeSource::default()
        };

        let outcome = probe(&fake_set(generic, None, FakeSource::default()));
        assert_eq!(outcome.record.len(), 1);
        assert_eq!(outcome.record[0].mount, "C:\\");
        assert_eq!(outcome.record[0].kind, DriveKind::Unknown);
    }

    #[test]
    fn permission_error_on_one_partition_keeps_the_others() {
        let mut denied = partition("/restricted", "ext4", 0, 0);
        denied.usage = Err(SourceError::query_failed(
            SourceId::Generic,
            "partitions",
            "permission denied",
        ));
        let generic = FakeSource {
            partition_readings: Some(Ok(vec![
                partition("/", "ext4", 250 << 30, 80 << 30),
                denied,
                partition("/home", "ext4", 500 << 30, 200 << 30),
            ])),
            ..FakeSource::default()
        };

        let outcome = probe(&fake_set(generic, None, FakeSource::default()));
        let mounts: Vec<&str> = outcome.record.iter().map(|r| r.mount.as_str()).collect();
        assert_eq!(mounts, vec!["/", "/home"]);
        assert!(outcome
            .degradations
            .iter()
            .any(|err| !err.is_unavailable()));
    }

    #[test]
    fn enumeration_failure_yields_empty_sequence_not_panic() {
        let generic = FakeSource {
            partition_readings: Some(Err(SourceError::query_failed(
                SourceId::Generic,
                "partitions",
                "boom",
            ))),
            ..FakeSource::default()
        };
        let outcome = probe(&fake_set(generic, None, FakeSource::default()));
        assert!(outcome.record.is_empty());
    }

    #[test]
    fn media_descriptors_classify_as_specified() {
        assert_eq!(classify_disk(Some("SSD"), None), DriveKind::Ssd);
        assert_eq!(
            classify_disk(Some("Solid state drive"), Some("SCSI")),
            DriveKind::Ssd
        );
        assert_eq!(
            classify_disk(Some("Fixed hard disk media"), Some("NVMe")),
            DriveKind::NvmeSsd
        );
        assert_eq!(
            classify_disk(Some("Fixed hard disk media"), Some("IDE")),
            DriveKind::Hdd
        );
        assert_eq!(
            classify_disk(Some("Removable media"), None),
            DriveKind::Unknown
        );
        assert_eq!(classify_disk(None, Some("NVMe")), DriveKind::Unknown);
    }

    fn link(antecedent: &str, dependent: &str) -> AssociationReading {
        AssociationReading {
            antecedent: antecedent.to_string(),
            dependent: dependent.to_string(),
        }
    }

    #[test]
    fn three_way_join_maps_letters_to_disk_kinds() {
        let classes = vec![
            DiskClassReading {
                index: Some(0),
                media_type: Some("Fixed hard disk media".to_string()),
                interface_type: Some("NVMe".to_string()),
            },
            DiskClassReading {
                index: Some(1),
                media_type: Some("Fixed hard disk media".to_string()),
                interface_type: Some("IDE".to_string()),
            },
        ];
        let disk_links = vec![
            link(
                r#"\\HOST\root\cimv2:Win32_DiskDrive.DeviceID="\\.\PHYSICALDRIVE0""#,
                r#"\\HOST\root\cimv2:Win32_DiskPartition.DeviceID="Disk #0, Partition #1""#,
            ),
            link(
                r#"\\HOST\root\cimv2:Win32_DiskDrive.DeviceID="\\.\PHYSICALDRIVE1""#,
                r#"\\HOST\root\cimv2:Win32_DiskPartition.DeviceID="Disk #1, Partition #0""#,
            ),
        ];
        let logical_links = vec![
            link(
                r#"\\HOST\root\cimv2:Win32_DiskPartition.DeviceID="Disk #0, Partition #1""#,
                r#"\\HOST\root\cimv2:Win32_LogicalDisk.DeviceID="C:""#,
            ),
            link(
                r#"\\HOST\root\cimv2:Win32_DiskPartition.DeviceID="Disk #1, Partition #0""#,
                r#"\\HOST\root\cimv2:Win32_LogicalDisk.DeviceID="D:""#,
            ),
        ];

        let mut joined = join_drive_letters(&classes, &disk_links, &logical_links);
        joined.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            joined,
            vec![
                ("C:".to_string(), DriveKind::NvmeSsd),
                ("D:".to_string(), DriveKind::Hdd),
            ]
        );
    }

    #[test]
    fn enrichment_tags_matching_mounts_and_never_drops_records() {
        let generic = FakeSource {
            partition_readings: Some(Ok(vec![
                partition("C:\\", "NTFS", 1000 << 30, 500 << 30),
                partition("Z:\\", "NTFS", 500 << 30, 100 << 30),
            ])),
            ..FakeSource::default()
        };
        let vendor = FakeSource {
            source_id: Some(SourceId::Vendor),
            disk_class_readings: Some(Ok(vec![DiskClassReading {
                index: Some(0),
                media_type: Some("SSD".to_string()),
                interface_type: None,
            }])),
            disk_partition_link_readings: Some(Ok(vec![link(
                r#"...Win32_DiskDrive.DeviceID="\\.\PHYSICALDRIVE0""#,
                r#"...Win32_DiskPartition.DeviceID="Disk #0, Partition #0""#,
            )])),
            logical_disk_link_readings: Some(Ok(vec![link(
                r#"...Win32_DiskPartition.DeviceID="Disk #0, Partition #0""#,
                r#"...Win32_LogicalDisk.DeviceID="C:""#,
            )])),
            ..FakeSource::default()
        };

        let outcome = probe(&fake_set(generic, Some(vendor), FakeSource::default()));
        assert_eq!(outcome.record.len(), 2);
        assert_eq!(outcome.record[0].kind, DriveKind::Ssd);
        assert_eq!(outcome.record[1].kind, DriveKind::Unknown);
    }

    #[test]
    fn enrichment_failure_keeps_step_one_records() {
        let generic = FakeSource {
            partition_readings: Some(Ok(vec![partition("C:\\", "NTFS", 100 << 30, 10 << 30)])),
            ..FakeSource::default()
        };
        let vendor = FakeSource {
            source_id: Some(SourceId::Vendor),
            disk_class_readings: Some(Err(SourceError::query_failed(
                SourceId::Vendor,
                "disk classes",
                "provider gone",
            ))),
            ..FakeSource::default()
        };

        let outcome = probe(&fake_set(generic, Some(vendor), FakeSource::default()));
        assert_eq!(outcome.record.len(), 1);
        assert_eq!(outcome.record[0].kind, DriveKind::Unknown);
    }
}

//! Generic cross-platform source backed by sysinfo

use sysinfo::{Disks, System};

use super::{
    CpuReading, DataSource, MemoryReading, OsReading, PartitionReading, PartitionUsage, SourceError,
    SourceId, SourceResult,
};

/// Cross-platform counters (CPU, memory, disks, OS strings, hostname)
///
/// Counters are refreshed once at construction; the set is a snapshot for
/// a single collection run, not a live view.
pub struct GenericSource {
    system: System,
    disks: Disks,
}

impl GenericSource {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_all();
        system.refresh_memory();
        let disks = Disks::new_with_refreshed_list();
        GenericSource { system, disks }
    }
}

impl Default for GenericSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for GenericSource {
    fn id(&self) -> SourceId {
        SourceId::Generic
    }

    fn os(&self) -> SourceResult<OsReading> {
        Ok(OsReading {
            name: System::name(),
            version: System::os_version(),
            release: System::kernel_version(),
            architecture: None,
            edition: None,
        })
    }

    fn cpu(&self) -> SourceResult<CpuReading> {
        let cpus = self.system.cpus();
        if cpus.is_empty() {
            return Err(SourceError::query_failed(
                self.id(),
                "cpu",
                "no processors enumerated",
            ));
        }

        let first = &cpus[0];
        let brand = first.brand().trim();
        let frequency = first.frequency();

        Ok(CpuReading {
            model: (!brand.is_empty()).then(|| brand.to_string()),
            manufacturer: None,
            physical_cores: self.system.physical_core_count().map(|n| n as u32),
            logical_cores: Some(cpus.len() as u32),
            // sysinfo reports the current clock only; no max frequency here
            max_frequency_mhz: None,
            current_frequency_mhz: (frequency > 0).then_some(frequency as f64),
        })
    }

    fn memory(&self) -> SourceResult<MemoryReading> {
        Ok(MemoryReading {
            total_bytes: self.system.total_memory(),
            available_bytes: self.system.available_memory(),
        })
    }

    fn partitions(&self) -> SourceResult<Vec<PartitionReading>> {
        let readings = self
            .disks
            .list()
            .iter()
            .map(|disk| PartitionReading {
                mount: disk.mount_point().display().to_string(),
                device: disk.name().to_string_lossy().to_string(),
                fs_type: disk.file_system().to_string_lossy().to_string(),
                // sysinfo does not surface mount options; optical media does
                // not enumerate with a usable filesystem here
                optical: false,
                usage: Ok(PartitionUsage {
                    total_bytes: disk.total_space(),
                    free_bytes: disk.available_space(),
                }),
            })
            .collect();

        Ok(readings)
    }

    fn hostname(&self) -> SourceResult<String> {
        System::host_name()
            .ok_or_else(|| SourceError::query_failed(self.id(), "hostname", "lookup returned none"))
    }
}

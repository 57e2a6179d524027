//! Vendor management-instrumentation source
//!
//! On Windows this is WMI: typed row queries against the operating-system,
//! processor, video-controller, disk, partition-association and base-board
//! classes. The COM library and WMI connection are the scoped session for
//! one collection run: `connect()` acquires both before the probe batch and
//! drop releases them afterward, whatever the individual probes did.
//!
//! On every other platform the provider does not exist and `connect()`
//! reports `Unavailable`.

#[cfg(target_os = "windows")]
mod windows {
    use serde::Deserialize;
    use wmi::{COMLibrary, WMIConnection};

    use crate::sources::{
        AdapterReading, AssociationReading, BaseboardReading, CpuReading, DataSource,
        DiskClassReading, MemoryReading, OsReading, SourceError, SourceId, SourceResult,
    };

    #[derive(Deserialize, Debug)]
    #[serde(rename = "Win32_Processor")]
    #[serde(rename_all = "PascalCase")]
    struct Win32Processor {
        name: Option<String>,
        manufacturer: Option<String>,
        max_clock_speed: Option<u32>,
        number_of_cores: Option<u32>,
        number_of_logical_processors: Option<u32>,
    }

    #[derive(Deserialize, Debug)]
    #[serde(rename = "Win32_OperatingSystem")]
    #[serde(rename_all = "PascalCase")]
    struct Win32OperatingSystemEdition {
        caption: Option<String>,
    }

    #[derive(Deserialize, Debug)]
    #[serde(rename = "Win32_OperatingSystem")]
    #[serde(rename_all = "PascalCase")]
    struct Win32OperatingSystemMemory {
        /// Kilobytes
        total_visible_memory_size: Option<u64>,
        /// Kilobytes
        free_physical_memory: Option<u64>,
    }

    #[derive(Deserialize, Debug)]
    #[serde(rename = "Win32_VideoController")]
    #[serde(rename_all = "PascalCase")]
    struct Win32VideoController {
        name: Option<String>,
        adapter_compatibility: Option<String>,
        /// Signed on purpose: drivers wrap this 32-bit counter negative for
        /// adapters with >= 4 GB of VRAM
        #[serde(rename = "AdapterRAM")]
        adapter_ram: Option<i64>,
    }

    #[derive(Deserialize, Debug)]
    #[serde(rename = "Win32_DiskDrive")]
    #[serde(rename_all = "PascalCase")]
    struct Win32DiskDrive {
        index: Option<u32>,
        media_type: Option<String>,
        interface_type: Option<String>,
    }

    #[derive(Deserialize, Debug)]
    #[serde(rename = "Win32_DiskDriveToDiskPartition")]
    #[serde(rename_all = "PascalCase")]
    struct Win32DiskDriveToDiskPartition {
        antecedent: String,
        dependent: String,
    }

    #[derive(Deserialize, Debug)]
    #[serde(rename = "Win32_LogicalDiskToPartition")]
    #[serde(rename_all = "PascalCase")]
    struct Win32LogicalDiskToPartition {
        antecedent: String,
        dependent: String,
    }

    #[derive(Deserialize, Debug)]
    #[serde(rename = "Win32_BaseBoard")]
    #[serde(rename_all = "PascalCase")]
    struct Win32BaseBoard {
        manufacturer: Option<String>,
        product: Option<String>,
    }

    /// Live WMI session for one collection run
    pub struct VendorSource {
        connection: WMIConnection,
    }

    impl VendorSource {
        /// Acquire the COM library and WMI connection for this thread
        pub fn connect() -> SourceResult<VendorSource> {
            let com = COMLibrary::new().map_err(|err| {
                SourceError::query_failed(SourceId::Vendor, "session", err.to_string())
            })?;
            let connection = WMIConnection::new(com).map_err(|err| {
                SourceError::query_failed(SourceId::Vendor, "session", err.to_string())
            })?;
            Ok(VendorSource { connection })
        }

        fn rows<T>(&self, entity: &'static str) -> SourceResult<Vec<T>>
        where
            T: serde::de::DeserializeOwned,
        {
            self.connection.query::<T>().map_err(|err| {
                SourceError::query_failed(SourceId::Vendor, entity, err.to_string())
            })
        }

        fn first_row<T>(&self, entity: &'static str) -> SourceResult<T>
        where
            T: serde::de::DeserializeOwned,
        {
            self.rows::<T>(entity)?.into_iter().next().ok_or_else(|| {
                SourceError::query_failed(SourceId::Vendor, entity, "no rows returned")
            })
        }
    }

    impl DataSource for VendorSource {
        fn id(&self) -> SourceId {
            SourceId::Vendor
        }

        fn os(&self) -> SourceResult<OsReading> {
            let row: Win32OperatingSystemEdition = self.first_row("os")?;
            Ok(OsReading {
                edition: row.caption,
                ..OsReading::default()
            })
        }

        fn cpu(&self) -> SourceResult<CpuReading> {
            let row: Win32Processor = self.first_row("cpu")?;
            Ok(CpuReading {
                model: row.name,
                manufacturer: row.manufacturer,
                physical_cores: row.number_of_cores,
                logical_cores: row.number_of_logical_processors,
                max_frequency_mhz: row.max_clock_speed.map(f64::from),
                current_frequency_mhz: None,
            })
        }

        fn memory(&self) -> SourceResult<MemoryReading> {
            let row: Win32OperatingSystemMemory = self.first_row("memory")?;
            // WMI reports visible/free memory in kilobytes
            Ok(MemoryReading {
                total_bytes: row.total_visible_memory_size.unwrap_or(0) * 1024,
                available_bytes: row.free_physical_memory.unwrap_or(0) * 1024,
            })
        }

        fn video_adapters(&self) -> SourceResult<Vec<AdapterReading>> {
            let rows: Vec<Win32VideoController> = self.rows("video adapters")?;
            Ok(rows
                .into_iter()
                .map(|row| AdapterReading {
                    name: row.name,
                    vendor: row.adapter_compatibility,
                    vram: row.adapter_ram,
                })
                .collect())
        }

        fn disk_classes(&self) -> SourceResult<Vec<DiskClassReading>> {
            let rows: Vec<Win32DiskDrive> = self.rows("disk classes")?;
            Ok(rows
                .into_iter()
                .map(|row| DiskClassReading {
                    index: row.index,
                    media_type: row.media_type,
                    interface_type: row.interface_type,
                })
                .collect())
        }

        fn disk_partition_links(&self) -> SourceResult<Vec<AssociationReading>> {
            let rows: Vec<Win32DiskDriveToDiskPartition> = self.rows("disk-partition links")?;
            Ok(rows
                .into_iter()
                .map(|row| AssociationReading {
                    antecedent: row.antecedent,
                    dependent: row.dependent,
                })
                .collect())
        }

        fn logical_disk_links(&self) -> SourceResult<Vec<AssociationReading>> {
            let rows: Vec<Win32LogicalDiskToPartition> = self.rows("logical-disk links")?;
            Ok(rows
                .into_iter()
                .map(|row| AssociationReading {
                    antecedent: row.antecedent,
                    dependent: row.dependent,
                })
                .collect())
        }

        fn baseboard(&self) -> SourceResult<BaseboardReading> {
            let row: Win32BaseBoard = self.first_row("baseboard")?;
            Ok(BaseboardReading {
                manufacturer: row.manufacturer,
                product: row.product,
            })
        }
    }
}

#[cfg(target_os = "windows")]
pub use self::windows::VendorSource;

#[cfg(not(target_os = "windows"))]
mod stub {
    use crate::sources::{DataSource, SourceError, SourceId, SourceResult};

    /// Placeholder on platforms without a management-instrumentation provider
    pub struct VendorSource;

    impl VendorSource {
        pub fn connect() -> SourceResult<VendorSource> {
            Err(SourceError::unavailable(SourceId::Vendor, "session"))
        }
    }

    impl DataSource for VendorSource {
        fn id(&self) -> SourceId {
            SourceId::Vendor
        }
    }
}

#[cfg(not(target_os = "windows"))]
pub use self::stub::VendorSource;

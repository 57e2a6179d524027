//! Data-source abstraction for the inventory probes
//!
//! Every probe reads through the [`DataSource`] trait instead of touching
//! platform APIs directly. Three variants exist:
//! - `GenericSource`: cross-platform counters via sysinfo
//! - `VendorSource`: Windows management instrumentation (WMI tabular queries)
//! - `BasicOsSource`: bare std primitives, last in every fallback chain
//!
//! A source call either yields a reading or a [`SourceError`]; probes treat
//! both `Unavailable` and `QueryFailed` as "no data from this source".

pub mod basic;
pub mod generic;
pub mod vendor;

use thiserror::Error;

pub use basic::BasicOsSource;
pub use generic::GenericSource;
pub use vendor::VendorSource;

/// Which source variant produced a reading or an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceId {
    Generic,
    Vendor,
    BasicOs,
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceId::Generic => write!(f, "generic metrics"),
            SourceId::Vendor => write!(f, "vendor instrumentation"),
            SourceId::BasicOs => write!(f, "basic OS primitive"),
        }
    }
}

/// Why a source produced no data
///
/// `Unavailable` is known before a call is made (provider absent on this
/// platform); `QueryFailed` is a call-time failure. Probes swallow both,
/// but the distinction survives into logs and tests.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("{entity}: {source_id} not available")]
    Unavailable {
        source_id: SourceId,
        entity: &'static str,
    },
    #[error("{entity}: {source_id} query failed: {reason}")]
    QueryFailed {
        source_id: SourceId,
        entity: &'static str,
        reason: String,
    },
}

impl SourceError {
    pub fn unavailable(source_id: SourceId, entity: &'static str) -> Self {
        SourceError::Unavailable { source_id, entity }
    }

    pub fn query_failed(
        source_id: SourceId,
        entity: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        SourceError::QueryFailed {
            source_id,
            entity,
            reason: reason.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, SourceError::Unavailable { .. })
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Raw OS reading; fields a source cannot supply stay `None`
#[derive(Debug, Clone, Default)]
pub struct OsReading {
    pub name: Option<String>,
    pub version: Option<String>,
    pub release: Option<String>,
    pub architecture: Option<String>,
    pub edition: Option<String>,
}

/// Raw CPU reading
#[derive(Debug, Clone, Default)]
pub struct CpuReading {
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub physical_cores: Option<u32>,
    pub logical_cores: Option<u32>,
    /// Max/boost clock in MHz
    pub max_frequency_mhz: Option<f64>,
    /// Current clock in MHz
    pub current_frequency_mhz: Option<f64>,
}

/// Raw memory reading, always in bytes (sources normalize their own units)
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryReading {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// Usage totals for one partition
#[derive(Debug, Clone, Copy)]
pub struct PartitionUsage {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

/// One enumerated partition
///
/// `usage` is a per-partition result: an access error on one mount must not
/// take down the enumeration of the others.
#[derive(Debug, Clone)]
pub struct PartitionReading {
    pub mount: String,
    pub device: String,
    pub fs_type: String,
    /// Mount options marked this as optical media
    pub optical: bool,
    pub usage: SourceResult<PartitionUsage>,
}

/// One enumerated display adapter
///
/// `vram` is kept signed: some drivers report the 32-bit counter wrapped
/// negative for adapters with 4 GB or more.
#[derive(Debug, Clone, Default)]
pub struct AdapterReading {
    pub name: Option<String>,
    pub vendor: Option<String>,
    pub vram: Option<i64>,
}

/// One physical disk as described by vendor instrumentation
#[derive(Debug, Clone, Default)]
pub struct DiskClassReading {
    pub index: Option<u32>,
    pub media_type: Option<String>,
    pub interface_type: Option<String>,
}

/// One association row (antecedent/dependent object paths) from vendor
/// instrumentation; used for the disk -> partition -> drive-letter join
#[derive(Debug, Clone)]
pub struct AssociationReading {
    pub antecedent: String,
    pub dependent: String,
}

/// Raw baseboard reading
#[derive(Debug, Clone, Default)]
pub struct BaseboardReading {
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

/// A queryable data provider
///
/// Default method bodies report `Unavailable`, so each variant implements
/// only the entities it actually serves.
pub trait DataSource {
    fn id(&self) -> SourceId;

    fn os(&self) -> SourceResult<OsReading> {
        Err(SourceError::unavailable(self.id(), "os"))
    }

    fn cpu(&self) -> SourceResult<CpuReading> {
        Err(SourceError::unavailable(self.id(), "cpu"))
    }

    fn memory(&self) -> SourceResult<MemoryReading> {
        Err(SourceError::unavailable(self.id(), "memory"))
    }

    fn partitions(&self) -> SourceResult<Vec<PartitionReading>> {
        Err(SourceError::unavailable(self.id(), "partitions"))
    }

    fn video_adapters(&self) -> SourceResult<Vec<AdapterReading>> {
        Err(SourceError::unavailable(self.id(), "video adapters"))
    }

    fn disk_classes(&self) -> SourceResult<Vec<DiskClassReading>> {
        Err(SourceError::unavailable(self.id(), "disk classes"))
    }

    fn disk_partition_links(&self) -> SourceResult<Vec<AssociationReading>> {
        Err(SourceError::unavailable(self.id(), "disk-partition links"))
    }

    fn logical_disk_links(&self) -> SourceResult<Vec<AssociationReading>> {
        Err(SourceError::unavailable(self.id(), "logical-disk links"))
    }

    fn baseboard(&self) -> SourceResult<BaseboardReading> {
        Err(SourceError::unavailable(self.id(), "baseboard"))
    }

    fn hostname(&self) -> SourceResult<String> {
        Err(SourceError::unavailable(self.id(), "hostname"))
    }

    fn logical_cpus(&self) -> SourceResult<u32> {
        Err(SourceError::unavailable(self.id(), "logical cpus"))
    }
}

/// Availability summary, detected once per collection run
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub generic_metrics: bool,
    pub vendor_instrumentation: bool,
    pub basic_primitives: bool,
}

/// The immutable set of sources one collection run reads from
///
/// Built once at the start of a run; the vendor slot doubles as the
/// capability flag for platform-specific enrichment. The vendor session
/// (COM/WMI on Windows) lives exactly as long as this set and is released
/// on drop no matter how the probes fared.
pub struct SourceSet {
    generic: Box<dyn DataSource>,
    vendor: Option<Box<dyn DataSource>>,
    basic: Box<dyn DataSource>,
}

impl SourceSet {
    /// Probe source availability and build the set for one collection run
    pub fn detect() -> Self {
        let vendor: Option<Box<dyn DataSource>> = match VendorSource::connect() {
            Ok(source) => Some(Box::new(source)),
            Err(err) => {
                if err.is_unavailable() {
                    tracing::debug!("vendor instrumentation not available: {err}");
                } else {
                    tracing::warn!("vendor instrumentation connection failed: {err}");
                }
                None
            }
        };

        SourceSet {
            generic: Box::new(GenericSource::new()),
            vendor,
            basic: Box::new(BasicOsSource),
        }
    }

    pub fn generic(&self) -> &dyn DataSource {
        self.generic.as_ref()
    }

    pub fn vendor(&self) -> Option<&dyn DataSource> {
        self.vendor.as_deref()
    }

    pub fn basic(&self) -> &dyn DataSource {
        self.basic.as_ref()
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            generic_metrics: true,
            vendor_instrumentation: self.vendor.is_some(),
            basic_primitives: true,
        }
    }
}

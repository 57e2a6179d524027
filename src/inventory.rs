//! Inventory record types
//!
//! One immutable snapshot per collection run. The collector is the only
//! writer; everything here is plain data once it has been handed out.

use serde::{Deserialize, Serialize};

/// Complete system inventory for one collection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInventory {
    /// Operating system
    pub os: OsRecord,
    /// CPU
    pub cpu: CpuRecord,
    /// RAM totals
    pub ram: RamRecord,
    /// Display adapters, enumeration order (never empty; sentinel on failure)
    pub gpus: Vec<GpuRecord>,
    /// Mounted partitions, enumeration order
    pub storage: Vec<StorageRecord>,
    /// Motherboard
    pub board: BoardRecord,
    /// Host identity
    pub identity: IdentityRecord,
}

/// Operating system information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsRecord {
    /// Platform name (e.g., "Windows", "Ubuntu")
    pub name: String,
    /// Version string as reported by the platform
    pub version: String,
    /// Release/codename string
    pub release: String,
    /// Machine architecture
    pub architecture: String,
    /// Vendor edition string; empty when not available
    pub edition: String,
    /// Build number: third dot-separated component of `version`, when present
    pub build: Option<String>,
}

/// CPU information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuRecord {
    /// Model name (e.g., "AMD Ryzen 7 5800X"); "Unknown" when no source reported one
    pub model: String,
    /// Physical core count (0 = undetermined)
    pub physical_cores: u32,
    /// Logical core count (0 = undetermined)
    pub logical_cores: u32,
    /// Clock rate, unit-ambiguous (MHz or GHz depending on source); normalized at format time
    pub frequency: Option<f64>,
    /// Manufacturer string; empty when not available
    pub manufacturer: String,
}

/// RAM totals in bytes; 0 means "undetermined", not "zero installed"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamRecord {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// A single display adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuRecord {
    /// Adapter name
    pub name: String,
    /// Adapter vendor; may be empty
    pub vendor: String,
    /// Dedicated VRAM in bytes; 0 = unknown/unreported
    pub vram_bytes: u64,
}

impl GpuRecord {
    /// Placeholder record used when no real adapter could be enumerated
    pub fn unknown() -> Self {
        GpuRecord {
            name: "Unknown GPU".to_string(),
            vendor: String::new(),
            vram_bytes: 0,
        }
    }
}

/// Physical drive technology behind a partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveKind {
    Ssd,
    NvmeSsd,
    Hdd,
    Unknown,
}

impl std::fmt::Display for DriveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriveKind::Ssd => write!(f, "SSD"),
            DriveKind::NvmeSsd => write!(f, "NVMe SSD"),
            DriveKind::Hdd => write!(f, "HDD"),
            DriveKind::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A mounted partition with usage totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageRecord {
    /// Mount point (e.g., "/", "C:\\")
    pub mount: String,
    /// Device identifier
    pub device: String,
    /// Filesystem type
    pub fs_type: String,
    pub total_bytes: u64,
    pub free_bytes: u64,
    /// Drive technology, filled by vendor enrichment when available
    pub kind: DriveKind,
}

/// Motherboard information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardRecord {
    pub manufacturer: String,
    pub model: String,
}

impl Default for BoardRecord {
    fn default() -> Self {
        BoardRecord {
            manufacturer: "Unknown".to_string(),
            model: "Unknown".to_string(),
        }
    }
}

impl BoardRecord {
    /// True when neither field carries real data (report omits the section)
    pub fn is_unknown(&self) -> bool {
        self.manufacturer == "Unknown" && self.model == "Unknown"
    }
}

/// Host identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Hostname; empty when the lookup failed
    pub hostname: String,
    /// Machine architecture string
    pub architecture: String,
}

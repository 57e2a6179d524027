//! Bare std fallbacks, last in every chain

use super::{DataSource, OsReading, SourceError, SourceId, SourceResult};

/// Primitive readings straight from std; always present, never rich
pub struct BasicOsSource;

impl DataSource for BasicOsSource {
    fn id(&self) -> SourceId {
        SourceId::BasicOs
    }

    fn os(&self) -> SourceResult<OsReading> {
        Ok(OsReading {
            architecture: Some(std::env::consts::ARCH.to_string()),
            ..OsReading::default()
        })
    }

    fn logical_cpus(&self) -> SourceResult<u32> {
        std::thread::available_parallelism()
            .map(|n| n.get() as u32)
            .map_err(|err| SourceError::query_failed(self.id(), "logical cpus", err.to_string()))
    }
}

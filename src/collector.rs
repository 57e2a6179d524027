//! Inventory collection pass
//!
//! One synchronous, sequential run over all probes. There is no fatal
//! error path: every probe degrades to defaults, so the worst outcome is
//! an inventory made entirely of sentinels.

use crate::inventory::SystemInventory;
use crate::probes::{self, ProbeOutcome};
use crate::sources::SourceSet;

/// Run every probe against the given sources and assemble the snapshot
pub fn collect(sources: &SourceSet) -> SystemInventory {
    let os = log_degradations("os", probes::os::probe(sources));
    let cpu = log_degradations("cpu", probes::cpu::probe(sources));
    let ram = log_degradations("ram", probes::ram::probe(sources));
    let gpus = log_degradations("gpu", probes::gpu::probe(sources));
    let storage = log_degradations("storage", probes::storage::probe(sources));
    let board = log_degradations("board", probes::board::probe(sources));
    let identity = log_degradations("identity", probes::board::probe_identity(sources));

    SystemInventory {
        os,
        cpu,
        ram,
        gpus,
        storage,
        board,
        identity,
    }
}

/// One-shot collection as a blocking task; the shell awaits the handle and
/// keeps its own thread free. Source detection (including the vendor
/// session) happens on the task thread and the session is released with
/// the source set when the run ends, on every exit path.
pub fn spawn_collection() -> tokio::task::JoinHandle<SystemInventory> {
    tokio::task::spawn_blocking(|| {
        let sources = SourceSet::detect();
        collect(&sources)
    })
}

fn log_degradations<T>(probe: &'static str, outcome: ProbeOutcome<T>) -> T {
    for err in &outcome.degradations {
        if err.is_unavailable() {
            tracing::debug!(probe, source = %err, "degraded");
        } else {
            tracing::warn!(probe, source = %err, "degraded");
        }
    }
    outcome.record
}

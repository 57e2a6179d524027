//! Report rendering
//!
//! Pure formatting over a collected inventory: fixed section order, unit
//! conversion, conditional lines. Rendering the same inventory twice gives
//! byte-identical output; the UI/clipboard shell shows this text verbatim.

use crate::inventory::{DriveKind, SystemInventory};

const GIB: f64 = 1_073_741_824.0;
const MIB: f64 = 1_048_576.0;

/// Render the fixed-order text report
pub fn render(inventory: &SystemInventory) -> String {
    let mut lines: Vec<String> = Vec::new();

    // OS
    let os = &inventory.os;
    let mut os_line = os.name.clone();
    if !os.edition.is_empty() {
        os_line.push(' ');
        os_line.push_str(&os.edition);
    }
    if !os.release.is_empty() {
        os_line.push(' ');
        os_line.push_str(&os.release);
    }
    if let Some(build) = &os.build {
        os_line.push_str(&format!(" (Build {build})"));
    }
    lines.push(format!("OS: {os_line}"));
    lines.push(format!("Architecture: {}", os.architecture));
    lines.push(String::new());

    // CPU
    let cpu = &inventory.cpu;
    lines.push(format!("CPU: {}", cpu.model));
    let mut cores_line = format!(
        "Cores: {} / Threads: {}",
        cpu.physical_cores, cpu.logical_cores
    );
    if let Some(raw) = cpu.frequency {
        cores_line.push_str(&format!(" @ {:.2} GHz", normalize_ghz(raw)));
    }
    lines.push(cores_line);
    lines.push(String::new());

    // RAM
    let ram = &inventory.ram;
    lines.push(format!("RAM: {:.0} GB", ram.total_bytes as f64 / GIB));
    if ram.available_bytes > 0 {
        lines.push(format!(
            "     ({:.1} GB available)",
            ram.available_bytes as f64 / GIB
        ));
    }
    lines.push(String::new());

    // GPUs
    for gpu in &inventory.gpus {
        let mut line = format!("GPU: {}", gpu.name);
        if gpu.vram_bytes > 0 {
            let vram_gb = gpu.vram_bytes as f64 / GIB;
            if vram_gb >= 1.0 {
                line.push_str(&format!(" ({vram_gb:.0} GB VRAM)"));
            } else {
                line.push_str(&format!(" ({:.0} MB VRAM)", gpu.vram_bytes as f64 / MIB));
            }
        }
        lines.push(line);
    }
    lines.push(String::new());

    // Storage
    lines.push("Storage:".to_string());
    for drive in &inventory.storage {
        let total = format_total(drive.total_bytes);
        let free = format_free(drive.free_bytes);
        if drive.kind == DriveKind::Unknown {
            lines.push(format!("  - {} {} ({} free)", drive.mount, total, free));
        } else {
            lines.push(format!(
                "  - {} {} – {} ({} free)",
                drive.mount, drive.kind, total, free
            ));
        }
    }
    lines.push(String::new());

    // Motherboard, only when something real was found
    let board = &inventory.board;
    if !board.is_unknown() {
        let board_line = format!("{} {}", board.manufacturer, board.model);
        lines.push(format!("Motherboard: {}", board_line.trim()));
    }

    lines.push(format!("Hostname: {}", inventory.identity.hostname));

    lines.join("\n")
}

/// Capacity scale rule: whole GB below 1000 GB, otherwise TB to one decimal
fn format_total(bytes: u64) -> String {
    let gb = bytes as f64 / GIB;
    if gb >= 1000.0 {
        format!("{:.1} TB", gb / 1024.0)
    } else {
        format!("{gb:.0} GB")
    }
}

/// Free space follows the same threshold independently, with TB shown to
/// two decimals
fn format_free(bytes: u64) -> String {
    let gb = bytes as f64 / GIB;
    if gb >= 1000.0 {
        format!("{:.2} TB", gb / 1024.0)
    } else {
        format!("{gb:.0} GB")
    }
}

/// Best-effort clock normalization for unit-ambiguous readings: values over
/// 1000 are taken as MHz and scaled down; a result still over 100 is
/// treated as double-reported MHz and scaled again. A genuine reading above
/// 100 GHz would be misread here.
pub(crate) fn normalize_ghz(raw: f64) -> f64 {
    let mut ghz = if raw > 1000.0 { raw / 1000.0 } else { raw };
    if ghz > 100.0 {
        ghz /= 1000.0;
    }
    ghz
}

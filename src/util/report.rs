use crate::engine::walk::TreeUsage;
use crate::models::disk::DiskSnapshot;
use crate::util::human::{fmt_bytes, fmt_gb, fmt_pct};
use serde_json::{json, Value};
use std::path::Path;

/// Human-readable status report for `--status`.
pub fn generate(dir: &Path, usage: &TreeUsage, disk: &DiskSnapshot) -> String {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut out = String::new();

    out.push_str("═══════════════════════════════════════════════\n");
    out.push_str(&format!("  spaceeater Status — {}\n", now));
    out.push_str("═══════════════════════════════════════════════\n\n");

    out.push_str("── Eaten ──────────────────────────────────────\n");
    out.push_str(&format!("  {:<26}{}\n", "Directory:", dir.display()));
    out.push_str(&format!("  {:<26}{} ({} subdirector{})\n",
        "Files:", usage.files, usage.dirs, if usage.dirs == 1 { "y" } else { "ies" }));
    out.push_str(&format!("  {:<26}{}\n", "Size:", fmt_gb(usage.bytes)));
    if usage.skipped > 0 {
        out.push_str(&format!("  {:<26}{} (not counted)\n", "Unreadable entries:", usage.skipped));
    }
    out.push('\n');

    out.push_str("── Device Disk Space ──────────────────────────\n");
    out.push_str(&format!("  {:<26}{}\n", "Total:", fmt_gb(disk.total_bytes)));
    out.push_str(&format!("  {:<26}{} ({})\n", "Used:", fmt_gb(disk.used_bytes), fmt_pct(disk.use_pct())));
    out.push('\n');

    out.push_str("── Device Available Capacity ──────────────────\n");
    out.push_str(&format!("  {:<26}{}\n", "For Usage:", fmt_gb(disk.available_bytes)));
    out.push_str(&format!("  {:<26}{}\n", "For Important Usage:", fmt_gb(disk.available_for_important_usage)));
    out.push_str(&format!("  {:<26}{}\n", "For Opportunistic Usage:", fmt_gb(disk.available_for_opportunistic_usage)));

    out
}

/// One-shot snapshot for `--json`.
pub fn json_snapshot(dir: &Path, usage: &TreeUsage, disk: &DiskSnapshot) -> Value {
    json!({
        "spaceeater_version": env!("CARGO_PKG_VERSION"),
        "timestamp":          chrono::Local::now().to_rfc3339(),
        "eaten": {
            "directory": dir.to_string_lossy(),
            "bytes":     usage.bytes,
            "bytes_hr":  fmt_bytes(usage.bytes),
            "files":     usage.files,
            "dirs":      usage.dirs,
            "skipped":   usage.skipped,
        },
        "disk": disk,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (TreeUsage, DiskSnapshot) {
        let usage = TreeUsage { bytes: 1_500_000_000, files: 15, dirs: 1, skipped: 0 };
        let disk = DiskSnapshot {
            total_bytes:                       500_000_000_000,
            used_bytes:                        400_000_000_000,
            available_bytes:                   100_000_000_000,
            available_for_important_usage:     100_000_000_000,
            available_for_opportunistic_usage: 75_000_000_000,
        };
        (usage, disk)
    }

    #[test]
    fn report_lists_every_figure() {
        let (usage, disk) = sample();
        let text = generate(Path::new("/data/filler"), &usage, &disk);
        assert!(text.contains("/data/filler"));
        assert!(text.contains("15 (1 subdirectory)"));
        assert!(text.contains("1.500 GB"));
        assert!(text.contains("500.000 GB"));
        assert!(text.contains("400.000 GB (80%)"));
        assert!(text.contains("75.000 GB"));
        assert!(!text.contains("Unreadable"));
    }

    #[test]
    fn report_mentions_skipped_entries() {
        let (mut usage, disk) = sample();
        usage.skipped = 2;
        assert!(generate(Path::new("/x"), &usage, &disk).contains("Unreadable entries:"));
    }

    #[test]
    fn json_has_raw_numbers() {
        let (usage, disk) = sample();
        let v = json_snapshot(Path::new("/data/filler"), &usage, &disk);
        assert_eq!(v["eaten"]["bytes"], 1_500_000_000u64);
        assert_eq!(v["eaten"]["directory"], "/data/filler");
        assert_eq!(v["disk"]["available_for_opportunistic_usage"], 75_000_000_000u64);
        assert_eq!(v["disk"]["used_bytes"], 400_000_000_000u64);
    }
}

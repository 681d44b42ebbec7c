use rustdisk::{DiskUsage, MountEntry};

use crate::util::human::{fmt_bytes, fmt_pct};

/// One filtered mount paired with its usage, or `None` if statvfs failed.
pub struct Row {
    pub mount: MountEntry,
    pub usage: Option<DiskUsage>,
}

/// Render the usage table printed by the default mode.
pub fn generate(rows: &[Row], decimals: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<24} {:<24} {:>12} {:>12} {:>12} {:>8}\n",
        "Device", "Mount", "Total", "Free", "Used", "Use%"
    ));
    out.push_str(&format!("{}\n", "─".repeat(97)));

    for row in rows {
        let (total, free, used, pct) = match &row.usage {
            Some(u) => (
                fmt_bytes(u.total, decimals),
                fmt_bytes(u.free, decimals),
                fmt_bytes(u.used, decimals),
                fmt_pct(u.use_pct(), decimals),
            ),
            None => ("-".into(), "-".into(), "-".into(), "-".into()),
        };
        out.push_str(&format!(
            "{:<24} {:<24} {:>12} {:>12} {:>12} {:>8}\n",
            row.mount.device, row.mount.mount_point, total, free, used, pct
        ));
    }

    if rows.is_empty() {
        out.push_str("(no matching mounts)\n");
    }
    out
}

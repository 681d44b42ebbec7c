use std::path::Path;

use crate::error::MountError;
use crate::models::mount::MountEntry;

#[cfg(not(target_os = "linux"))]
compile_error!("rustdisk reads the live mount table from /proc and only builds on Linux");

/// Live mount table of the calling process's mount namespace.
pub const MOUNT_TABLE: &str = "/proc/self/mounts";

/// Read the live mount table, preserving kernel order.
pub fn list_mounts() -> Result<Vec<MountEntry>, MountError> {
    list_mounts_from(Path::new(MOUNT_TABLE))
}

/// Read a mount table in /proc/mounts format from `path`.
pub fn list_mounts_from(path: &Path) -> Result<Vec<MountEntry>, MountError> {
    let content = std::fs::read(path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "cannot read mount table");
        MountError::from(e)
    })?;
    let mounts = parse_mounts(&content);
    tracing::debug!(count = mounts.len(), "mount table read");
    Ok(mounts)
}

/// Parse "device mountpoint fstype options dump pass" lines.
///
/// Lines with fewer than two fields are skipped, as are entries whose decoded
/// device or mount point is empty, not UTF-8 or contains a NUL.
pub fn parse_mounts(content: &[u8]) -> Vec<MountEntry> {
    let mut v = Vec::new();
    for line in content.split(|&b| b == b'\n') {
        let mut fields = line
            .split(|b| b.is_ascii_whitespace())
            .filter(|f| !f.is_empty());
        let (Some(device), Some(mount)) = (fields.next(), fields.next()) else {
            continue;
        };
        let fs_type = fields.next().map(unescape).unwrap_or_default();

        match (decode_field(device), decode_field(mount)) {
            (Some(device), Some(mount_point)) => v.push(MountEntry {
                device,
                mount_point,
                fs_type: String::from_utf8(fs_type).unwrap_or_default(),
            }),
            _ => tracing::warn!(
                line = %String::from_utf8_lossy(line),
                "skipping mount entry with unusable text"
            ),
        }
    }
    v
}

fn decode_field(raw: &[u8]) -> Option<String> {
    let bytes = unescape(raw);
    if bytes.is_empty() || bytes.contains(&0) {
        return None;
    }
    String::from_utf8(bytes).ok()
}

/// Undo the kernel's `\ooo` octal escaping of space, tab, newline and backslash.
fn unescape(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if let Some(&[a, b, c]) = raw.get(i + 1..i + 4).filter(|d| raw[i] == b'\\' && is_octal_triplet(d)) {
            out.push((a - b'0') * 64 + (b - b'0') * 8 + (c - b'0'));
            i += 4;
        } else {
            out.push(raw[i]);
            i += 1;
        }
    }
    out
}

fn is_octal_triplet(d: &[u8]) -> bool {
    // first digit capped at 3 so the value fits in a byte
    matches!(d, [b'0'..=b'3', b'0'..=b'7', b'0'..=b'7'])
}

use serde::Serialize;

/// Capacity of the filesystem holding one path.
///
/// The field order and widths are the boundary layout handed out by
/// `get_disk_usage`: three native-endian `u64`s, total/free/used.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiskUsage {
    pub total: u64,
    pub free:  u64,
    pub used:  u64,
}

impl DiskUsage {
    /// Build from raw block counts. `None` if a byte count overflows `u64`.
    pub fn from_blocks(blocks: u64, blocks_free: u64, fragment_size: u64) -> Option<Self> {
        let total = blocks.checked_mul(fragment_size)?;
        let free  = blocks_free.checked_mul(fragment_size)?;
        // bfree can exceed blocks on some network filesystems
        let free  = free.min(total);
        Some(Self { total, free, used: total - free })
    }

    pub fn use_pct(&self) -> f64 {
        if self.total == 0 { return 0.0; }
        self.used as f64 / self.total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_counts_use_integer_math() {
        // 16 TiB volume in 4 KiB fragments; f64 would lose the low bits here
        let u = DiskUsage::from_blocks(4_294_967_297, 1_000_000_001, 4096).unwrap();
        assert_eq!(u.total, 4_294_967_297 * 4096);
        assert_eq!(u.free,  1_000_000_001 * 4096);
        assert_eq!(u.used,  u.total - u.free);
    }

    #[test]
    fn overflow_is_rejected() {
        assert!(DiskUsage::from_blocks(u64::MAX, 0, 2).is_none());
        assert!(DiskUsage::from_blocks(1, u64::MAX, 2).is_none());
    }

    #[test]
    fn free_is_clamped_to_total() {
        let u = DiskUsage::from_blocks(10, 12, 512).unwrap();
        assert_eq!(u.free, u.total);
        assert_eq!(u.used, 0);
    }

    #[test]
    fn use_pct_of_empty_volume_is_zero() {
        let u = DiskUsage::from_blocks(0, 0, 4096).unwrap();
        assert_eq!(u.use_pct(), 0.0);

        let half = DiskUsage::from_blocks(100, 50, 1024).unwrap();
        assert!((half.use_pct() - 50.0).abs() < f64::EPSILON);
    }
}

//! Byte layout of the blocks handed across the C boundary.
//!
//! Foreign callers decode results with these offsets alone; the assertions
//! below pin them to the `#[repr(C)]` types the library actually allocates.
//! Changing any value here is a breaking ABI change.

use std::mem::{offset_of, size_of};

use crate::ffi::{RawMountEntry, RawMountList};
use crate::models::usage::DiskUsage;

/// Bumped whenever an offset, stride or field order changes.
pub const LAYOUT_VERSION: u32 = 1;

pub const DISK_USAGE_SIZE: usize   = 24;
pub const DISK_USAGE_TOTAL: usize  = 0;
pub const DISK_USAGE_FREE: usize   = 8;
pub const DISK_USAGE_USED: usize   = 16;

pub const MOUNT_LIST_SIZE: usize    = 16;
pub const MOUNT_LIST_ENTRIES: usize = 0;
pub const MOUNT_LIST_COUNT: usize   = 8;

pub const MOUNT_ENTRY_STRIDE: usize      = 16;
pub const MOUNT_ENTRY_DEVICE: usize      = 0;
pub const MOUNT_ENTRY_MOUNT_POINT: usize = 8;

const _: () = {
    assert!(size_of::<DiskUsage>() == DISK_USAGE_SIZE);
    assert!(offset_of!(DiskUsage, total) == DISK_USAGE_TOTAL);
    assert!(offset_of!(DiskUsage, free) == DISK_USAGE_FREE);
    assert!(offset_of!(DiskUsage, used) == DISK_USAGE_USED);
};

#[cfg(target_pointer_width = "64")]
const _: () = {
    assert!(size_of::<RawMountList>() == MOUNT_LIST_SIZE);
    assert!(offset_of!(RawMountList, entries) == MOUNT_LIST_ENTRIES);
    assert!(offset_of!(RawMountList, count) == MOUNT_LIST_COUNT);

    assert!(size_of::<RawMountEntry>() == MOUNT_ENTRY_STRIDE);
    assert!(offset_of!(RawMountEntry, device) == MOUNT_ENTRY_DEVICE);
    assert!(offset_of!(RawMountEntry, mount_point) == MOUNT_ENTRY_MOUNT_POINT);
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{free_disk_usage, get_disk_usage};
    use std::ffi::CString;

    /// Read the block the way a foreign caller with only a byte view would.
    #[test]
    fn raw_offsets_decode_the_same_values() {
        let root = CString::new("/").unwrap();
        let p = unsafe { get_disk_usage(root.as_ptr()) };
        assert!(!p.is_null());

        let typed = unsafe { *p };
        let base = p.cast::<u8>();
        let at = |off: usize| unsafe { base.add(off).cast::<u64>().read_unaligned() };
        assert_eq!(at(DISK_USAGE_TOTAL), typed.total);
        assert_eq!(at(DISK_USAGE_FREE), typed.free);
        assert_eq!(at(DISK_USAGE_USED), typed.used);

        unsafe { free_disk_usage(p) };
    }
}

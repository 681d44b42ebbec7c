use std::ffi::{CStr, CString};
use std::path::Path;
use std::thread;

use rustdisk::client::{self, DiskUsageGuard, MountsGuard};
use rustdisk::collectors::mounts::list_mounts;
use rustdisk::ffi::{
    free_disk_usage, free_mounts, get_disk_usage, get_mounts, rustdisk_last_error,
    rustdisk_last_error_message,
};

const CYCLES: usize = 10_000;

#[test]
fn disk_usage_block_holds_total_free_used() {
    let root = CString::new("/").unwrap();
    let p = unsafe { get_disk_usage(root.as_ptr()) };
    assert!(!p.is_null());

    let u = unsafe { *p };
    assert!(u.free <= u.total);
    assert_eq!(u.used, u.total - u.free);
    unsafe { free_disk_usage(p) };
}

#[test]
fn missing_path_returns_null_with_enoent() {
    let missing = CString::new("/rustdisk/integration/missing").unwrap();
    assert!(unsafe { get_disk_usage(missing.as_ptr()) }.is_null());
    assert_eq!(rustdisk_last_error(), libc::ENOENT);

    let msg = unsafe { CStr::from_ptr(rustdisk_last_error_message()) };
    assert!(!msg.to_bytes().is_empty());
}

#[test]
fn mount_header_count_matches_entries() {
    let list = unsafe { get_mounts() };
    assert!(!list.is_null());

    let header = unsafe { &*list };
    for i in 0..header.count as usize {
        let entry = unsafe { &*header.entries.add(i) };
        let device = unsafe { CStr::from_ptr(entry.device) }.to_str().unwrap();
        let mount  = unsafe { CStr::from_ptr(entry.mount_point) }.to_str().unwrap();
        assert!(!device.is_empty());
        assert!(!mount.is_empty());
    }
    unsafe { free_mounts(list) };
}

#[test]
fn guards_decode_what_the_collector_reads() {
    let direct: Vec<(String, String)> = list_mounts()
        .unwrap()
        .into_iter()
        .map(|m| (m.device, m.mount_point))
        .collect();
    let via_boundary: Vec<(String, String)> = client::mounts()
        .unwrap()
        .into_iter()
        .map(|m| (m.device, m.mount_point))
        .collect();
    assert_eq!(direct, via_boundary);
}

#[test]
fn every_device_backed_mount_can_be_stated() {
    let guard = MountsGuard::acquire().unwrap();
    for m in guard.entries().unwrap().iter().filter(|m| m.is_device_backed()) {
        // permission or stale mounts may fail; a success must be consistent
        if let Ok(u) = DiskUsageGuard::acquire(Path::new(&m.mount_point)) {
            let u = u.usage();
            assert_eq!(u.used, u.total - u.free);
        }
    }
}

#[test]
fn repeated_disk_usage_cycles_release_cleanly() {
    let root = CString::new("/").unwrap();
    for _ in 0..CYCLES {
        let p = unsafe { get_disk_usage(root.as_ptr()) };
        assert!(!p.is_null());
        unsafe { free_disk_usage(p) };
    }
}

#[test]
fn repeated_mount_cycles_release_cleanly() {
    for _ in 0..CYCLES {
        let guard = MountsGuard::acquire().unwrap();
        assert_eq!(guard.entries().unwrap().len(), guard.len());
    }
}

#[test]
fn independent_threads_own_their_handles() {
    let workers: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                for _ in 0..500 {
                    let usage = client::disk_usage(Path::new("/")).unwrap();
                    assert!(usage.free <= usage.total);
                    assert!(!MountsGuard::acquire().unwrap().entries().unwrap().is_empty());
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }
}

#[test]
fn last_error_is_per_thread() {
    let missing = CString::new("/rustdisk/integration/missing").unwrap();
    assert!(unsafe { get_disk_usage(missing.as_ptr()) }.is_null());
    assert_eq!(rustdisk_last_error(), libc::ENOENT);

    let other = thread::spawn(|| rustdisk_last_error()).join().unwrap();
    assert_eq!(other, 0);
}

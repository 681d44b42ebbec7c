//! C ABI entry points.
//!
//! Two acquire/release pairs: `get_disk_usage`/`free_disk_usage` and
//! `get_mounts`/`free_mounts`. Every acquire allocates fresh memory whose
//! ownership passes to the caller; the caller hands it back exactly once.
//! Failure is always a NULL return; details are available on the same
//! thread through `rustdisk_last_error` and `rustdisk_last_error_message`.

use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString, OsStr};
use std::os::unix::ffi::OsStrExt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::ptr;

use crate::collectors::{mounts, statfs};
use crate::error::{BridgeError, Error};
use crate::models::mount::MountEntry;
use crate::models::usage::DiskUsage;

/// One entry of the array behind `RawMountList::entries`. 16 bytes on 64-bit targets.
#[repr(C)]
#[derive(Debug)]
pub struct RawMountEntry {
    pub device:      *mut c_char,
    pub mount_point: *mut c_char,
}

/// Header block returned by `get_mounts`.
#[repr(C)]
#[derive(Debug)]
pub struct RawMountList {
    pub entries: *mut RawMountEntry,
    pub count:   u64,
}

#[derive(Default)]
struct LastError {
    code:    i32,
    message: Option<CString>,
}

thread_local! {
    static LAST_ERROR: RefCell<LastError> = RefCell::new(LastError::default());
}

fn set_last_error(err: Option<&Error>) {
    LAST_ERROR.with(|slot| {
        let mut slot = slot.borrow_mut();
        match err {
            Some(e) => {
                slot.code = e.errno();
                slot.message = CString::new(e.to_string()).ok();
            }
            None => *slot = LastError::default(),
        }
    });
}

/// Run an acquire body, recording its outcome and turning every failure,
/// including a panic, into NULL.
fn acquire<T>(op: &'static str, body: impl FnOnce() -> Result<*mut T, Error>) -> *mut T {
    let outcome = panic::catch_unwind(AssertUnwindSafe(body)).unwrap_or(Err(Error::Panicked));
    match outcome {
        Ok(p) => {
            set_last_error(None);
            p
        }
        Err(e) => {
            tracing::debug!(op, errno = e.errno(), error = %e, "boundary call failed");
            set_last_error(Some(&e));
            ptr::null_mut()
        }
    }
}

/// Get total/free/used bytes for the filesystem containing `path`.
///
/// Returns a pointer to a 24-byte block (three native-endian `u64`:
/// total, free, used) or NULL on failure.
///
/// # Safety
///
/// - `path` must be NULL or a valid NUL-terminated string
/// - A non-NULL result must be released with `free_disk_usage` exactly once
#[no_mangle]
pub unsafe extern "C" fn get_disk_usage(path: *const c_char) -> *mut DiskUsage {
    acquire("get_disk_usage", || {
        if path.is_null() {
            return Err(Error::NullArgument);
        }
        let bytes = unsafe { CStr::from_ptr(path) }.to_bytes();
        let usage = statfs::stat_filesystem(Path::new(OsStr::from_bytes(bytes)))?;
        Ok(Box::into_raw(Box::new(usage)))
    })
}

/// Release a block returned by `get_disk_usage`.
///
/// # Safety
///
/// `usage` must be NULL or a pointer from `get_disk_usage` not yet released.
#[no_mangle]
pub unsafe extern "C" fn free_disk_usage(usage: *mut DiskUsage) {
    if !usage.is_null() {
        drop(unsafe { Box::from_raw(usage) });
    }
}

/// Enumerate the live mount table.
///
/// Returns a pointer to a header `{ entries, count }` where `entries` points
/// to `count` pairs of NUL-terminated strings (device, mount point), or NULL
/// on failure. An empty table yields a valid header with `count == 0`.
///
/// # Safety
///
/// A non-NULL result must be released with `free_mounts` exactly once.
#[no_mangle]
pub unsafe extern "C" fn get_mounts() -> *mut RawMountList {
    acquire("get_mounts", || {
        let list = mounts::list_mounts()?;
        Ok(build_mount_list(list)?)
    })
}

/// Release a header returned by `get_mounts` along with every string and
/// the entry array it owns.
///
/// # Safety
///
/// `list` must be NULL or a pointer from `get_mounts` not yet released.
/// No string read from it may be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn free_mounts(list: *mut RawMountList) {
    if list.is_null() {
        return;
    }
    let header = unsafe { Box::from_raw(list) };
    let entries = unsafe {
        Box::from_raw(ptr::slice_from_raw_parts_mut(header.entries, header.count as usize))
    };
    for entry in entries.iter() {
        unsafe {
            drop(CString::from_raw(entry.device));
            drop(CString::from_raw(entry.mount_point));
        }
    }
    drop(entries);
    drop(header);
}

/// Errno-style code of the last acquire call on this thread; 0 after a success.
#[no_mangle]
pub extern "C" fn rustdisk_last_error() -> i32 {
    LAST_ERROR.with(|slot| slot.borrow().code)
}

/// Message for the last failed acquire call on this thread, or NULL.
///
/// The string is owned by the library and stays valid until the next
/// acquire call on the same thread. Do not free it.
#[no_mangle]
pub extern "C" fn rustdisk_last_error_message() -> *const c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow().message.as_ref().map_or(ptr::null(), |m| m.as_ptr())
    })
}

/// Library version as a static NUL-terminated string.
#[no_mangle]
pub extern "C" fn rustdisk_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr().cast()
}

/// Serialize `mounts` into boundary memory. Nothing leaks on failure: owned
/// strings are only released to raw pointers once every allocation succeeded.
fn build_mount_list(mounts: Vec<MountEntry>) -> Result<*mut RawMountList, BridgeError> {
    let mut owned: Vec<(CString, CString)> = Vec::new();
    owned.try_reserve_exact(mounts.len()).map_err(|_| BridgeError::AllocationFailure)?;
    for m in mounts {
        owned.push((owned_c_string(m.device)?, owned_c_string(m.mount_point)?));
    }

    let mut entries: Vec<RawMountEntry> = Vec::new();
    entries.try_reserve_exact(owned.len()).map_err(|_| BridgeError::AllocationFailure)?;
    entries.extend(owned.into_iter().map(|(device, mount_point)| RawMountEntry {
        device:      device.into_raw(),
        mount_point: mount_point.into_raw(),
    }));

    let count = entries.len() as u64;
    let entries = Box::into_raw(entries.into_boxed_slice()).cast::<RawMountEntry>();
    Ok(Box::into_raw(Box::new(RawMountList { entries, count })))
}

fn owned_c_string(text: String) -> Result<CString, BridgeError> {
    let mut bytes = text.into_bytes();
    bytes.try_reserve_exact(1).map_err(|_| BridgeError::AllocationFailure)?;
    CString::new(bytes).map_err(|_| BridgeError::InteriorNul)
}

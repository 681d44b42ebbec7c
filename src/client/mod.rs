//! Safe calling side of the C boundary.
//!
//! `DiskUsageGuard` and `MountsGuard` own one handle each and release it on
//! drop, so every exit path (including `?` and panics) frees exactly once.

pub mod layout;

use std::ffi::{CStr, CString};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr::NonNull;

use thiserror::Error;

use crate::ffi::{
    free_disk_usage, free_mounts, get_disk_usage, get_mounts, rustdisk_last_error,
    rustdisk_last_error_message, RawMountList,
};
use crate::models::mount::MountEntry;
use crate::models::usage::DiskUsage;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{message} (errno {code})")]
    Acquire { code: i32, message: String },
    #[error("path contains a NUL byte: {0}")]
    InvalidPath(String),
    #[error("mount entry {index} is not valid UTF-8")]
    Decode { index: usize },
}

impl ClientError {
    /// Build from the library's last-error slot for this thread.
    fn last() -> Self {
        let code = rustdisk_last_error();
        let msg = rustdisk_last_error_message();
        let message = if msg.is_null() {
            "unknown error".to_string()
        } else {
            unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
        };
        ClientError::Acquire { code, message }
    }
}

/// Owned `DiskUsage` handle from `get_disk_usage`.
#[derive(Debug)]
pub struct DiskUsageGuard {
    ptr: NonNull<DiskUsage>,
}

impl DiskUsageGuard {
    pub fn acquire(path: &Path) -> Result<Self, ClientError> {
        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| ClientError::InvalidPath(path.display().to_string()))?;
        let raw = unsafe { get_disk_usage(c_path.as_ptr()) };
        NonNull::new(raw).map(|ptr| Self { ptr }).ok_or_else(ClientError::last)
    }

    pub fn usage(&self) -> DiskUsage {
        unsafe { *self.ptr.as_ptr() }
    }
}

impl Drop for DiskUsageGuard {
    fn drop(&mut self) {
        unsafe { free_disk_usage(self.ptr.as_ptr()) };
    }
}

/// Owned mount list handle from `get_mounts`.
#[derive(Debug)]
pub struct MountsGuard {
    ptr: NonNull<RawMountList>,
}

impl MountsGuard {
    pub fn acquire() -> Result<Self, ClientError> {
        let raw = unsafe { get_mounts() };
        NonNull::new(raw).map(|ptr| Self { ptr }).ok_or_else(ClientError::last)
    }

    pub fn len(&self) -> usize {
        self.header().count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode every entry into owned values. `fs_type` is not carried by the
    /// boundary and is left empty.
    pub fn entries(&self) -> Result<Vec<MountEntry>, ClientError> {
        let header = self.header();
        let mut out = Vec::with_capacity(self.len());
        for index in 0..self.len() {
            let raw = unsafe { &*header.entries.add(index) };
            let device      = unsafe { CStr::from_ptr(raw.device) };
            let mount_point = unsafe { CStr::from_ptr(raw.mount_point) };
            match (device.to_str(), mount_point.to_str()) {
                (Ok(d), Ok(m)) => out.push(MountEntry::new(d, m)),
                _ => return Err(ClientError::Decode { index }),
            }
        }
        Ok(out)
    }

    fn header(&self) -> &RawMountList {
        unsafe { self.ptr.as_ref() }
    }
}

impl Drop for MountsGuard {
    fn drop(&mut self) {
        unsafe { free_mounts(self.ptr.as_ptr()) };
    }
}

/// Acquire, copy out and release disk usage for `path`.
pub fn disk_usage(path: &Path) -> Result<DiskUsage, ClientError> {
    Ok(DiskUsageGuard::acquire(path)?.usage())
}

/// Acquire, decode and release the mount table.
pub fn mounts() -> Result<Vec<MountEntry>, ClientError> {
    MountsGuard::acquire()?.entries()
}

//! Disk usage and mount table queries behind a plain C ABI.
//!
//! Built as `librustdisk.so` for foreign callers and as an rlib for the
//! `rustdisk` command and Rust users, who should go through [`client`].
//!
//! # Example (C)
//!
//! ```c
//! typedef struct { uint64_t total, free, used; } DiskUsage;
//! typedef struct { char *device; char *mount_point; } MountEntry;
//! typedef struct { MountEntry *entries; uint64_t count; } MountList;
//!
//! DiskUsage *u = get_disk_usage("/");
//! if (u == NULL) {
//!     fprintf(stderr, "%s\n", rustdisk_last_error_message());
//!     return 1;
//! }
//! printf("%llu of %llu bytes used\n", u->used, u->total);
//! free_disk_usage(u);
//!
//! MountList *m = get_mounts();
//! for (uint64_t i = 0; m && i < m->count; i++) {
//!     printf("%s on %s\n", m->entries[i].device, m->entries[i].mount_point);
//! }
//! free_mounts(m);
//! ```

pub mod client;
pub mod collectors;
pub mod error;
pub mod ffi;
pub mod models;

pub use client::{ClientError, DiskUsageGuard, MountsGuard};
pub use error::{BridgeError, Error, MountError, StatError};
pub use models::mount::MountEntry;
pub use models::usage::DiskUsage;

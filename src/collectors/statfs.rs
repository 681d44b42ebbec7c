use std::path::Path;

use nix::errno::Errno;
use nix::sys::statvfs::statvfs;

use crate::error::StatError;
use crate::models::usage::DiskUsage;

/// Query total/free/used bytes of the filesystem containing `path`.
///
/// `path` may be a file or a directory and need not be UTF-8.
pub fn stat_filesystem(path: &Path) -> Result<DiskUsage, StatError> {
    let stat = statvfs(path).map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "statvfs failed");
        StatError::from(e)
    })?;

    let frsize = stat.fragment_size() as u64;
    let usage = DiskUsage::from_blocks(stat.blocks() as u64, stat.blocks_free() as u64, frsize)
        .ok_or(StatError::OsFailure(Errno::EOVERFLOW as i32))?;

    tracing::debug!(
        path = %path.display(),
        total = usage.total,
        free = usage.free,
        "statvfs ok"
    );
    Ok(usage)
}

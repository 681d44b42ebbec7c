use nix::errno::Errno;
use thiserror::Error;

fn errno_desc(code: &i32) -> &'static str {
    Errno::from_raw(*code).desc()
}

/// Failure of a filesystem statistics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatError {
    #[error("path not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("statvfs failed: {}", errno_desc(.0))]
    OsFailure(i32),
}

impl StatError {
    pub fn errno(&self) -> i32 {
        match self {
            StatError::NotFound         => libc::ENOENT,
            StatError::PermissionDenied => libc::EACCES,
            StatError::OsFailure(code)  => *code,
        }
    }
}

impl From<Errno> for StatError {
    fn from(e: Errno) -> Self {
        match e {
            Errno::ENOENT | Errno::ENOTDIR => StatError::NotFound,
            Errno::EACCES | Errno::EPERM   => StatError::PermissionDenied,
            other                          => StatError::OsFailure(other as i32),
        }
    }
}

/// Failure to read the mount table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("cannot read mount table: {}", errno_desc(.0))]
    OsFailure(i32),
}

impl MountError {
    pub fn errno(&self) -> i32 {
        match self {
            MountError::OsFailure(code) => *code,
        }
    }
}

impl From<std::io::Error> for MountError {
    fn from(e: std::io::Error) -> Self {
        MountError::OsFailure(e.raw_os_error().unwrap_or(libc::EIO))
    }
}

/// Failure while serializing a result into boundary memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("out of memory while building result")]
    AllocationFailure,
    #[error("text contains an interior NUL byte")]
    InteriorNul,
}

impl BridgeError {
    pub fn errno(&self) -> i32 {
        match self {
            BridgeError::AllocationFailure => libc::ENOMEM,
            BridgeError::InteriorNul       => libc::EINVAL,
        }
    }
}

/// Any failure of a boundary call, as reported through the last-error accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Stat(#[from] StatError),
    #[error(transparent)]
    Mount(#[from] MountError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error("null argument")]
    NullArgument,
    #[error("internal panic")]
    Panicked,
}

impl Error {
    pub fn errno(&self) -> i32 {
        match self {
            Error::Stat(e)      => e.errno(),
            Error::Mount(e)     => e.errno(),
            Error::Bridge(e)    => e.errno(),
            Error::NullArgument => libc::EINVAL,
            Error::Panicked     => libc::EIO,
        }
    }
}

use serde::Serialize;

/// One mounted filesystem as listed in the kernel mount table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountEntry {
    pub device:      String,   // "/dev/sda1", "proc", "server:/export"
    pub mount_point: String,   // "/", "/proc"
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fs_type:     String,   // "ext4"; empty if the table omitted it
}

impl MountEntry {
    pub fn new(device: impl Into<String>, mount_point: impl Into<String>) -> Self {
        Self { device: device.into(), mount_point: mount_point.into(), fs_type: String::new() }
    }

    /// True when the device names a node under /dev rather than a virtual source.
    pub fn is_device_backed(&self) -> bool {
        self.device.contains("/dev")
    }
}

use anyhow::Result;
use rustdisk::MountEntry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Fraction digits for byte sizes and percentages
    pub decimals: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Keep only mounts whose device contains this text. Empty = keep all.
    pub device_pattern: String,
    /// Mount-point prefixes to hide (e.g. "/snap")
    pub exclude_mounts: Vec<String>,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            device_pattern: "/dev".into(),
            exclude_mounts: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// `all` bypasses the device pattern but not the explicit excludes.
    pub fn keeps(&self, m: &MountEntry, all: bool) -> bool {
        if !all && !self.device_pattern.is_empty() && !m.device.contains(&self.device_pattern) {
            return false;
        }
        !self.exclude_mounts.iter().any(|p| m.mount_point.starts_with(p.as_str()))
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        match try_load() {
            Ok(c)  => c,
            Err(e) => {
                tracing::debug!(error = %e, "using default config");
                // Write defaults on first run (best-effort)
                let _ = try_write_defaults();
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rustdisk").join("rustdisk.toml"))
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    let text = fs::read_to_string(path)?;
    parse(&text)
}

fn parse(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# rustdisk configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.display.decimals, 2);
        assert_eq!(cfg.filter.device_pattern, "/dev");
        assert!(cfg.filter.exclude_mounts.is_empty());
    }

    #[test]
    fn partial_sections_fill_in() {
        let cfg = parse("[display]\ndecimals = 1\n\n[filter]\ndevice_pattern = \"\"\nexclude_mounts = [\"/boot\"]\n").unwrap();
        assert_eq!(cfg.display.decimals, 1);
        assert!(cfg.filter.device_pattern.is_empty());
        assert_eq!(cfg.filter.exclude_mounts, vec!["/boot".to_string()]);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let cfg = parse("[filter]\nexclude_mounts = [\"/snap\"]\n").unwrap();
        assert_eq!(cfg.filter.device_pattern, "/dev");
        assert_eq!(cfg.display.decimals, 2);
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back = parse(&text).unwrap();
        assert_eq!(back.filter.device_pattern, "/dev");
        assert_eq!(back.display.decimals, 2);
    }

    #[test]
    fn filter_applies_pattern_and_excludes() {
        let f = FilterConfig {
            exclude_mounts: vec!["/snap".into()],
            ..FilterConfig::default()
        };
        let root  = MountEntry::new("/dev/sda1", "/");
        let proc_ = MountEntry::new("proc", "/proc");
        let snap  = MountEntry::new("/dev/loop0", "/snap/core/1");

        assert!(f.keeps(&root, false));
        assert!(!f.keeps(&proc_, false));
        assert!(f.keeps(&proc_, true));
        assert!(!f.keeps(&snap, false));
        assert!(!f.keeps(&snap, true));
    }
}

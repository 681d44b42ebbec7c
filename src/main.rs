mod config;
mod util;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use rustdisk::client;
use std::io;
use std::path::{Path, PathBuf};

use config::Config;
use util::report::{self, Row};

#[derive(Parser, Debug)]
#[command(name = "rustdisk", about = "Disk usage per mounted device", version)]
struct Cli {
    /// Show usage for a single path and exit
    #[arg(short, long, value_name = "PATH")]
    usage: Option<PathBuf>,

    /// List every mount table entry (device and mount point) and exit
    #[arg(short, long)]
    mounts: bool,

    /// Include mounts whose device does not match the configured pattern
    #[arg(short, long)]
    all: bool,

    /// Print JSON instead of text (snapshot of all filtered mounts by default)
    #[arg(long)]
    json: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rustdisk=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "rustdisk", &mut io::stdout());
        return Ok(());
    }
    if cli.config {
        return run_print_config();
    }

    let cfg = Config::load();
    if let Some(path) = &cli.usage {
        return run_usage(path, &cfg, cli.json);
    }
    if cli.mounts {
        return run_list_mounts(cli.json);
    }
    if cli.json {
        return run_json_snapshot(&cfg, cli.all);
    }
    run_report(&cfg, cli.all)
}

/// Filtered mounts, each paired with its usage. A mount that cannot be
/// stat'ed (stale NFS, permission) keeps its row with no usage.
fn collect_rows(cfg: &Config, all: bool) -> Result<Vec<Row>> {
    let mounts = client::mounts().context("reading mount table")?;
    let rows = mounts
        .into_iter()
        .filter(|m| cfg.filter.keeps(m, all))
        .map(|mount| {
            let usage = match client::disk_usage(Path::new(&mount.mount_point)) {
                Ok(u)  => Some(u),
                Err(e) => {
                    tracing::warn!(mount = %mount.mount_point, error = %e, "skipping usage");
                    None
                }
            };
            Row { mount, usage }
        })
        .collect();
    Ok(rows)
}

fn run_report(cfg: &Config, all: bool) -> Result<()> {
    let rows = collect_rows(cfg, all)?;
    print!("{}", report::generate(&rows, cfg.display.decimals));
    Ok(())
}

fn run_usage(path: &Path, cfg: &Config, json: bool) -> Result<()> {
    use util::human::{fmt_bytes, fmt_pct};

    let u = client::disk_usage(path)
        .with_context(|| format!("disk usage for {}", path.display()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&u)?);
        return Ok(());
    }
    let d = cfg.display.decimals;
    println!("Disk usage for {}:", path.display());
    println!("  Total: {} ({})", fmt_bytes(u.total, d), u.total);
    println!("  Free:  {} ({})", fmt_bytes(u.free, d), u.free);
    println!("  Used:  {} ({})", fmt_bytes(u.used, d), u.used);
    println!("  Use%:  {}", fmt_pct(u.use_pct(), d));
    Ok(())
}

fn run_list_mounts(json: bool) -> Result<()> {
    let guard = client::MountsGuard::acquire().context("reading mount table")?;
    let entries = guard.entries()?;
    drop(guard);
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for m in &entries {
        println!("{:<32} {}", m.device, m.mount_point);
    }
    Ok(())
}

fn run_json_snapshot(cfg: &Config, all: bool) -> Result<()> {
    use serde_json::{json, Value};
    use util::human::fmt_bytes;

    let d = cfg.display.decimals;
    let rows = collect_rows(cfg, all)?;
    let mounts: Vec<Value> = rows.iter().map(|r| {
        let usage = r.usage.map(|u| json!({
            "total":    u.total,
            "free":     u.free,
            "used":     u.used,
            "total_hr": fmt_bytes(u.total, d),
            "free_hr":  fmt_bytes(u.free, d),
            "used_hr":  fmt_bytes(u.used, d),
            "use_pct":  u.use_pct(),
        }));
        json!({
            "device":     r.mount.device,
            "mountpoint": r.mount.mount_point,
            "usage":      usage,
        })
    }).collect();

    let snapshot = json!({
        "rustdisk_version": env!("CARGO_PKG_VERSION"),
        "layout_version":   client::layout::LAYOUT_VERSION,
        "timestamp":        chrono::Local::now().to_rfc3339(),
        "mounts":           mounts,
    });

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_print_config() -> Result<()> {
    let cfg = Config::load();
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[display]");
    println!("  decimals       = {}", cfg.display.decimals);
    println!();
    println!("[filter]");
    println!("  device_pattern = {:?}", cfg.filter.device_pattern);
    println!("  exclude_mounts = {:?}", cfg.filter.exclude_mounts);
    Ok(())
}

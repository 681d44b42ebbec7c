const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a raw byte count in base-1024 units: "12.50 GB" with `decimals = 2`.
pub fn fmt_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 { return "0 B".to_string(); }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.*} {}", decimals, value, UNITS[unit])
}

/// Format a percentage with `decimals` fraction digits: "84.50%"
pub fn fmt_pct(pct: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_has_no_fraction() {
        assert_eq!(fmt_bytes(0, 2), "0 B");
    }

    #[test]
    fn picks_largest_unit_below_value() {
        assert_eq!(fmt_bytes(512, 2), "512.00 B");
        assert_eq!(fmt_bytes(1536, 1), "1.5 KB");
        assert_eq!(fmt_bytes(500 * (1 << 30), 2), "500.00 GB");
        assert_eq!(fmt_bytes(3 << 40, 0), "3 TB");
    }

    #[test]
    fn petabytes_is_the_ceiling() {
        assert_eq!(fmt_bytes(2048 << 50, 0), "2048 PB");
    }

    #[test]
    fn percentage_decimals() {
        assert_eq!(fmt_pct(76.0, 2), "76.00%");
        assert_eq!(fmt_pct(33.333, 1), "33.3%");
    }
}

// Decimal units throughout (1 MB = 1,000,000 bytes) so the stepper's
// 10 MB / 100 MB grid prints as round numbers.
const GB: f64 = 1_000_000_000.0;
const MB: f64 = 1_000_000.0;
const KB: f64 = 1_000.0;

/// Fixed three-decimal gigabytes: "12.345 GB"
pub fn fmt_gb(bytes: u64) -> String {
    format!("{:.3} GB", bytes as f64 / GB)
}

/// File size for the stepper: "100 MB", "2.5 MB", "1,000 MB"
pub fn fmt_mb(bytes: f64) -> String {
    let mb = bytes / MB;
    if (mb - mb.round()).abs() < 1e-9 {
        format!("{} MB", group_thousands(mb.round() as u64))
    } else {
        format!("{:.1} MB", mb)
    }
}

/// Format a raw byte count into a human-readable string: "12.5 MB"
pub fn fmt_bytes(bytes: u64) -> String {
    let b = bytes as f64;
    if b >= GB      { format!("{:.1} GB", b / GB) }
    else if b >= MB { format!("{:.1} MB", b / MB) }
    else if b >= KB { format!("{:.1} KB", b / KB) }
    else            { format!("{} B", bytes) }
}

/// Format a percentage without decimals: "84%"
pub fn fmt_pct(pct: f64) -> String {
    format!("{:.0}%", pct)
}

fn group_thousands(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gigabytes_keep_three_decimals() {
        assert_eq!(fmt_gb(0), "0.000 GB");
        assert_eq!(fmt_gb(12_345_678_901), "12.346 GB");
    }

    #[test]
    fn megabytes_for_stepper() {
        assert_eq!(fmt_mb(100_000_000.0), "100 MB");
        assert_eq!(fmt_mb(1_000_000_000.0), "1,000 MB");
        assert_eq!(fmt_mb(2_500_000.0), "2.5 MB");
    }

    #[test]
    fn bytes_pick_a_unit() {
        assert_eq!(fmt_bytes(999), "999 B");
        assert_eq!(fmt_bytes(1_500), "1.5 KB");
        assert_eq!(fmt_bytes(100_000_000), "100.0 MB");
        assert_eq!(fmt_bytes(3_210_000_000), "3.2 GB");
    }
}

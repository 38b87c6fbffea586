use serde::Serialize;

/// Live capacity figures for one volume. Read fresh on every query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiskSnapshot {
    pub total_bytes:                       u64,
    pub used_bytes:                        u64,
    pub available_bytes:                   u64,
    pub available_for_important_usage:     u64,
    pub available_for_opportunistic_usage: u64,
}

impl DiskSnapshot {
    pub fn use_pct(&self) -> f64 {
        if self.total_bytes == 0 { return 0.0; }
        self.used_bytes as f64 / self.total_bytes as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_pct_handles_empty_volume() {
        assert_eq!(DiskSnapshot::default().use_pct(), 0.0);
        let s = DiskSnapshot { total_bytes: 200, used_bytes: 50, ..Default::default() };
        assert_eq!(s.use_pct(), 25.0);
    }
}

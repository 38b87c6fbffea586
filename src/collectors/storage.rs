use crate::models::disk::DiskSnapshot;
use std::path::PathBuf;
use tracing::debug;

/// Volume capacity queries. Every method is fail-soft: anything that cannot
/// be read comes back as 0.
pub trait StorageInfoProvider {
    fn total_bytes(&self) -> u64;
    fn available_bytes(&self) -> u64;
    fn available_for_important_usage(&self) -> u64;
    fn available_for_opportunistic_usage(&self) -> u64;

    fn used_bytes(&self) -> u64 {
        self.total_bytes().saturating_sub(self.available_bytes())
    }

    fn snapshot(&self) -> DiskSnapshot {
        DiskSnapshot {
            total_bytes:                       self.total_bytes(),
            used_bytes:                        self.used_bytes(),
            available_bytes:                   self.available_bytes(),
            available_for_important_usage:     self.available_for_important_usage(),
            available_for_opportunistic_usage: self.available_for_opportunistic_usage(),
        }
    }
}

/// Raw block counts for a volume, already scaled to bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct VolumeBytes {
    total: u64,
    avail: u64,
}

/// `statvfs(2)` on a path inside the volume of interest.
///
/// "Important" capacity is what an unprivileged writer can claim right now.
/// "Opportunistic" capacity holds back `reserve_pct` of the volume, room a
/// nice-to-have write should leave for everyone else.
#[derive(Debug, Clone)]
pub struct StatvfsProvider {
    path:        PathBuf,
    reserve_pct: f64,
}

impl StatvfsProvider {
    pub fn new(path: impl Into<PathBuf>, reserve_pct: f64) -> Self {
        Self { path: path.into(), reserve_pct: reserve_pct.clamp(0.0, 100.0) }
    }

    fn read(&self) -> VolumeBytes {
        use nix::sys::statvfs::statvfs;
        match statvfs(&self.path) {
            Ok(stat) => {
                let frsize = stat.fragment_size() as u64;
                VolumeBytes {
                    total: (stat.blocks() as u64).saturating_mul(frsize),
                    avail: (stat.blocks_available() as u64).saturating_mul(frsize),
                }
            }
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "statvfs failed");
                VolumeBytes::default()
            }
        }
    }
}

fn opportunistic(v: VolumeBytes, reserve_pct: f64) -> u64 {
    let reserve = (v.total as f64 * reserve_pct / 100.0) as u64;
    v.avail.saturating_sub(reserve)
}

impl StorageInfoProvider for StatvfsProvider {
    fn total_bytes(&self) -> u64 { self.read().total }

    fn available_bytes(&self) -> u64 { self.read().avail }

    fn available_for_important_usage(&self) -> u64 { self.read().avail }

    fn available_for_opportunistic_usage(&self) -> u64 {
        opportunistic(self.read(), self.reserve_pct)
    }

    // One statvfs call for the whole snapshot so the figures agree.
    fn snapshot(&self) -> DiskSnapshot {
        let v = self.read();
        DiskSnapshot {
            total_bytes:                       v.total,
            used_bytes:                        v.total.saturating_sub(v.avail),
            available_bytes:                   v.avail,
            available_for_important_usage:     v.avail,
            available_for_opportunistic_usage: opportunistic(v, self.reserve_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed { total: u64, avail: u64 }

    impl StorageInfoProvider for Fixed {
        fn total_bytes(&self) -> u64 { self.total }
        fn available_bytes(&self) -> u64 { self.avail }
        fn available_for_important_usage(&self) -> u64 { self.avail }
        fn available_for_opportunistic_usage(&self) -> u64 { self.avail / 2 }
    }

    #[test]
    fn used_is_total_minus_available() {
        let p = Fixed { total: 1000, avail: 300 };
        assert_eq!(p.used_bytes(), 700);
        let snap = p.snapshot();
        assert_eq!(snap.used_bytes, 700);
        assert_eq!(snap.available_for_opportunistic_usage, 150);
    }

    #[test]
    fn used_never_underflows() {
        assert_eq!(Fixed { total: 10, avail: 20 }.used_bytes(), 0);
    }

    #[test]
    fn missing_path_reads_as_zero() {
        let p = StatvfsProvider::new("/definitely/not/a/real/mount/point", 5.0);
        assert_eq!(p.snapshot(), DiskSnapshot::default());
        assert_eq!(p.total_bytes(), 0);
        assert_eq!(p.used_bytes(), 0);
    }

    #[test]
    fn real_volume_is_consistent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let snap = StatvfsProvider::new(temp.path(), 5.0).snapshot();
        assert!(snap.total_bytes > 0);
        assert!(snap.available_bytes <= snap.total_bytes);
        assert_eq!(snap.used_bytes, snap.total_bytes - snap.available_bytes);
        assert!(snap.available_for_opportunistic_usage <= snap.available_for_important_usage);
    }

    #[test]
    fn opportunistic_holds_back_reserve() {
        let v = VolumeBytes { total: 1_000, avail: 400 };
        assert_eq!(opportunistic(v, 5.0), 350);
        assert_eq!(opportunistic(v, 50.0), 0);
        assert_eq!(opportunistic(v, 0.0), 400);
    }
}

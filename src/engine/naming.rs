use std::sync::atomic::{AtomicI64, Ordering};

const PREFIX: &str = "File";

static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Millisecond batch stamp, strictly increasing within this process.
///
/// Two batches started inside the same millisecond get consecutive stamps
/// instead of the same one, so their file names never collide.
pub fn next_batch_stamp() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let mut prev = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_STAMP.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_)       => return next,
            Err(actual) => prev = actual,
        }
    }
}

/// `File_<stamp>_<index>`
pub fn file_name(stamp: i64, index: usize) -> String {
    format!("{}_{}_{}", PREFIX, stamp, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn stamps_strictly_increase() {
        let a = next_batch_stamp();
        let b = next_batch_stamp();
        let c = next_batch_stamp();
        assert!(a < b && b < c);
    }

    #[test]
    fn names_within_and_across_batches_are_distinct() {
        let mut seen = HashSet::new();
        for _ in 0..50 {
            let stamp = next_batch_stamp();
            for i in 0..4 {
                assert!(seen.insert(file_name(stamp, i)));
            }
        }
    }

    #[test]
    fn name_layout() {
        assert_eq!(file_name(1716500000123, 7), "File_1716500000123_7");
    }
}

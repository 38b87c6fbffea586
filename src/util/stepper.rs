//! Up/down stepping for the file size and file count controls.
//!
//! File size moves in 10 MB steps up to 100 MB, then 100 MB steps up to
//! 1000 MB: 10, 20 … 100, 200 … 1000. A step that would cross a bound
//! lands on it, while a value already outside the range is returned unchanged.

/// Default file size, 100 MB (decimal).
pub const DEFAULT_FILE_SIZE: f64 = 100_000_000.0;
pub const MIN_FILE_SIZE: f64 = DEFAULT_FILE_SIZE / 10.0;
pub const MAX_FILE_SIZE: f64 = DEFAULT_FILE_SIZE * 10.0;

pub const DEFAULT_FILE_COUNT: usize = 1;
pub const MIN_FILE_COUNT: usize = 1;
pub const MAX_FILE_COUNT: usize = 100;

pub fn increment_size(bytes: f64) -> f64 {
    if bytes >= MAX_FILE_SIZE {
        return bytes;
    }
    let step = if bytes >= DEFAULT_FILE_SIZE { DEFAULT_FILE_SIZE } else { MIN_FILE_SIZE };
    (bytes + step).min(MAX_FILE_SIZE)
}

pub fn decrement_size(bytes: f64) -> f64 {
    if bytes <= MIN_FILE_SIZE {
        return bytes;
    }
    let step = if bytes <= DEFAULT_FILE_SIZE { MIN_FILE_SIZE } else { DEFAULT_FILE_SIZE };
    (bytes - step).max(MIN_FILE_SIZE)
}

pub fn increment_count(count: usize) -> usize {
    count.saturating_add(1).clamp(MIN_FILE_COUNT, MAX_FILE_COUNT)
}

pub fn decrement_count(count: usize) -> usize {
    count.saturating_sub(1).clamp(MIN_FILE_COUNT, MAX_FILE_COUNT)
}

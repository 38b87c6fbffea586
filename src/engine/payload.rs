use std::io::{self, Write};

/// The ten-byte unit every filler file is made of.
pub const PATTERN: &[u8; 10] = b"0123456789";

/// Largest payload representable in bytes: whole units below `u64::MAX`.
pub const MAX_PAYLOAD: u64 = u64::MAX / 10 * 10;

/// Pattern units per write call (80 KB).
const CHUNK_UNITS: usize = 8 * 1024;

/// Bytes actually written for a requested size: whole pattern units only.
///
/// `105.0` gives `100`, never `110`. Anything beyond the last full unit is
/// dropped. Sizes past [`MAX_PAYLOAD`] saturate there.
pub fn payload_len(requested_bytes: f64) -> u64 {
    if !requested_bytes.is_finite() || requested_bytes <= 0.0 {
        return 0;
    }
    let units = (requested_bytes / PATTERN.len() as f64).floor() as u64;
    units.checked_mul(PATTERN.len() as u64).unwrap_or(MAX_PAYLOAD)
}

/// Stream `len` bytes of the repeating pattern into `out`. `len` must be a
/// multiple of the pattern length.
pub fn write_pattern<W: Write>(out: &mut W, len: u64) -> io::Result<()> {
    debug_assert_eq!(len % PATTERN.len() as u64, 0);
    let chunk = PATTERN.repeat(CHUNK_UNITS);
    let mut remaining = len;
    while remaining > 0 {
        let n = remaining.min(chunk.len() as u64) as usize;
        out.write_all(&chunk[..n])?;
        remaining -= n as u64;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_whole_units() {
        assert_eq!(payload_len(0.0), 0);
        assert_eq!(payload_len(9.0), 0);
        assert_eq!(payload_len(10.0), 10);
        assert_eq!(payload_len(105.0), 100);
        assert_eq!(payload_len(109.99), 100);
        assert_eq!(payload_len(100_000_000.0), 100_000_000);
    }

    #[test]
    fn nonsense_sizes_write_nothing() {
        assert_eq!(payload_len(-5.0), 0);
        assert_eq!(payload_len(f64::NAN), 0);
        assert_eq!(payload_len(f64::INFINITY), 0);
    }

    #[test]
    fn huge_sizes_saturate() {
        assert_eq!(payload_len(2e19), MAX_PAYLOAD);
        assert_eq!(payload_len(f64::MAX), MAX_PAYLOAD);
        assert_eq!(MAX_PAYLOAD % 10, 0);
    }

    #[test]
    fn pattern_spans_chunk_boundary() {
        let len = (CHUNK_UNITS as u64 + 3) * 10;
        let mut buf = Vec::new();
        write_pattern(&mut buf, len).unwrap();
        assert_eq!(buf.len() as u64, len);
        assert!(buf.chunks(10).all(|c| c == PATTERN));
    }

    #[test]
    fn empty_payload() {
        let mut buf = Vec::new();
        write_pattern(&mut buf, 0).unwrap();
        assert!(buf.is_empty());
    }
}

//! Human-readable byte sizes.

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const TB: u64 = GB * 1024;

/// Format a byte count with binary units.
///
/// Counts below 1024 keep one decimal and a `Byte`/`Bytes` label; larger
/// counts use KB, MB, GB or TB with four decimals.
///
/// ```
/// use sciprodir_link::human_readable_size;
///
/// assert_eq!(human_readable_size(1), "1.0 Byte");
/// assert_eq!(human_readable_size(2048), "2.0000 KB");
/// ```
pub fn human_readable_size(bytes: u64) -> String {
    match bytes {
        1 => "1.0 Byte".to_string(),
        b if b < KB => format!("{b}.0 Bytes"),
        b if b < MB => format!("{:.4} KB", b as f64 / KB as f64),
        b if b < GB => format!("{:.4} MB", b as f64 / MB as f64),
        b if b < TB => format!("{:.4} GB", b as f64 / GB as f64),
        b => format!("{:.4} TB", b as f64 / TB as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes() {
        assert_eq!(human_readable_size(0), "0.0 Bytes");
        assert_eq!(human_readable_size(1), "1.0 Byte");
        assert_eq!(human_readable_size(2), "2.0 Bytes");
        assert_eq!(human_readable_size(100), "100.0 Bytes");
        assert_eq!(human_readable_size(1023), "1023.0 Bytes");
    }

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(human_readable_size(1024), "1.0000 KB");
        assert_eq!(human_readable_size(1536), "1.5000 KB");
        assert_eq!(human_readable_size(MB - 1), "1023.9990 KB");
        assert_eq!(human_readable_size(1_048_576), "1.0000 MB");
        assert_eq!(human_readable_size(GB), "1.0000 GB");
        assert_eq!(human_readable_size(TB), "1.0000 TB");
        assert_eq!(human_readable_size(2048 * TB), "2048.0000 TB");
    }

    #[test]
    fn test_pure() {
        assert_eq!(human_readable_size(123_456), human_readable_size(123_456));
    }
}

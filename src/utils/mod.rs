const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human readable byte count with two decimals, `N/A` for unknown or zero sizes.
/// Anything past gigabytes is still shown in GB.
pub fn format_size(bytes: Option<u64>) -> String {
    let bytes = match bytes {
        Some(b) if b > 0 => b,
        _ => return "N/A".to_string(),
    };

    let mut value = bytes as f64;
    let mut unit = UNITS[0];
    for (i, name) in UNITS.iter().enumerate() {
        unit = name;
        if value < 1024.0 || i == UNITS.len() - 1 {
            break;
        }
        value /= 1024.0;
    }

    format!("{:.2} {}", value, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_size() {
        assert_eq!(format_size(None), "N/A");
        assert_eq!(format_size(Some(0)), "N/A");
    }

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(format_size(Some(1)), "1.00 B");
        assert_eq!(format_size(Some(1023)), "1023.00 B");
        assert_eq!(format_size(Some(1024)), "1.00 KB");
        assert_eq!(format_size(Some(1536)), "1.50 KB");
        assert_eq!(format_size(Some(1024 * 1024)), "1.00 MB");
        assert_eq!(format_size(Some(1024u64.pow(3))), "1.00 GB");
    }

    #[test]
    fn test_gigabytes_is_the_largest_unit() {
        assert_eq!(format_size(Some(1024u64.pow(4))), "1024.00 GB");
    }
}

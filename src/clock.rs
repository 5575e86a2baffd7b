//! Device timestamp conversion.
//!
//! Devices stamp messages in seconds, milliseconds or microseconds since
//! the epoch depending on software version. The unit is inferred from the
//! number of decimal digits.

/// Pluggable conversion from a device timestamp to epoch seconds.
pub type ClockFn = fn(u64) -> u64;

/// Convert a device timestamp to epoch seconds.
///
/// 10 digits are seconds, 13 digits milliseconds, 16 digits microseconds.
/// Any other width is returned unchanged.
pub fn epoch_seconds(device_timestamp: u64) -> u64 {
    match digit_count(device_timestamp) {
        13 => device_timestamp / 1_000,
        16 => device_timestamp / 1_000_000,
        _ => device_timestamp,
    }
}

fn digit_count(mut value: u64) -> u32 {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_unchanged() {
        assert_eq!(epoch_seconds(1_465_467_390), 1_465_467_390);
    }

    #[test]
    fn test_milliseconds_truncated() {
        assert_eq!(epoch_seconds(1_465_467_390_987), 1_465_467_390);
    }

    #[test]
    fn test_microseconds_truncated() {
        assert_eq!(epoch_seconds(1_465_467_390_987_654), 1_465_467_390);
    }

    #[test]
    fn test_other_widths_unchanged() {
        assert_eq!(epoch_seconds(0), 0);
        assert_eq!(epoch_seconds(12_345), 12_345);
        assert_eq!(epoch_seconds(146_546_739_098), 146_546_739_098);
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(u64::MAX), 20);
    }
}

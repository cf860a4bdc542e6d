/// Magnitude suffixes, one per power of 1000
const SUFFIXES: [&str; 9] = ["", "k", "M", "B", "T", "P", "E", "Z", "Y"];

/// Abbreviate a number to a human readable magnitude string
///
/// The value is scaled by the largest power of 1000 not exceeding it, formatted with
/// `precision` decimals, and trailing zeros are dropped:
/// `1234567.0` -> `"1.23M"`, `1200.0` -> `"1.2k"`, `5_000_000.0` -> `"5M"`.
pub fn abbreviate(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let index = if value == 0.0 {
        0
    } else {
        let magnitude = (value.abs().log10() / 3.0).floor().max(0.0) as usize;
        magnitude.min(SUFFIXES.len() - 1)
    };

    let scaled = value / 1000f64.powi(index as i32);
    let mut text = format!("{:.*}", precision, scaled);

    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if text == "-0" {
        text = "0".to_string();
    }

    format!("{}{}", text, SUFFIXES[index])
}

/// Abbreviated USD amount with a dollar prefix, two decimals
pub fn usd(value: f64) -> String {
    format!("${}", abbreviate(value, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviate_millions() {
        assert_eq!(abbreviate(1_234_567.0, 2), "1.23M");
        assert_eq!(abbreviate(5_000_000.0, 2), "5M");
    }

    #[test]
    fn test_abbreviate_drops_trailing_zeros() {
        assert_eq!(abbreviate(1200.0, 2), "1.2k");
        assert_eq!(abbreviate(100.0, 2), "100");
        assert_eq!(abbreviate(0.5, 2), "0.5");
    }

    #[test]
    fn test_abbreviate_small_and_zero() {
        assert_eq!(abbreviate(0.0, 2), "0");
        assert_eq!(abbreviate(999.0, 2), "999");
        assert_eq!(abbreviate(-1500.0, 2), "-1.5k");
    }

    #[test]
    fn test_abbreviate_large_magnitudes() {
        assert_eq!(abbreviate(1_110_000_000_000.0, 2), "1.11T");
        assert_eq!(abbreviate(42_500_000_000.0, 2), "42.5B");
        // Beyond the last suffix the value keeps growing in front of "Y"
        assert_eq!(abbreviate(2e27, 2), "2000Y");
    }

    #[test]
    fn test_usd_prefix() {
        assert_eq!(usd(1_234_567.0), "$1.23M");
        assert_eq!(usd(3_450_000_000.0), "$3.45B");
    }
}

/// Renders a price compactly: `1.50M`, `2.5K`, or a rounded integer.
///
/// Halves round away from zero at the shown precision, so `1250` is `1.3K`.
#[must_use]
pub fn format_price(price: f64) -> String {
    if price >= 1_000_000.0 {
        format!("{:.2}M", (price / 10_000.0).round() / 100.0)
    } else if price >= 1_000.0 {
        format!("{:.1}K", (price / 100.0).round() / 10.0)
    } else {
        format!("{:.0}", price.round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millions_use_two_decimals() {
        assert_eq!(format_price(1_500_000.0), "1.50M");
        assert_eq!(format_price(1_000_000.0), "1.00M");
        assert_eq!(format_price(123_456_789.0), "123.46M");
    }

    #[test]
    fn thousands_use_one_decimal() {
        assert_eq!(format_price(2_500.0), "2.5K");
        assert_eq!(format_price(1_000.0), "1.0K");
        assert_eq!(format_price(999_940.0), "999.9K");
    }

    #[test]
    fn halves_round_up_at_shown_precision() {
        assert_eq!(format_price(1_250.0), "1.3K");
        assert_eq!(format_price(3_125_000.0), "3.13M");
        assert_eq!(format_price(12.5), "13");
    }

    #[test]
    fn small_values_are_rounded_integers() {
        assert_eq!(format_price(999.0), "999");
        assert_eq!(format_price(0.0), "0");
    }
}

/// Turn a free-text frequency answer ("3-5", "4+", "2 times a month") into one number
///
/// Only the first whitespace-separated token is read. A range averages its
/// bounds, a trailing `+` is dropped, and anything unparseable is 0.
pub fn parse_time_commitment(value: &str) -> f64 {
    let Some(token) = value.split_whitespace().next() else {
        return 0.0;
    };

    let bounds: Vec<&str> = token.split('-').collect();
    let parsed = match bounds[..] {
        [low, high] => low
            .parse::<f64>()
            .and_then(|low| high.parse::<f64>().map(|high| (low + high) / 2.0))
            .ok(),
        [single] => single.strip_suffix('+').unwrap_or(single).parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_averages_bounds() {
        assert_eq!(parse_time_commitment("3-5"), 4.0);
        assert_eq!(parse_time_commitment("2-3 times per term"), 2.5);
    }

    #[test]
    fn test_open_ended() {
        assert_eq!(parse_time_commitment("4+"), 4.0);
        assert_eq!(parse_time_commitment("10+ meetings"), 10.0);
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(parse_time_commitment("2"), 2.0);
        assert_eq!(parse_time_commitment(" 6 "), 6.0);
    }

    #[test]
    fn test_unparseable_defaults_to_zero() {
        assert_eq!(parse_time_commitment(""), 0.0);
        assert_eq!(parse_time_commitment("   "), 0.0);
        assert_eq!(parse_time_commitment("weekly"), 0.0);
        assert_eq!(parse_time_commitment("a-b"), 0.0);
        assert_eq!(parse_time_commitment("1-2-3"), 0.0);
        assert_eq!(parse_time_commitment("inf"), 0.0);
    }
}

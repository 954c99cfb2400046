//! Reports computed from full record sets on every request.

pub mod attendance;
pub mod clock;
pub mod leave;

/// `part / whole` as a percentage rounded to one decimal; 0 for an empty whole.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let pct = part as f64 / whole as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::percentage;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 1), 100.0);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
    }
}

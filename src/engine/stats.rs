//! Numeric helpers shared by the scoring and classification stages

use std::cmp::Ordering;

/// Round to 2 decimal places, ties away from zero (half-up for the
/// non-negative amounts this engine produces).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Linearly interpolated quantile of `values` at `q` in [0, 1].
///
/// With n sorted values the quantile sits at rank h = (n - 1) * q and
/// interpolates between the surrounding order statistics. Returns `None`
/// for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let h = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round2_half_up() {
        // 2.875 is exactly representable in binary; the tie rounds up
        assert_eq!(round2(2.875), 2.88);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(2.874), 2.87);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_round2_plain_cases() {
        // 10 * 1000 * 0.10 / 360
        assert_eq!(round2(2.7777777777777777), 2.78);
        assert_eq!(round2(1.994), 1.99);
    }

    #[test]
    fn test_quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile(&values, 0.75).unwrap(), 3.25);
        assert_relative_eq!(quantile(&values, 0.5).unwrap(), 2.5);
        assert_relative_eq!(quantile(&values, 0.0).unwrap(), 1.0);
        assert_relative_eq!(quantile(&values, 1.0).unwrap(), 4.0);
    }

    #[test]
    fn test_quantile_unsorted_input() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert_relative_eq!(quantile(&values, 0.75).unwrap(), 3.25);
    }

    #[test]
    fn test_quantile_single_element() {
        let values = [42.0];
        for q in [0.0, 0.25, 0.75, 1.0] {
            assert_relative_eq!(quantile(&values, q).unwrap(), 42.0);
        }
    }

    #[test]
    fn test_quantile_empty() {
        assert_eq!(quantile(&[], 0.5), None);
    }
}

//! Cell formatting for summary rows.

/// Placeholder for a statistic that has no values to summarise.
pub const EMPTY_STATISTIC: &str = "-";

/// Integer percentage of `n` over `denominator`, ties rounded half up.
///
/// A zero denominator yields 0.
pub fn round_percent(n: usize, denominator: usize) -> u64 {
    if denominator == 0 {
        return 0;
    }
    let (n, d) = (n as u64, denominator as u64);
    (200 * n + d) / (2 * d)
}

/// `n (p%)`.
pub fn format_count_percent(n: usize, denominator: usize) -> String {
    format!("{} ({}%)", n, round_percent(n, denominator))
}

/// Linear-interpolated quantile of already sorted values.
///
/// Position `p * (len - 1)` between order statistics.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Round to one decimal place, ties away from zero.
///
/// Works on the `f64` as stored. A value whose shortest decimal form has a 5
/// in the second place (`1.15`, `2.45`) scales by ten to exactly `x.5`, so it
/// rounds away from zero even when the stored binary value sits just below
/// the tie.
pub fn round_one_decimal(value: f64) -> f64 {
    // adding 0.0 folds -0.0 into 0.0
    (value * 10.0).round() / 10.0 + 0.0
}

/// Median and quartiles of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Compute quartiles; `None` for an empty sample.
    pub fn of(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            q1: quantile(&sorted, 0.25)?,
            median: quantile(&sorted, 0.5)?,
            q3: quantile(&sorted, 0.75)?,
        })
    }
}

/// `median (Q1, Q3)` to one decimal, or [`EMPTY_STATISTIC`] for no values.
pub fn format_median_iqr(values: &[f64]) -> String {
    match Quartiles::of(values) {
        Some(q) => format!(
            "{:.1} ({:.1}, {:.1})",
            round_one_decimal(q.median),
            round_one_decimal(q.q1),
            round_one_decimal(q.q3)
        ),
        None => EMPTY_STATISTIC.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_percent() {
        assert_eq!(format_count_percent(0, 0), "0 (0%)");
        assert_eq!(format_count_percent(3, 10), "3 (30%)");
        assert_eq!(format_count_percent(10, 10), "10 (100%)");
        assert_eq!(format_count_percent(1, 3), "1 (33%)");
        assert_eq!(format_count_percent(2, 3), "2 (67%)");
    }

    #[test]
    fn test_percent_ties_round_half_up() {
        // 1/8 = 12.5%, 3/8 = 37.5%, 1/40 = 2.5%
        assert_eq!(round_percent(1, 8), 13);
        assert_eq!(round_percent(3, 8), 38);
        assert_eq!(round_percent(1, 40), 3);
        assert_eq!(round_percent(1, 200), 1);
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 0.75), Some(3.25));
        assert_eq!(quantile(&[5.0], 0.25), Some(5.0));
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&sorted, 1.5), None);
    }

    #[test]
    fn test_format_median_iqr() {
        assert_eq!(format_median_iqr(&[1.0, 2.0, 3.0, 4.0]), "2.5 (1.8, 3.3)");
        assert_eq!(format_median_iqr(&[4.0, 1.0, 3.0, 2.0]), "2.5 (1.8, 3.3)");
        assert_eq!(format_median_iqr(&[7.0]), "7.0 (7.0, 7.0)");
        assert_eq!(format_median_iqr(&[]), "-");
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(1.75), 1.8);
        assert_eq!(round_one_decimal(3.25), 3.3);
        assert_eq!(round_one_decimal(-1.25), -1.3);
        assert_eq!(format!("{:.1}", round_one_decimal(-0.04)), "0.0");
    }

    #[test]
    fn test_round_one_decimal_inexact_ties() {
        // none of these is exact in binary; 1.15 is stored just below the tie
        assert_eq!(round_one_decimal(1.05), 1.1);
        assert_eq!(round_one_decimal(1.15), 1.2);
        assert_eq!(round_one_decimal(2.45), 2.5);
        assert_eq!(round_one_decimal(-1.15), -1.2);
        assert_eq!(format_median_iqr(&[1.1, 1.2]), "1.2 (1.1, 1.2)");
    }
}

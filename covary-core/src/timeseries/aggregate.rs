//! Pure reducers that collapse daily observations into monthly buckets, and
//! first-differencing for cumulative counters.

use std::collections::HashMap;

use crate::types::{Granularity, Series};

/// Collapse daily `(day_key, value)` entries into monthly buckets by mean.
///
/// Entries are grouped by the 6-character month prefix of their key.
/// Non-finite values are skipped entirely: they neither contribute to the
/// sum nor to the divisor, so a bucket's mean is always over the entries
/// actually included, never over the nominal days in the month.
pub fn monthly_mean<'a, I>(entries: I) -> Series
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut sums: HashMap<String, (f64, u32)> = HashMap::new();
    for (key, value) in entries {
        if key.len() < 6 || !value.is_finite() {
            continue;
        }
        let bucket = sums.entry(key[..6].to_string()).or_insert((0.0, 0));
        bucket.0 += value;
        bucket.1 += 1;
    }
    Series::from_points(
        Granularity::Monthly,
        sums.into_iter()
            .map(|(month, (sum, count))| (month, sum / f64::from(count))),
    )
}

/// Collapse daily `(day_key, value)` entries into monthly buckets by sum.
///
/// Grouping and the skip rule for non-finite values match [`monthly_mean`].
pub fn monthly_sum<'a, I>(entries: I) -> Series
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut sums: HashMap<String, f64> = HashMap::new();
    for (key, value) in entries {
        if key.len() < 6 || !value.is_finite() {
            continue;
        }
        *sums.entry(key[..6].to_string()).or_insert(0.0) += value;
    }
    Series::from_points(Granularity::Monthly, sums)
}

/// First differences of a chronologically sorted cumulative counter.
///
/// Each output entry carries the later key of its pair, so the result is one
/// entry shorter than the input. Negative differences are data corrections
/// upstream and are clamped to zero rather than propagated.
#[must_use]
pub fn diff_cumulative(entries: &[(String, f64)]) -> Vec<(String, f64)> {
    entries
        .windows(2)
        .map(|w| {
            let delta = w[1].1 - w[0].1;
            (w[1].0.clone(), if delta < 0.0 { 0.0 } else { delta })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<(String, f64)> {
        vec![
            ("20240101".to_string(), 10.0),
            ("20240115".to_string(), 20.0),
            ("20240131".to_string(), 30.0),
        ]
    }

    fn as_refs(v: &[(String, f64)]) -> impl Iterator<Item = (&str, f64)> {
        v.iter().map(|(k, x)| (k.as_str(), *x))
    }

    #[test]
    fn mean_divides_by_included_entries_only() {
        let s = monthly_mean(as_refs(&entries()));
        assert_eq!(s.granularity(), Granularity::Monthly);
        assert_eq!(s.get("202401"), Some(20.0));
    }

    #[test]
    fn sum_totals_the_bucket() {
        let s = monthly_sum(as_refs(&entries()));
        assert_eq!(s.get("202401"), Some(60.0));
    }

    #[test]
    fn non_finite_values_are_skipped_not_zeroed() {
        let v = vec![
            ("20240101".to_string(), 10.0),
            ("20240102".to_string(), f64::NAN),
            ("20240103".to_string(), 30.0),
        ];
        let s = monthly_mean(as_refs(&v));
        // Mean over the two finite entries, not three.
        assert_eq!(s.get("202401"), Some(20.0));
        let s = monthly_sum(as_refs(&v));
        assert_eq!(s.get("202401"), Some(40.0));
    }

    #[test]
    fn buckets_split_on_month_prefix() {
        let v = vec![
            ("20240131".to_string(), 1.0),
            ("20240201".to_string(), 5.0),
        ];
        let s = monthly_sum(as_refs(&v));
        assert_eq!(s.get("202401"), Some(1.0));
        assert_eq!(s.get("202402"), Some(5.0));
    }

    #[test]
    fn diff_clamps_corrections_and_drops_one_point() {
        let v = vec![
            ("20240101".to_string(), 5.0),
            ("20240102".to_string(), 5.0),
            ("20240103".to_string(), 8.0),
            ("20240104".to_string(), 6.0),
        ];
        let deltas = diff_cumulative(&v);
        assert_eq!(deltas, vec![
            ("20240102".to_string(), 0.0),
            ("20240103".to_string(), 3.0),
            ("20240104".to_string(), 0.0),
        ]);
    }

    #[test]
    fn diff_of_short_input_is_empty() {
        assert!(diff_cumulative(&[]).is_empty());
        assert!(diff_cumulative(&[("20240101".to_string(), 1.0)]).is_empty());
    }
}

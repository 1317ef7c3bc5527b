use std::collections::BTreeSet;

use covary_core::{CovaryError, Granularity, Series, align, intersect_keys};
use proptest::prelude::*;

fn arb_month_key() -> impl Strategy<Value = String> {
    (2015i32..2026, 1u32..=12).prop_map(|(y, m)| format!("{y:04}{m:02}"))
}

fn arb_series() -> impl Strategy<Value = Series> {
    prop::collection::hash_map(arb_month_key(), -1.0e6f64..1.0e6, 0..40)
        .prop_map(|points| Series::from_points(Granularity::Monthly, points))
}

proptest! {
    #[test]
    fn intersection_is_sorted_and_exact(a in arb_series(), b in arb_series()) {
        let keys = intersect_keys(&a, &b);

        // Strictly increasing (also implies uniqueness).
        for w in keys.windows(2) {
            prop_assert!(w[0] < w[1]);
        }

        // Exactly sort(keys(a) ∩ keys(b)).
        let expect: BTreeSet<&str> = a.keys().filter(|k| b.contains_key(k)).collect();
        let got: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
        prop_assert_eq!(got, expect);
    }

    #[test]
    fn align_zips_values_by_key(a in arb_series(), b in arb_series()) {
        match align(&a, &b) {
            Ok(pair) => {
                prop_assert!(pair.len() >= 3);
                prop_assert_eq!(pair.xs.len(), pair.keys.len());
                prop_assert_eq!(pair.ys.len(), pair.keys.len());
                for (i, k) in pair.keys.iter().enumerate() {
                    prop_assert_eq!(Some(pair.xs[i]), a.get(k));
                    prop_assert_eq!(Some(pair.ys[i]), b.get(k));
                }
            }
            Err(CovaryError::InsufficientOverlap { found }) => {
                prop_assert_eq!(found, intersect_keys(&a, &b).len());
                prop_assert!(found < 3);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
        }
    }

    #[test]
    fn align_is_symmetric_in_keys(a in arb_series(), b in arb_series()) {
        prop_assert_eq!(intersect_keys(&a, &b), intersect_keys(&b, &a));
    }
}

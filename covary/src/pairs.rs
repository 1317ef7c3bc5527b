use std::collections::HashSet;

use rand::Rng;

use covary_core::{CovaryError, Granularity, SeriesSpec};

/// Two specs drawn from the pool for one correlation attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPair {
    /// First series of the pair.
    pub a: SeriesSpec,
    /// Second series of the pair.
    pub b: SeriesSpec,
}

/// How many draws to attempt per requested pair before giving up.
const DRAW_CAP_FACTOR: usize = 64;

/// Draw `count` distinct pairs of specs from `pool`.
///
/// A spec never pairs with itself, and two pairs covering the same two
/// labels count as duplicates regardless of order. Rejected draws are
/// retried; if `pool` cannot yield `count` distinct pairs within a bounded
/// number of draws the whole call fails rather than spinning forever.
pub fn generate_pairs<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[SeriesSpec],
    count: usize,
) -> Result<Vec<SpecPair>, CovaryError> {
    if pool.len() < 2 {
        return Err(CovaryError::invalid_arg(
            "pair pool must contain at least two specs",
        ));
    }

    let cap = DRAW_CAP_FACTOR * count.max(1);
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut pairs = Vec::with_capacity(count);
    let mut draws = 0usize;

    while pairs.len() < count {
        if draws >= cap {
            return Err(CovaryError::invalid_arg(format!(
                "could not draw {count} distinct pairs from a pool of {} specs",
                pool.len()
            )));
        }
        draws += 1;

        let a = &pool[rng.random_range(0..pool.len())];
        let b = &pool[rng.random_range(0..pool.len())];
        let (label_a, label_b) = (a.label(), b.label());
        if label_a == label_b {
            continue;
        }
        let key = if label_a <= label_b {
            (label_a, label_b)
        } else {
            (label_b, label_a)
        };
        if !seen.insert(key) {
            continue;
        }
        pairs.push(SpecPair {
            a: a.clone(),
            b: b.clone(),
        });
    }

    Ok(pairs)
}

/// Granularity a pair can actually be fetched at.
///
/// Daily resolution is only kept when both providers serve it; otherwise
/// the pair drops to monthly, which every provider supports.
#[must_use]
pub fn effective_granularity(
    a: &SeriesSpec,
    b: &SeriesSpec,
    requested: Granularity,
) -> Granularity {
    let narrowed = a.granularity_support().effective(requested);
    b.granularity_support().effective(narrowed)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn pool() -> Vec<SeriesSpec> {
        vec![
            SeriesSpec::pageviews("Beekeeping"),
            SeriesSpec::pageviews("Banana bread"),
            SeriesSpec::exchange_rate("USD", "EUR"),
            SeriesSpec::scholarly("kombucha"),
            SeriesSpec::earthquakes(5.0),
        ]
    }

    #[test]
    fn draws_requested_number_of_distinct_pairs() {
        let mut rng = StdRng::seed_from_u64(7);
        let pairs = generate_pairs(&mut rng, &pool(), 4).unwrap();
        assert_eq!(pairs.len(), 4);

        let mut keys = HashSet::new();
        for pair in &pairs {
            let (la, lb) = (pair.a.label(), pair.b.label());
            assert_ne!(la, lb);
            let key = if la <= lb { (la, lb) } else { (lb, la) };
            assert!(keys.insert(key), "duplicate label pair");
        }
    }

    #[test]
    fn same_seed_same_pairs() {
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        assert_eq!(
            generate_pairs(&mut rng_a, &pool(), 3).unwrap(),
            generate_pairs(&mut rng_b, &pool(), 3).unwrap()
        );
    }

    #[test]
    fn zero_count_returns_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_pairs(&mut rng, &pool(), 0).unwrap().is_empty());
    }

    #[test]
    fn pool_of_one_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = vec![SeriesSpec::earthquakes(5.0)];
        let err = generate_pairs(&mut rng, &pool, 1).unwrap_err();
        assert!(matches!(err, CovaryError::InvalidArg(_)));
    }

    #[test]
    fn impossible_count_fails_instead_of_spinning() {
        let mut rng = StdRng::seed_from_u64(1);
        // Two specs admit exactly one unordered label pair.
        let pool = vec![
            SeriesSpec::pageviews("Cat"),
            SeriesSpec::pageviews("Chess"),
        ];
        let err = generate_pairs(&mut rng, &pool, 2).unwrap_err();
        assert!(matches!(err, CovaryError::InvalidArg(_)));
    }

    #[test]
    fn daily_survives_only_when_both_sides_support_it() {
        let daily_a = SeriesSpec::pageviews("Cat");
        let daily_b = SeriesSpec::earthquakes(5.0);
        let monthly_only = SeriesSpec::scholarly("astrology");

        assert_eq!(
            effective_granularity(&daily_a, &daily_b, Granularity::Daily),
            Granularity::Daily
        );
        assert_eq!(
            effective_granularity(&daily_a, &monthly_only, Granularity::Daily),
            Granularity::Monthly
        );
        assert_eq!(
            effective_granularity(&daily_a, &daily_b, Granularity::Monthly),
            Granularity::Monthly
        );
    }
}

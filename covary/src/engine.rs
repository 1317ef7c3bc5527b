use std::sync::Arc;

use chrono::NaiveDate;
use rand::Rng;

use covary_core::{
    CovaryError, FetchWindow, Granularity, LinearFit, MAX_MONTHS_BACK, MIN_MONTHS_BACK,
    ProviderAdapter, SeriesSpec, align, linear_fit, pearson_r,
};

use crate::pairs::{SpecPair, effective_granularity, generate_pairs};
use crate::pool::default_pool;
use crate::registry::ProviderSet;

/// Everything known about one successfully correlated pair.
#[derive(Debug, Clone)]
pub struct Correlation {
    /// Human-readable label of series A.
    pub label_a: String,
    /// Human-readable label of series B.
    pub label_b: String,
    /// Upstream URL series A was fetched from.
    pub source_a: String,
    /// Upstream URL series B was fetched from.
    pub source_b: String,
    /// Granularity the pair was actually fetched at.
    pub granularity: Granularity,
    /// Sorted time keys shared by both series.
    pub keys: Vec<String>,
    /// Values of series A at `keys`.
    pub xs: Vec<f64>,
    /// Values of series B at `keys`.
    pub ys: Vec<f64>,
    /// Pearson correlation coefficient; NaN when undefined.
    pub r: f64,
    /// Least-squares line through the aligned points.
    pub fit: LinearFit,
}

/// Result of one pair in a batch run. A failed pair never aborts the batch.
#[derive(Debug)]
pub enum PairOutcome {
    /// The pair was fetched, aligned, and scored.
    Correlated(Correlation),
    /// The pair could not be scored; the other pairs are unaffected.
    Failed {
        /// Label of series A.
        label_a: String,
        /// Label of series B.
        label_b: String,
        /// Why the pair failed.
        error: CovaryError,
    },
}

/// Builder for a [`Covary`] engine.
pub struct CovaryBuilder {
    providers: ProviderSet,
    pool: Vec<SeriesSpec>,
    months_back: u32,
    granularity: Granularity,
    pair_count: usize,
    today: Option<NaiveDate>,
}

impl Default for CovaryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CovaryBuilder {
    /// Builder with the production adapters, the built-in pool, a two-year
    /// monthly window, and eight pairs per batch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: ProviderSet::defaults(),
            pool: default_pool(),
            months_back: 24,
            granularity: Granularity::Monthly,
            pair_count: 8,
            today: None,
        }
    }

    /// Replace one provider adapter, keyed by the adapter's own id.
    #[must_use]
    pub fn with_adapter(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.providers = self.providers.with_adapter(adapter);
        self
    }

    /// Replace the spec pool used by [`Covary::run_batch`].
    #[must_use]
    pub fn pool(mut self, pool: Vec<SeriesSpec>) -> Self {
        self.pool = pool;
        self
    }

    /// Lookback window in whole months, silently clamped to
    /// [`MIN_MONTHS_BACK`]..=[`MAX_MONTHS_BACK`].
    #[must_use]
    pub const fn months_back(mut self, months_back: u32) -> Self {
        self.months_back = months_back;
        self
    }

    /// Requested granularity; pairs involving a monthly-only provider
    /// drop to monthly regardless.
    #[must_use]
    pub const fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// How many pairs [`Covary::run_batch`] draws.
    #[must_use]
    pub const fn pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Fix the reference date standing in for "now", for reproducible runs.
    #[must_use]
    pub const fn anchor_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Finish the builder.
    #[must_use]
    pub fn build(self) -> Covary {
        Covary {
            providers: self.providers,
            pool: self.pool,
            months_back: self.months_back.clamp(MIN_MONTHS_BACK, MAX_MONTHS_BACK),
            granularity: self.granularity,
            pair_count: self.pair_count,
            today: self.today,
        }
    }
}

/// Engine that fetches pairs of unrelated series and scores how well
/// they correlate.
pub struct Covary {
    providers: ProviderSet,
    pool: Vec<SeriesSpec>,
    months_back: u32,
    granularity: Granularity,
    pair_count: usize,
    today: Option<NaiveDate>,
}

impl Covary {
    /// Start building an engine.
    #[must_use]
    pub fn builder() -> CovaryBuilder {
        CovaryBuilder::new()
    }

    /// Effective lookback window after clamping.
    #[must_use]
    pub const fn months_back(&self) -> u32 {
        self.months_back
    }

    /// Requested granularity.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    fn window(&self, granularity: Granularity) -> FetchWindow {
        match self.today {
            Some(today) => FetchWindow::anchored(today, self.months_back, granularity),
            None => FetchWindow::new(self.months_back, granularity),
        }
    }

    /// Fetch, align, and score one pair of series.
    ///
    /// Both series are fetched concurrently. Fails if either fetch fails
    /// or if fewer than three time keys overlap.
    pub async fn correlate(
        &self,
        a: &SeriesSpec,
        b: &SeriesSpec,
    ) -> Result<Correlation, CovaryError> {
        let granularity = effective_granularity(a, b, self.granularity);
        let window = self.window(granularity);

        let adapter_a = self.providers.adapter_for(a.provider());
        let adapter_b = self.providers.adapter_for(b.provider());
        tracing::debug!(
            label_a = %a.label(),
            label_b = %b.label(),
            %granularity,
            "correlating pair"
        );
        let (series_a, series_b) =
            tokio::try_join!(adapter_a.fetch(a, &window), adapter_b.fetch(b, &window))?;

        let aligned = align(&series_a, &series_b)?;
        let r = pearson_r(&aligned.xs, &aligned.ys);
        let fit = linear_fit(&aligned.xs, &aligned.ys);

        Ok(Correlation {
            label_a: a.label(),
            label_b: b.label(),
            source_a: a.source_url(),
            source_b: b.source_url(),
            granularity,
            keys: aligned.keys,
            xs: aligned.xs,
            ys: aligned.ys,
            r,
            fit,
        })
    }

    /// Score a fixed list of pairs, one after another.
    ///
    /// Each pair fails or succeeds on its own; a failure is logged and
    /// recorded in its slot of the output.
    pub async fn run_pairs(&self, pairs: &[SpecPair]) -> Vec<PairOutcome> {
        let mut outcomes = Vec::with_capacity(pairs.len());
        for pair in pairs {
            match self.correlate(&pair.a, &pair.b).await {
                Ok(correlation) => outcomes.push(PairOutcome::Correlated(correlation)),
                Err(error) => {
                    tracing::warn!(
                        label_a = %pair.a.label(),
                        label_b = %pair.b.label(),
                        %error,
                        "pair failed"
                    );
                    outcomes.push(PairOutcome::Failed {
                        label_a: pair.a.label(),
                        label_b: pair.b.label(),
                        error,
                    });
                }
            }
        }
        outcomes
    }

    /// Draw random pairs from the pool and score them.
    ///
    /// Fails only when the pool itself cannot yield enough distinct pairs;
    /// individual pair failures land in the output as
    /// [`PairOutcome::Failed`].
    pub async fn run_batch<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<PairOutcome>, CovaryError> {
        let pairs = generate_pairs(rng, &self.pool, self.pair_count)?;
        Ok(self.run_pairs(&pairs).await)
    }
}

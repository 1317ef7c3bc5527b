use async_trait::async_trait;

use crate::CovaryError;
use crate::types::{FetchWindow, GranularitySupport, ProviderId, Series, SeriesSpec};

/// Contract implemented by each upstream adapter.
///
/// An adapter owns request construction and response parsing for exactly one
/// upstream; nothing about upstream schemas leaks past the normalized
/// [`Series`] it returns. A fetch that matches zero entries returns an empty
/// series, not an error; insufficiency is detected later by the aligner.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which provider this adapter serves.
    fn id(&self) -> ProviderId;

    /// Granularities the upstream can natively serve.
    ///
    /// Defaults to the static descriptor for [`Self::id`]; adapters normally
    /// have no reason to override this.
    fn support(&self) -> GranularitySupport {
        self.id().granularity_support()
    }

    /// Fetch and normalize one series for `spec` over `window`.
    ///
    /// The spec is guaranteed by the dispatching registry to belong to this
    /// adapter's provider. The window's granularity has already been
    /// downgraded to something [`Self::support`] allows.
    ///
    /// # Errors
    /// `CovaryError::Fetch` when the upstream call does not succeed, and
    /// `CovaryError::Data` when the payload decodes but lacks required
    /// fields. Callers do not retry.
    async fn fetch(&self, spec: &SeriesSpec, window: &FetchWindow)
    -> Result<Series, CovaryError>;
}

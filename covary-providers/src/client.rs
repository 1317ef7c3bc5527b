use covary_core::CovaryError;
use serde::de::DeserializeOwned;
use url::Url;

const USER_AGENT: &str = concat!(
    "covary/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/covary-rs/covary)"
);

/// Thin wrapper around a shared `reqwest::Client`.
///
/// All adapters speak plain JSON over GET, so the only HTTP logic in the
/// workspace lives here: send, map transport failures and non-success
/// statuses to [`CovaryError::Fetch`], and decode the body.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Build a client with the recommended user agent.
    ///
    /// # Panics
    /// Panics if the underlying `reqwest::Client` cannot be constructed,
    /// which is unexpected in normal environments.
    #[must_use]
    pub fn new() -> Self {
        let inner = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build reqwest client");
        Self { inner }
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub const fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// GET `url` and decode the JSON body into `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        provider: &'static str,
        url: Url,
    ) -> Result<T, CovaryError> {
        tracing::debug!(provider, %url, "fetching");
        let res = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| CovaryError::fetch(provider, e.to_string()))?;
        let status = res.status();
        if !status.is_success() {
            return Err(CovaryError::http_status(provider, status.as_u16()));
        }
        res.json::<T>()
            .await
            .map_err(|e| CovaryError::data(format!("{provider}: {e}")))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

use std::time::Duration;

use reqwest::Client;
use tokenbook_core::models::TokenData;
use url::Url;

use crate::error::FetchError;
use crate::traits::TokenSource;

/// Fetches the token document over HTTP(S).
pub struct HttpSource {
    url: Url,
    http: Client,
}

impl HttpSource {
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            url,
            http: builder.build()?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, FetchError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "token fetch returned an error status");
            Err(FetchError::Status {
                status,
                message: body.trim().to_string(),
            })
        }
    }
}

impl TokenSource for HttpSource {
    type Error = FetchError;

    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<TokenData, FetchError> {
        tracing::info!(url = %self.url, "fetching tokens");
        let resp = self.http.get(self.url.clone()).send().await?;
        let resp = Self::check_response(resp).await?;
        let body = resp.bytes().await?;
        tracing::debug!(bytes = body.len(), "token document received");

        TokenData::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

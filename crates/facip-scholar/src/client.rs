//! HTTP side of the extractor: one bounded GET per call, then parsing on the
//! blocking pool.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use facip_core::ScholarSettings;
use reqwest::Client;

use crate::error::ScholarError;
use crate::markers::{ProfileMarkers, ProfileSelectors};
use crate::parse::parse_profile;
use crate::types::ProfileRecord;

/// Fetches and extracts researcher profile pages.
///
/// Holds no per-call state. The inner `reqwest::Client` and compiled markers
/// are shared, so a single instance (or clones of it) can serve any number of
/// concurrent extractions. There are no retries: each call makes exactly one
/// request and the caller owns any retry policy.
#[derive(Debug, Clone)]
pub struct ScholarClient {
    client: Client,
    selectors: Arc<ProfileSelectors>,
    timeout_secs: u64,
}

impl ScholarClient {
    /// Creates a client using the default Google Scholar markers.
    ///
    /// # Errors
    ///
    /// Returns [`ScholarError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScholarError> {
        Self::with_markers(timeout_secs, user_agent, &ProfileMarkers::default())
    }

    /// Creates a client from application settings.
    ///
    /// # Errors
    ///
    /// Same as [`ScholarClient::new`].
    pub fn from_settings(settings: &ScholarSettings) -> Result<Self, ScholarError> {
        Self::new(settings.request_timeout_secs, &settings.user_agent)
    }

    /// Creates a client that locates fields with custom markers.
    ///
    /// # Errors
    ///
    /// - [`ScholarError::InvalidMarker`] if a marker is not valid CSS.
    /// - [`ScholarError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn with_markers(
        timeout_secs: u64,
        user_agent: &str,
        markers: &ProfileMarkers,
    ) -> Result<Self, ScholarError> {
        let selectors = ProfileSelectors::compile(markers)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            selectors: Arc::new(selectors),
            timeout_secs,
        })
    }

    /// Extracts the profile at `profile_url`.
    ///
    /// Always returns a record. Network errors, non-2xx statuses, timeouts,
    /// and a panic while parsing all come back as the failure variant with
    /// the cause in `error`. Must be called from within a Tokio runtime.
    pub async fn extract(&self, profile_url: &str) -> ProfileRecord {
        match self.try_extract(profile_url).await {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(url = %profile_url, error = %err, "scholar profile extraction failed");
                failure_record(&err, profile_url)
            }
        }
    }

    /// Fetches the raw page body.
    ///
    /// # Errors
    ///
    /// - [`ScholarError::Timeout`] — no complete response within the timeout.
    /// - [`ScholarError::UnexpectedStatus`] — any non-2xx status.
    /// - [`ScholarError::Http`] — malformed URL, DNS, connect, or TLS failure.
    pub async fn fetch_html(&self, profile_url: &str) -> Result<String, ScholarError> {
        let response = self
            .client
            .get(profile_url)
            .send()
            .await
            .map_err(|e| self.classify(profile_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScholarError::UnexpectedStatus {
                status: status.as_u16(),
                url: profile_url.to_owned(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| self.classify(profile_url, e))
    }

    async fn try_extract(&self, profile_url: &str) -> Result<ProfileRecord, ScholarError> {
        let html = self.fetch_html(profile_url).await?;
        tracing::debug!(url = %profile_url, bytes = html.len(), "fetched scholar profile page");

        let selectors = Arc::clone(&self.selectors);
        let source_url = profile_url.to_owned();
        tokio::task::spawn_blocking(move || {
            parse_profile(&html, &source_url, Utc::now(), &selectors)
        })
        .await
        .map_err(aborted)
    }

    fn classify(&self, profile_url: &str, err: reqwest::Error) -> ScholarError {
        if err.is_timeout() {
            ScholarError::Timeout {
                url: profile_url.to_owned(),
                timeout_secs: self.timeout_secs,
            }
        } else {
            ScholarError::Http(err)
        }
    }
}

/// Extracts `profile_url` with default settings (10 s timeout, browser user
/// agent, Google Scholar markers).
///
/// Total like [`ScholarClient::extract`]: if the client itself cannot be
/// built, the failure record says so.
pub async fn extract_profile(profile_url: &str) -> ProfileRecord {
    match ScholarClient::from_settings(&ScholarSettings::default()) {
        Ok(client) => client.extract(profile_url).await,
        Err(err) => {
            tracing::error!(error = %err, "could not build scholar client");
            failure_record(&err, profile_url)
        }
    }
}

/// Maps a parsing task that panicked or was cancelled to a typed error.
fn aborted(err: tokio::task::JoinError) -> ScholarError {
    ScholarError::ExtractionAborted(err.to_string())
}

fn failure_record(err: &ScholarError, profile_url: &str) -> ProfileRecord {
    ProfileRecord::failed(
        format!("Failed to scrape Google Scholar profile: {err}"),
        profile_url,
        Utc::now(),
    )
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

//! The fetch → filter → deliver → sleep loop.
//!
//! A [`Poller`] owns all mutable state of one loop (credential, [`SeenSet`],
//! [`Watermark`], HTTP client). Nothing is shared between loops, so many
//! pollers can run side by side on one runtime without locking.

pub mod seen;
pub mod sink;
pub mod window;

pub use seen::SeenSet;
pub use sink::EventSink;
pub use window::{default_query, Watermark};

use chrono::Utc;
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::auth::{Authenticator, Credential};
use crate::config::PollConfig;
use crate::error::{PollerError, Result};
use crate::http::{bearer_headers, build_client};
use crate::types::{Event, EventsPage};

/// Result of one request to the events endpoint.
#[derive(Debug)]
pub enum FetchOutcome {
    /// 200 with a well-formed page, in API order.
    Events(Vec<Event>),
    /// 401: the credential expired and must be refreshed.
    AuthExpired,
    /// Any other status.
    Fatal(StatusCode),
}

/// What one completed cycle did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Events on the page returned by the API.
    pub fetched: usize,
    /// Events handed to the sink.
    pub delivered: usize,
    /// Credential refreshes triggered by 401 before the page was fetched.
    pub auth_refreshes: u32,
}

/// Polls the notifications API and forwards new events to a sink.
///
/// # Example
/// ```no_run
/// use hcc_events::config::PollConfig;
/// use hcc_events::poller::Poller;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> hcc_events::error::Result<()> {
/// let config = PollConfig::from_env()?;
/// let (tx, mut rx) = tokio::sync::mpsc::channel::<hcc_events::types::Event>(64);
/// tokio::spawn(async move {
///     while let Some(event) = rx.recv().await {
///         println!("{}", event.id());
///     }
/// });
/// Poller::new(config, tx)?.run(CancellationToken::new()).await
/// # }
/// ```
pub struct Poller<S> {
    config: PollConfig,
    client: reqwest::Client,
    authenticator: Authenticator,
    sink: S,
    seen: SeenSet,
    watermark: Watermark,
    credential: Option<Credential>,
}

impl<S: EventSink> Poller<S> {
    /// Build a poller with a fresh client, an empty [`SeenSet`] and today's watermark.
    pub fn new(config: PollConfig, sink: S) -> Result<Self> {
        let client = build_client(&config)?;
        let authenticator = Authenticator::new(client.clone(), config.auth().clone());
        Ok(Self {
            config,
            client,
            authenticator,
            sink,
            seen: SeenSet::new(),
            watermark: Watermark::today(),
            credential: None,
        })
    }

    pub fn with_watermark(mut self, watermark: Watermark) -> Self {
        self.watermark = watermark;
        self
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    pub fn watermark(&self) -> &Watermark {
        &self.watermark
    }

    /// Replace the held credential with a newly obtained one.
    pub async fn refresh_credential(&mut self) -> Result<()> {
        let credential = self.authenticator.obtain_credential().await?;
        self.credential = Some(credential);
        Ok(())
    }

    /// Query string for the next request: the configured one, or today's window.
    fn query(&self) -> String {
        match self.config.query() {
            Some(query) => query.to_string(),
            None => default_query(Utc::now().date_naive()),
        }
    }

    /// Issue one GET against the events endpoint with `credential`.
    pub async fn fetch(&self, credential: &Credential) -> Result<FetchOutcome> {
        let url = format!("{}?{}", self.config.events_url(), self.query());
        let resp = self
            .client
            .get(&url)
            .headers(bearer_headers(credential)?)
            .send()
            .await?;
        match resp.status() {
            StatusCode::OK => {
                let body = resp.bytes().await?;
                let page: EventsPage = serde_json::from_slice(&body).map_err(|e| {
                    PollerError::MalformedResponse(format!("events response: {e}"))
                })?;
                Ok(FetchOutcome::Events(page.into_events()?))
            }
            StatusCode::UNAUTHORIZED => Ok(FetchOutcome::AuthExpired),
            status => Ok(FetchOutcome::Fatal(status)),
        }
    }

    /// Deliver every event that is on or after the watermark and not yet seen.
    ///
    /// Ids are recorded before delivery; API order is preserved.
    pub async fn process(&mut self, events: Vec<Event>) -> Result<usize> {
        let mut delivered = 0;
        for event in events {
            if !self.watermark.admits(event.created()) {
                continue;
            }
            if !self.seen.insert(event.id().clone()) {
                continue;
            }
            self.sink.enqueue(event).await?;
            delivered += 1;
        }
        Ok(delivered)
    }

    /// One FETCHING step: fetch (refreshing on 401 without sleeping), then process.
    pub async fn poll_once(&mut self) -> Result<CycleReport> {
        let mut auth_refreshes = 0u32;
        loop {
            let credential = match self.credential.clone() {
                Some(credential) => credential,
                None => {
                    self.refresh_credential().await?;
                    continue;
                }
            };
            match self.fetch(&credential).await? {
                FetchOutcome::Events(events) => {
                    let fetched = events.len();
                    let delivered = self.process(events).await?;
                    return Ok(CycleReport {
                        fetched,
                        delivered,
                        auth_refreshes,
                    });
                }
                FetchOutcome::AuthExpired => {
                    if self.authenticator.mode().is_static() {
                        return Err(PollerError::Authentication(
                            "static token rejected with status 401".to_string(),
                        ));
                    }
                    if let Some(limit) = self.config.max_auth_refreshes() {
                        if auth_refreshes >= limit {
                            return Err(PollerError::AuthRejected {
                                attempts: auth_refreshes,
                            });
                        }
                    }
                    auth_refreshes += 1;
                    tracing::debug!(attempt = auth_refreshes, "credential expired, refreshing");
                    self.refresh_credential().await?;
                }
                FetchOutcome::Fatal(status) => {
                    return Err(PollerError::UnexpectedStatus {
                        status: status.as_u16(),
                    });
                }
            }
        }
    }

    async fn poll_forever(&mut self) -> PollerError {
        if let Err(e) = self.refresh_credential().await {
            return e;
        }
        loop {
            match self.poll_once().await {
                Ok(report) => tracing::debug!(
                    fetched = report.fetched,
                    delivered = report.delivered,
                    auth_refreshes = report.auth_refreshes,
                    seen = self.seen.len(),
                    "poll cycle complete"
                ),
                Err(e) => return e,
            }
            tokio::time::sleep(self.config.interval()).await;
        }
    }

    /// Run until `cancel` fires or a fatal error occurs.
    ///
    /// Cancellation drops whatever request or sleep is in flight and returns
    /// `Ok(())`. The HTTP client is released when the poller is dropped.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<()> {
        tracing::info!(
            instance = self.config.instance(),
            interval_secs = self.config.interval().as_secs(),
            watermark = %self.watermark.date(),
            "starting events poller"
        );
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Ok(()),
            error = self.poll_forever() => Err(error),
        };
        match &result {
            Ok(()) => tracing::info!(seen = self.seen.len(), "events poller cancelled"),
            Err(e) => tracing::debug!(
                error = %e,
                category = ?e.category(),
                fatal = e.is_fatal(),
                "events poller stopped"
            ),
        }
        result
    }
}

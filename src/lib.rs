//! hcc-events — bridge the Hybrid Cloud Console notifications API into an event stream.
//!
//! A [`poller::Poller`] periodically fetches the events endpoint, drops events
//! older than the day polling began or already delivered, and enqueues the
//! rest on an [`poller::EventSink`]. Bearer credentials come from a static
//! token or an OAuth2 client-credentials grant and are refreshed on 401.
//!
//! # Quick Start
//!
//! ```no_run
//! use hcc_events::prelude::*;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> hcc_events::error::Result<()> {
//! let config = PollConfig::from_env()?;
//! let (tx, mut rx) = tokio::sync::mpsc::channel::<Event>(64);
//! let cancel = CancellationToken::new();
//! let poller = tokio::spawn(Poller::new(config, tx)?.run(cancel.clone()));
//! while let Some(event) = rx.recv().await {
//!     println!("{}", serde_json::to_string(&event)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod poller;
pub mod prelude;
pub mod types;

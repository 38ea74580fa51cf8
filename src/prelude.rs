//! Convenience re-exports for common use.

pub use crate::auth::{AuthMode, Authenticator, Credential};
pub use crate::config::PollConfig;
pub use crate::error::{PollerError, Result};
pub use crate::poller::{CycleReport, EventSink, FetchOutcome, Poller, SeenSet, Watermark};
pub use crate::types::{Event, EventId};

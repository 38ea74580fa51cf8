//! Bearer credential acquisition: static tokens and OAuth2 client-credentials grants.

pub mod authenticator;
pub mod error;
pub mod token;

pub use authenticator::{AuthMode, Authenticator, API_SCOPE};
pub use error::AuthError;
pub use token::Credential;

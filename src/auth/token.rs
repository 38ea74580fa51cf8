use std::fmt;

/// Opaque bearer credential presented to the notifications API.
///
/// Expiry is not tracked; it is discovered when the API answers 401.
/// A refresh replaces the whole value.
///
/// # Example
/// ```
/// use hcc_events::auth::Credential;
///
/// let credential = Credential::new("abc");
/// assert_eq!(credential.bearer_header(), "Bearer abc");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}

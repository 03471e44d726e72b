//! Credential port: where the service API key comes from.

/// Supplies the API key at call time.
pub trait CredentialProvider: Send + Sync {
    /// The key, if one is available right now.
    fn api_key(&self) -> Option<String>;

    /// Name of the environment variable to mention when the key is missing.
    fn env_var(&self) -> &str {
        "GEMINI_API_KEY"
    }
}

/// A fixed key (or none), for replay mode and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(pub Option<String>);

impl StaticCredentials {
    /// Credentials that always yield `key`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    /// Credentials that never yield a key.
    #[cfg(test)]
    #[must_use]
    pub fn missing() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.0.clone()
    }
}

//! Credentials read from the process environment, with a config file fallback.

use crate::ports::credentials::CredentialProvider;

/// Primary environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Secondary variable, the name the hosted front end used.
pub const FALLBACK_API_KEY_VAR: &str = "API_KEY";

/// Looks up the API key in the environment on every call.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials {
    file_key: Option<String>,
}

impl EnvCredentials {
    /// Environment lookup falling back to a key from the config file.
    #[must_use]
    pub fn new(file_key: Option<String>) -> Self {
        Self { file_key }
    }
}

impl CredentialProvider for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        [GEMINI_API_KEY_VAR, FALLBACK_API_KEY_VAR]
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .or_else(|| self.file_key.clone().filter(|v| !v.trim().is_empty()))
    }

    fn env_var(&self) -> &str {
        GEMINI_API_KEY_VAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns both variables so parallel tests never race on them.
    #[test]
    fn lookup_order_and_blank_values() {
        let credentials = EnvCredentials::new(Some("from-file".into()));

        std::env::remove_var(GEMINI_API_KEY_VAR);
        std::env::remove_var(FALLBACK_API_KEY_VAR);
        assert_eq!(credentials.api_key().as_deref(), Some("from-file"));

        std::env::set_var(FALLBACK_API_KEY_VAR, "from-api-key");
        assert_eq!(credentials.api_key().as_deref(), Some("from-api-key"));

        std::env::set_var(GEMINI_API_KEY_VAR, "from-gemini");
        assert_eq!(credentials.api_key().as_deref(), Some("from-gemini"));

        std::env::set_var(GEMINI_API_KEY_VAR, "   ");
        assert_eq!(credentials.api_key().as_deref(), Some("from-api-key"));

        std::env::set_var(FALLBACK_API_KEY_VAR, "  ");
        assert_eq!(credentials.api_key().as_deref(), Some("from-file"));

        assert_eq!(EnvCredentials::new(Some(" ".into())).api_key(), None);
        assert_eq!(EnvCredentials::default().api_key(), None);

        std::env::remove_var(GEMINI_API_KEY_VAR);
        std::env::remove_var(FALLBACK_API_KEY_VAR);
    }
}

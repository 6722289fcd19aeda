//! Client credential management for the Sbanken identity server.

use secrecy::{ExposeSecret, SecretString};

use crate::config::Config;

/// OAuth client credentials containing the client id and secret.
#[derive(Clone)]
pub struct Credentials {
    /// The client id (public identifier)
    pub client_id: String,
    /// The client secret (private, used for the Basic authorization)
    client_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from a client id and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }

    /// Get the client secret.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }
}

impl From<&Config> for Credentials {
    fn from(config: &Config) -> Self {
        Self::new(config.client_id.clone(), config.expose_client_secret())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing client credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(client_id, client_secret),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `SBANKEN_CLIENT_ID` and `SBANKEN_CLIENT_SECRET`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Default environment variable holding the client id.
    pub const CLIENT_ID_VAR: &'static str = "SBANKEN_CLIENT_ID";
    /// Default environment variable holding the client secret.
    pub const CLIENT_SECRET_VAR: &'static str = "SBANKEN_CLIENT_SECRET";

    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if the environment variables are not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(Self::CLIENT_ID_VAR, Self::CLIENT_SECRET_VAR)
    }

    /// Try to create credentials from custom environment variable names.
    ///
    /// Returns `None` if the environment variables are not set.
    pub fn try_from_env_vars(id_var: &str, secret_var: &str) -> Option<Self> {
        let client_id = std::env::var(id_var).ok()?;
        let client_secret = std::env::var(secret_var).ok()?;

        Some(Self {
            credentials: Credentials::new(client_id, client_secret),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("my_client", "super_secret");
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("my_client"));
        assert!(!debug_str.contains("super_secret"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_static_credentials() {
        let provider = StaticCredentials::new("client", "secret");
        let creds = provider.get_credentials();
        assert_eq!(creds.client_id, "client");
        assert_eq!(creds.expose_secret(), "secret");
    }

    #[test]
    fn test_env_credentials_missing_vars() {
        assert!(
            EnvCredentials::try_from_env_vars("SBANKEN_TEST_UNSET_ID", "SBANKEN_TEST_UNSET_SECRET")
                .is_none()
        );
    }

    #[test]
    fn test_credentials_from_config() {
        let config = Config::new("cfg_client", "cfg_secret");
        let creds = Credentials::from(&config);
        assert_eq!(creds.client_id, "cfg_client");
        assert_eq!(creds.expose_secret(), "cfg_secret");
    }
}

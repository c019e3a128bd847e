//! Session token storage using the system keyring.
//!
//! When authentication is enabled, the bearer token sent with every API
//! request comes from here:
//! - Linux: Secret Service (GNOME Keyring, `KWallet`)
//! - macOS: Keychain
//! - Windows: Credential Manager
//!
//! `REDACTDESK_ID_TOKEN` takes precedence over the keyring, which keeps
//! headless and CI runs usable.

use keyring::Entry;
use tracing::{debug, warn};

use crate::config::ApiConfig;

/// Service name used for keyring entries.
const SERVICE_NAME: &str = "redactdesk";

/// Credential type identifier for identity-provider ID tokens.
const ID_TOKEN_CREDENTIAL: &str = "id_token";

/// Environment variable that overrides the stored token.
pub const TOKEN_ENV_VAR: &str = "REDACTDESK_ID_TOKEN";

/// Error type for credential operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Failed to access keyring.
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// Refused to store an empty token.
    #[error("Token is empty")]
    EmptyToken,
}

/// Result type for credential operations.
pub type CredentialResult<T> = std::result::Result<T, CredentialError>;

/// Keyring entry key for one API deployment.
fn credential_key(profile: &str) -> String {
    format!("{SERVICE_NAME}_{ID_TOKEN_CREDENTIAL}_{profile}")
}

/// Stores the ID token for an API deployment.
///
/// # Errors
///
/// Returns an error if the token is blank or the keyring operation fails.
pub fn store_id_token(profile: &str, token: &str) -> CredentialResult<()> {
    if token.trim().is_empty() {
        return Err(CredentialError::EmptyToken);
    }
    let entry = Entry::new(SERVICE_NAME, &credential_key(profile))?;
    entry.set_password(token.trim())?;
    debug!("Stored ID token for {profile}");
    Ok(())
}

/// Retrieves the ID token for an API deployment.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn get_id_token(profile: &str) -> CredentialResult<Option<String>> {
    let entry = Entry::new(SERVICE_NAME, &credential_key(profile))?;
    match entry.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => {
            debug!("No ID token found for {profile}");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Deletes the ID token for an API deployment (sign-out).
///
/// # Errors
///
/// Returns an error if the keyring operation fails (except for missing entries).
pub fn delete_id_token(profile: &str) -> CredentialResult<()> {
    let entry = Entry::new(SERVICE_NAME, &credential_key(profile))?;
    match entry.delete_credential() {
        Ok(()) => debug!("Deleted ID token for {profile}"),
        Err(keyring::Error::NoEntry) => debug!("No ID token to delete for {profile}"),
        Err(e) => {
            warn!("Failed to delete ID token: {e}");
            return Err(e.into());
        }
    }
    Ok(())
}

/// Resolves the bearer token for a config.
///
/// Returns `None` when authentication is disabled, so requests go out
/// without an Authorization header.
///
/// # Errors
///
/// Returns an error if the keyring cannot be read.
pub fn session_token(config: &ApiConfig) -> CredentialResult<Option<String>> {
    resolve_token(config, std::env::var(TOKEN_ENV_VAR).ok(), get_id_token)
}

fn resolve_token(
    config: &ApiConfig,
    from_env: Option<String>,
    from_keyring: impl Fn(&str) -> CredentialResult<Option<String>>,
) -> CredentialResult<Option<String>> {
    if !config.auth_enabled {
        return Ok(None);
    }
    if let Some(token) = from_env.filter(|t| !t.trim().is_empty()) {
        debug!("Using ID token from {TOKEN_ENV_VAR}");
        return Ok(Some(token));
    }
    let token = from_keyring(&config.api_gateway_url)?;
    if token.is_none() {
        warn!("Authentication enabled but no ID token is stored; requests will be anonymous");
    }
    Ok(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn authed() -> ApiConfig {
        ApiConfig {
            auth_enabled: true,
            ..ApiConfig::default()
        }
    }

    #[test]
    fn test_credential_key() {
        assert_eq!(
            credential_key("https://gw"),
            "redactdesk_id_token_https://gw"
        );
    }

    #[test]
    fn test_auth_disabled_has_no_token() {
        let token = resolve_token(&ApiConfig::default(), Some("abc".to_string()), |_| {
            Ok(Some("kept".to_string()))
        })
        .unwrap();
        assert_eq!(token, None);
    }

    #[test]
    fn test_env_token_wins() {
        let token = resolve_token(&authed(), Some("from-env".to_string()), |_| {
            Ok(Some("from-keyring".to_string()))
        })
        .unwrap();
        assert_eq!(token.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_keyring_used_when_env_blank() {
        let token = resolve_token(&authed(), Some("  ".to_string()), |profile| {
            Ok(Some(format!("token-for-{profile}")))
        })
        .unwrap();
        assert_eq!(token.as_deref(), Some("token-for-http://localhost:3000"));
    }

    #[test]
    fn test_store_rejects_empty_token() {
        assert!(matches!(
            store_id_token("p", "   "),
            Err(CredentialError::EmptyToken)
        ));
    }

    #[test]
    #[ignore = "Interacts with system keyring"]
    fn test_store_retrieve_and_delete_token() {
        let profile = "https://redactdesk.test/keyring";

        store_id_token(profile, "  token-123  ").unwrap();
        assert_eq!(get_id_token(profile).unwrap().as_deref(), Some("token-123"));

        delete_id_token(profile).unwrap();
        assert_eq!(get_id_token(profile).unwrap(), None);

        // Deleting again is not an error.
        delete_id_token(profile).unwrap();
    }
}

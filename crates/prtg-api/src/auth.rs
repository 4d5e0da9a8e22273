//! Authentication credentials for the PRTG API.
//!
//! PRTG authenticates every request through query parameters rather than
//! headers. A [`Credentials`] value is injected into the client once and is
//! immutable for the client's lifetime; no hashing or token refresh happens
//! locally. The passhash form expects a hash pre-computed by the caller (PRTG
//! exposes it under account settings).

use prtg_core::query::QueryParams;
use secrecy::{ExposeSecret, SecretString};

/// Immutable credentials attached to every outgoing request.
///
/// Secrets are held in [`SecretString`] so they stay redacted in debug output
/// and are only exposed at the moment the query pairs are assembled.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Username and plaintext password (`username` + `password` parameters).
    Password {
        /// Account username.
        username: String,
        /// Plaintext password.
        password: SecretString,
    },
    /// Username and pre-computed passhash (`username` + `passhash` parameters).
    Passhash {
        /// Account username.
        username: String,
        /// Pre-computed password hash.
        passhash: SecretString,
    },
    /// API token (`apitoken` parameter), no username involved.
    ApiToken {
        /// API access token.
        token: SecretString,
    },
}

impl Credentials {
    /// Credentials from a username and plaintext password.
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Credentials from a username and a pre-computed passhash.
    pub fn passhash(username: impl Into<String>, passhash: impl Into<String>) -> Self {
        Self::Passhash {
            username: username.into(),
            passhash: SecretString::from(passhash.into()),
        }
    }

    /// Credentials from an API token.
    pub fn api_token(token: impl Into<String>) -> Self {
        Self::ApiToken {
            token: SecretString::from(token.into()),
        }
    }

    /// The account username, when this credential form carries one.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Password { username, .. } | Self::Passhash { username, .. } => Some(username),
            Self::ApiToken { .. } => None,
        }
    }

    /// Append the authentication query pairs for this credential form.
    pub fn append_to(&self, params: &mut QueryParams) {
        match self {
            Self::Password { username, password } => {
                params.push("username", username);
                params.push("password", password.expose_secret());
            }
            Self::Passhash { username, passhash } => {
                params.push("username", username);
                params.push("passhash", passhash.expose_secret());
            }
            Self::ApiToken { token } => {
                params.push("apitoken", token.expose_secret());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_credentials_query_pairs() {
        let credentials = Credentials::password("prtgadmin", "hunter2");
        let mut params = QueryParams::new();
        credentials.append_to(&mut params);

        assert_eq!(
            params.into_pairs(),
            vec![
                ("username", "prtgadmin".to_string()),
                ("password", "hunter2".to_string()),
            ]
        );
    }

    #[test]
    fn passhash_credentials_query_pairs() {
        let credentials = Credentials::passhash("prtgadmin", "0123456789");
        let mut params = QueryParams::new();
        credentials.append_to(&mut params);

        assert_eq!(
            params.into_pairs(),
            vec![
                ("username", "prtgadmin".to_string()),
                ("passhash", "0123456789".to_string()),
            ]
        );
    }

    #[test]
    fn api_token_credentials_query_pairs() {
        let credentials = Credentials::api_token("tok-abc");
        let mut params = QueryParams::new();
        credentials.append_to(&mut params);

        assert_eq!(params.into_pairs(), vec![("apitoken", "tok-abc".to_string())]);
    }

    #[test]
    fn username_accessor() {
        assert_eq!(
            Credentials::passhash("prtgadmin", "x").username(),
            Some("prtgadmin")
        );
        assert_eq!(Credentials::api_token("x").username(), None);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let credentials = Credentials::password("prtgadmin", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("hunter2"));
    }
}

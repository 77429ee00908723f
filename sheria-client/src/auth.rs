use reqwest::header::{HeaderValue, AUTHORIZATION, COOKIE};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use thiserror::Error;

use crate::SheriaURL;

const SESSION_COOKIE: &str = "sid";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Credentials {
    /// API key pair generated for a server user.
    Token { api_key: String, api_secret: String },
    /// Session id obtained from an interactive login.
    Session { sid: String },
    /// Unauthenticated access, used by the public website forms.
    Guest,
}

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Missing session id")]
    MissingSessionId,
    #[error("RequestError: {0}")]
    RequestError(String),
}

impl Credentials {
    pub fn token(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self::Token {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Logs in with a username and password and keeps the returned session id.
    pub async fn login(
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Credentials, LoginError> {
        let login_url = SheriaURL::new(base_url).login();

        let resp = Client::new()
            .post(login_url.as_ref())
            .form(&[("usr", username), ("pwd", password)])
            .send()
            .await
            .map_err(|e| LoginError::RequestError(e.to_string()))?;

        if resp.status() == 401 || resp.status() == 403 {
            return Err(LoginError::InvalidCredentials);
        }

        let sid = resp
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|sid| !sid.is_empty() && sid != "Guest")
            .ok_or(LoginError::MissingSessionId)?;

        tracing::debug!(username, "logged in");

        Ok(Credentials::Session { sid })
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Credentials::Guest)
    }

    pub fn as_authorization_header(&self) -> Option<String> {
        match self {
            Credentials::Token {
                api_key,
                api_secret,
            } => Some(format!("token {}:{}", api_key, api_secret)),
            _ => None,
        }
    }

    pub fn as_cookie_header(&self) -> Option<String> {
        match self {
            Credentials::Session { sid } => Some(format!("{}={}", SESSION_COOKIE, sid)),
            _ => None,
        }
    }

    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match self
            .as_authorization_header()
            .and_then(|h| HeaderValue::from_str(&h).ok())
        {
            Some(value) => request.header(AUTHORIZATION, value),
            None => request,
        };

        match self
            .as_cookie_header()
            .and_then(|h| HeaderValue::from_str(&h).ok())
        {
            Some(value) => request.header(COOKIE, value),
            None => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_credentials_build_authorization_header() {
        let credentials = Credentials::token("key", "secret");
        assert_eq!(
            credentials.as_authorization_header().as_deref(),
            Some("token key:secret")
        );
        assert_eq!(credentials.as_cookie_header(), None);
    }

    #[test]
    fn session_credentials_build_cookie_header() {
        let credentials = Credentials::Session {
            sid: "abc123".to_string(),
        };
        assert_eq!(credentials.as_cookie_header().as_deref(), Some("sid=abc123"));
        assert_eq!(credentials.as_authorization_header(), None);
    }

    #[test]
    fn guest_sends_nothing() {
        assert!(Credentials::Guest.is_guest());
        assert_eq!(Credentials::Guest.as_authorization_header(), None);
        assert_eq!(Credentials::Guest.as_cookie_header(), None);
    }
}

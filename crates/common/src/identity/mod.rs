//! Identity provider facade
//!
//! Sign-up, sign-in, sign-out, and session checks are delegated to an
//! external identity service; the gateway never stores credentials. The
//! HTTP implementation speaks a GoTrue-style REST API. A mock implementation
//! backs development and tests.

use crate::auth::SessionUser;
use crate::config::IdentityConfig;
use crate::errors::{AppError, Result};
use adelante_catalog::Locale;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// A new account registration.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub locale: Locale,
    pub is_student: bool,
    pub is_alumni: bool,
}

/// A provider-backed session: the profile plus the provider's access token.
#[derive(Debug, Clone)]
pub struct ProviderSession {
    pub user: SessionUser,
    pub access_token: String,
}

/// Trait for external identity providers
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account and open a session
    async fn sign_up(&self, registration: &SignUp) -> Result<ProviderSession>;

    /// Open a session with existing credentials
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession>;

    /// Revoke a provider session
    async fn sign_out(&self, access_token: &str) -> Result<()>;

    /// Resolve the user behind a provider access token (session check)
    async fn fetch_user(&self, access_token: &str) -> Result<SessionUser>;
}

/// User metadata carried alongside the account.
#[derive(Debug, Serialize, Deserialize, Default)]
struct UserMetadata {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    preferred_language: Option<String>,
    #[serde(default)]
    is_gsu_student: bool,
    #[serde(default)]
    is_gsu_alumni: bool,
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: Uuid,
    email: String,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    access_token: Option<String>,
    user: Option<ProviderUser>,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpPayload<'a> {
    email: &'a str,
    password: &'a str,
    data: UserMetadata,
}

impl ProviderUser {
    fn into_session_user(self) -> SessionUser {
        let locale = self
            .user_metadata
            .preferred_language
            .as_deref()
            .and_then(|tag| tag.parse().ok())
            .unwrap_or(Locale::En);

        SessionUser {
            id: self.id,
            email: self.email,
            first_name: self.user_metadata.first_name,
            last_name: self.user_metadata.last_name,
            locale,
            is_student: self.user_metadata.is_gsu_student,
            is_alumni: self.user_metadata.is_gsu_alumni,
        }
    }
}

/// GoTrue-style HTTP identity provider
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpIdentityProvider {
    /// Create a provider client from configuration
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration {
                message: format!("Failed to build identity HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    async fn parse_session(&self, response: reqwest::Response) -> Result<ProviderSession> {
        let status = response.status();

        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(AppError::InvalidCredentials);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Identity {
                message: format!("Provider error {}: {}", status, body),
            });
        }

        let payload: SessionPayload = response.json().await.map_err(|e| AppError::Identity {
            message: format!("Malformed provider response: {}", e),
        })?;

        let access_token = payload.access_token.ok_or_else(|| AppError::Identity {
            message: "Provider returned no access token".to_string(),
        })?;
        let user = payload.user.ok_or_else(|| AppError::Identity {
            message: "Provider returned no user".to_string(),
        })?;

        Ok(ProviderSession {
            user: user.into_session_user(),
            access_token,
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(&self, registration: &SignUp) -> Result<ProviderSession> {
        let url = format!("{}/signup", self.base_url);

        let payload = SignUpPayload {
            email: &registration.email,
            password: &registration.password,
            data: UserMetadata {
                first_name: registration.first_name.clone(),
                last_name: registration.last_name.clone(),
                preferred_language: Some(registration.locale.as_str().to_string()),
                is_gsu_student: registration.is_student,
                is_gsu_alumni: registration.is_alumni,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        self.parse_session(response).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession> {
        let url = format!("{}/token?grant_type=password", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await?;

        self.parse_session(response).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = format!("{}/logout", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            // A dead provider session is already signed out.
            tracing::debug!(status = %response.status(), "Provider sign-out returned non-success");
        }

        Ok(())
    }

    async fn fetch_user(&self, access_token: &str) -> Result<SessionUser> {
        let url = format!("{}/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized {
                message: "Provider session expired".to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Identity {
                message: format!("Provider error {}: {}", status, body),
            });
        }

        let user: ProviderUser = response.json().await.map_err(|e| AppError::Identity {
            message: format!("Malformed provider response: {}", e),
        })?;

        Ok(user.into_session_user())
    }
}

#[derive(Clone)]
struct MockAccount {
    password: String,
    user: SessionUser,
}

/// In-memory identity provider for development and tests
#[derive(Default)]
pub struct MockIdentityProvider {
    accounts: Mutex<HashMap<String, MockAccount>>,
    tokens: Mutex<HashMap<String, String>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn open_session(&self, account: &MockAccount) -> ProviderSession {
        let token = Uuid::new_v4().to_string();
        self.tokens
            .lock()
            .expect("mock token table poisoned")
            .insert(token.clone(), account.user.email.clone());

        ProviderSession {
            user: account.user.clone(),
            access_token: token,
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_up(&self, registration: &SignUp) -> Result<ProviderSession> {
        let mut accounts = self.accounts.lock().expect("mock account table poisoned");

        if accounts.contains_key(&registration.email) {
            return Err(AppError::Validation {
                message: "Email already registered".to_string(),
                field: Some("email".to_string()),
            });
        }

        let account = MockAccount {
            password: registration.password.clone(),
            user: SessionUser {
                id: Uuid::new_v4(),
                email: registration.email.clone(),
                first_name: registration.first_name.clone(),
                last_name: registration.last_name.clone(),
                locale: registration.locale,
                is_student: registration.is_student,
                is_alumni: registration.is_alumni,
            },
        };

        accounts.insert(registration.email.clone(), account.clone());
        drop(accounts);

        Ok(self.open_session(&account))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession> {
        let accounts = self.accounts.lock().expect("mock account table poisoned");

        let account = accounts
            .get(email)
            .filter(|a| a.password == password)
            .cloned()
            .ok_or(AppError::InvalidCredentials)?;
        drop(accounts);

        Ok(self.open_session(&account))
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        self.tokens
            .lock()
            .expect("mock token table poisoned")
            .remove(access_token);
        Ok(())
    }

    async fn fetch_user(&self, access_token: &str) -> Result<SessionUser> {
        let tokens = self.tokens.lock().expect("mock token table poisoned");
        let email = tokens.get(access_token).ok_or(AppError::Unauthorized {
            message: "Provider session expired".to_string(),
        })?;

        let accounts = self.accounts.lock().expect("mock account table poisoned");
        accounts
            .get(email)
            .map(|a| a.user.clone())
            .ok_or(AppError::Unauthorized {
                message: "Provider session expired".to_string(),
            })
    }
}

/// Create an identity provider based on configuration
pub fn create_provider(config: &IdentityConfig) -> Result<Arc<dyn IdentityProvider>> {
    match config.provider.as_str() {
        "gotrue" => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| AppError::Configuration {
                    message: "identity.api_key is required for the gotrue provider".to_string(),
                })?;
            Ok(Arc::new(HttpIdentityProvider::new(
                config.base_url.clone(),
                api_key,
                config.timeout_secs,
            )?))
        }
        "mock" => Ok(Arc::new(MockIdentityProvider::new())),
        other => {
            tracing::warn!(provider = other, "Unknown identity provider, using mock");
            Ok(Arc::new(MockIdentityProvider::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> SignUp {
        SignUp {
            email: "ana@example.edu".into(),
            password: "hunter2hunter2".into(),
            first_name: Some("Ana".into()),
            last_name: Some("Lopez".into()),
            locale: Locale::Es,
            is_student: true,
            is_alumni: false,
        }
    }

    #[tokio::test]
    async fn test_mock_signup_and_signin() {
        let provider = MockIdentityProvider::new();

        let session = provider.sign_up(&registration()).await.unwrap();
        assert_eq!(session.user.email, "ana@example.edu");
        assert_eq!(session.user.locale, Locale::Es);

        let session = provider
            .sign_in("ana@example.edu", "hunter2hunter2")
            .await
            .unwrap();
        let user = provider.fetch_user(&session.access_token).await.unwrap();
        assert_eq!(user.id, session.user.id);
    }

    #[tokio::test]
    async fn test_mock_rejects_bad_password() {
        let provider = MockIdentityProvider::new();
        provider.sign_up(&registration()).await.unwrap();

        let err = provider
            .sign_in("ana@example.edu", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_mock_rejects_duplicate_email() {
        let provider = MockIdentityProvider::new();
        provider.sign_up(&registration()).await.unwrap();
        assert!(provider.sign_up(&registration()).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_signout_revokes_token() {
        let provider = MockIdentityProvider::new();
        let session = provider.sign_up(&registration()).await.unwrap();

        provider.sign_out(&session.access_token).await.unwrap();
        assert!(provider.fetch_user(&session.access_token).await.is_err());
    }

    #[test]
    fn test_metadata_locale_fallback() {
        let user = ProviderUser {
            id: Uuid::new_v4(),
            email: "x@example.edu".into(),
            user_metadata: UserMetadata {
                preferred_language: Some("fr".into()),
                ..Default::default()
            },
        };
        // Unsupported tags fall back to English.
        assert_eq!(user.into_session_user().locale, Locale::En);
    }
}

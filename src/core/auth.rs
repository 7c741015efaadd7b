use crate::core::http::{ApiClient, RequestOptions};
use crate::domain::model::{HealthProfile, MessageResponse, TokenPair, User};
use crate::domain::requests::{Credentials, HealthProfileInput, NewUser, RefreshRequest, UserUpdate};
use crate::domain::session::Session;
use crate::utils::error::Result;

/// `/auth` endpoints.
///
/// Holds no session state: callers pass the [`Session`] for every
/// authenticated call and decide themselves where tokens are kept.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, user: &NewUser) -> Result<User> {
        tracing::debug!("Registering user '{}'", user.username);
        let options = RequestOptions::new().json(user)?;
        Ok(self.client.post("/auth/register", options).await?.data)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair> {
        tracing::debug!("Logging in as '{}'", credentials.username);
        let options = RequestOptions::new().json(credentials)?;
        Ok(self.client.post("/auth/login", options).await?.data)
    }

    /// Revokes the session's refresh token on the server.
    pub async fn logout(&self, session: &Session) -> Result<MessageResponse> {
        let body = RefreshRequest {
            refresh_token: session.refresh_token().to_string(),
        };
        let options = RequestOptions::new().json(&body)?;
        Ok(self.client.post("/auth/logout", options).await?.data)
    }

    /// Exchanges the refresh token for a new access token. The returned pair
    /// carries the same refresh token.
    pub async fn refresh(&self, session: &Session) -> Result<TokenPair> {
        let body = RefreshRequest {
            refresh_token: session.refresh_token().to_string(),
        };
        let options = RequestOptions::new().json(&body)?;
        Ok(self.client.post("/auth/refresh", options).await?.data)
    }

    pub async fn current_user(&self, session: &Session) -> Result<User> {
        let options = RequestOptions::new().session(session);
        Ok(self.client.get("/auth/me", options).await?.data)
    }

    pub async fn update_current_user(&self, session: &Session, update: &UserUpdate) -> Result<User> {
        let options = RequestOptions::new().session(session).json(update)?;
        Ok(self.client.put("/auth/me", options).await?.data)
    }

    pub async fn health_profile(&self, session: &Session) -> Result<HealthProfile> {
        let options = RequestOptions::new().session(session);
        Ok(self.client.get("/auth/health-profile", options).await?.data)
    }

    pub async fn create_health_profile(
        &self,
        session: &Session,
        profile: &HealthProfileInput,
    ) -> Result<HealthProfile> {
        let options = RequestOptions::new().session(session).json(profile)?;
        Ok(self.client.post("/auth/health-profile", options).await?.data)
    }

    pub async fn update_health_profile(
        &self,
        session: &Session,
        profile: &HealthProfileInput,
    ) -> Result<HealthProfile> {
        let options = RequestOptions::new().session(session).json(profile)?;
        Ok(self.client.put("/auth/health-profile", options).await?.data)
    }
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }
}

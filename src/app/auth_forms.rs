use crate::app::scope::ViewScope;
use crate::app::state::ViewState;
use crate::core::http::ApiClient;
use crate::domain::model::{HealthProfile, User};
use crate::domain::ports::TokenStore;
use crate::domain::requests::{Credentials, HealthProfileInput, NewUser};
use crate::domain::session::Session;
use std::sync::Arc;

const LOGIN_FAILED: &str = "Login failed. Please try again.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const PROFILE_FAILED: &str = "Failed to load health profile";

/// Login form. Tokens reach the store only after a successful login.
pub struct LoginForm {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    scope: ViewScope,
    submitting: bool,
    error: Option<String>,
    session: Option<Session>,
}

impl LoginForm {
    pub fn new(client: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            store,
            scope: ViewScope::new(),
            submitting: false,
            error: None,
            session: None,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Returns whether the user is now logged in.
    pub async fn submit(&mut self, credentials: &Credentials) -> bool {
        self.submitting = true;
        self.error = None;

        let auth = self.client.auth();
        let Some(result) = self.scope.run(auth.login(credentials)).await else {
            return false;
        };
        self.submitting = false;

        let tokens = match result {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::error!("❌ Login failed for '{}': {}", credentials.username, e);
                self.error = Some(e.display_message(LOGIN_FAILED));
                return false;
            }
        };

        let session = Session::new(tokens);
        if let Err(e) = self.store.save(&session).await {
            tracing::error!("❌ Could not persist session: {}", e);
            self.error = Some("Logged in, but the session could not be saved".to_string());
            return false;
        }

        tracing::info!("✅ Logged in as '{}'", credentials.username);
        self.session = Some(session);
        true
    }
}

#[derive(Debug)]
pub struct RegisterForm {
    client: ApiClient,
    scope: ViewScope,
    submitting: bool,
    state: ViewState<User>,
}

impl RegisterForm {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            submitting: false,
            state: ViewState::Empty,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn state(&self) -> &ViewState<User> {
        &self.state
    }

    pub async fn submit(&mut self, user: &NewUser) -> bool {
        self.submitting = true;
        let auth = self.client.auth();
        let Some(result) = self.scope.run(auth.register(user)).await else {
            return false;
        };
        self.submitting = false;

        self.state = match result {
            Ok(user) => ViewState::Ready(user),
            Err(e) => {
                tracing::error!("❌ Registration failed for '{}': {}", user.username, e);
                ViewState::Failed(e.display_message(REGISTER_FAILED))
            }
        };
        self.state.ready().is_some()
    }
}

/// Current user's health profile. A missing profile shows as `NotFound`
/// and the next save creates it.
#[derive(Debug)]
pub struct HealthProfileView {
    client: ApiClient,
    session: Session,
    scope: ViewScope,
    loading: bool,
    state: ViewState<HealthProfile>,
}

impl HealthProfileView {
    pub fn new(client: ApiClient, session: Session) -> Self {
        Self {
            client,
            session,
            scope: ViewScope::new(),
            loading: false,
            state: ViewState::Empty,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn state(&self) -> &ViewState<HealthProfile> {
        &self.state
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let auth = self.client.auth();
        let Some(result) = self.scope.run(auth.health_profile(&self.session)).await else {
            tracing::debug!("Health profile view unmounted before response");
            return;
        };
        self.state = ViewState::settle(result, "health profile", PROFILE_FAILED);
        self.loading = false;
    }

    pub async fn save(&mut self, input: &HealthProfileInput) {
        self.loading = true;
        let auth = self.client.auth();
        let request = async {
            match &self.state {
                ViewState::NotFound | ViewState::Empty => {
                    auth.create_health_profile(&self.session, input).await
                }
                ViewState::Ready(_) | ViewState::Failed(_) => {
                    auth.update_health_profile(&self.session, input).await
                }
            }
        };
        let Some(result) = self.scope.run(request).await else {
            tracing::debug!("Health profile view unmounted before save finished");
            return;
        };
        self.state = ViewState::settle(result, "health profile", "Failed to save health profile");
        self.loading = false;
    }
}

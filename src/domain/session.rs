use crate::domain::model::TokenPair;
use serde::{Deserialize, Serialize};

/// An authenticated session, passed explicitly to every call that needs a
/// bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    tokens: TokenPair,
}

impl Session {
    pub fn new(tokens: TokenPair) -> Self {
        Self { tokens }
    }

    pub fn access_token(&self) -> &str {
        &self.tokens.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.tokens.refresh_token
    }

    pub fn tokens(&self) -> &TokenPair {
        &self.tokens
    }

    /// Replaces the token pair after a refresh.
    pub fn with_tokens(self, tokens: TokenPair) -> Self {
        Self { tokens }
    }
}

impl From<TokenPair> for Session {
    fn from(tokens: TokenPair) -> Self {
        Self::new(tokens)
    }
}

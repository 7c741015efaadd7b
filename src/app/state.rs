use crate::utils::error::Result;

/// What a view currently shows. The loading flag lives next to it on each
/// view, so a reload keeps the previous content visible.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Empty,
    Ready(T),
    NotFound,
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ViewState::NotFound)
    }

    /// Maps a finished request onto a display state. 404 becomes
    /// `NotFound`; other failures are logged and shown as the server's
    /// `detail`, or `fallback` when there is none.
    pub fn settle(result: Result<T>, what: &str, fallback: &str) -> Self {
        match result {
            Ok(value) => ViewState::Ready(value),
            Err(e) if e.is_not_found() => {
                tracing::debug!("{} not found", what);
                ViewState::NotFound
            }
            Err(e) => {
                tracing::error!(
                    "❌ Failed to load {}: {} (Category: {:?})",
                    what,
                    e,
                    e.category()
                );
                ViewState::Failed(e.display_message(fallback))
            }
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Empty
    }
}

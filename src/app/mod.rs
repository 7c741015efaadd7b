// View layer: each view owns its state, loading flag and scope. Nothing is
// shared between views; reopening a view fetches again.

pub mod auth_forms;
pub mod dashboard;
pub mod interventions_view;
pub mod scope;
pub mod state;

pub use auth_forms::{HealthProfileView, LoginForm, RegisterForm};
pub use dashboard::DashboardView;
pub use interventions_view::{InterventionDetail, InterventionDetailView, InterventionListView};
pub use scope::ViewScope;
pub use state::ViewState;

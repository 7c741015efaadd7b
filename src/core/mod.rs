pub mod auth;
pub mod evidence;
pub mod http;
pub mod interventions;
pub mod personalized;
pub mod recommendations;
pub mod tracking;

pub use crate::domain::ports::{ConfigProvider, Storage, TokenStore};
pub use crate::utils::error::Result;
pub use http::{path_segment, ApiClient, ApiResponse, RequestOptions};

//! Survey backend API
//!
//! Token handling ([`AuthManager`]) and the authenticated client
//! ([`SurveyClient`]). The network sits behind two traits, [`TokenIssuer`]
//! and [`HttpTransport`], with reqwest-based implementations used in
//! production.

pub mod auth;
pub mod client;
pub mod constants;
pub mod error;
pub mod manager;
pub mod transport;

pub use auth::{AuthManager, HttpTokenIssuer, TokenIssuer};
pub use client::{SurveyClient, validate_description};
pub use error::{ApiError, AuthError};
pub use manager::ClientManager;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};

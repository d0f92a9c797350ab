//! Application Layer
//!
//! Use cases and application services.

pub mod config;
mod credentials;
pub mod log_in;
pub mod session_token;
pub mod sign_up;

// Re-exports
pub use config::{AuthConfig, ConfigError};
pub use log_in::{LogInInput, LogInOutput, LogInUseCase};
pub use session_token::{IssuedToken, SessionTokens, TokenError};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};

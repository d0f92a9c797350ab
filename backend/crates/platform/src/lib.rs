//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no knowledge of users or posts:
//! - Credential hashing (bcrypt) with zeroized clear-text handling
//! - Cookie parsing and `Set-Cookie` construction

pub mod cookie;
pub mod password;

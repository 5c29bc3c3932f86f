//! Authentication utilities library
//!
//! Provides the credential primitives used by the catalog service:
//! - Password hashing (Argon2id, salted, constant-time verification)
//! - Signed, time-limited identity tokens (HS256 JWT)
//! - Authentication coordination
//!
//! The crate knows nothing about users, storage or HTTP. Services decide what
//! a token subject means and where password hashes live.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Identity Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue("alice", Duration::minutes(30)).unwrap();
//! assert_eq!(handler.verify(&token), Some("alice".to_string()));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(30));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify, then issue a token for the account
//! assert!(auth.verify_password("password123", &hash));
//! let token = auth.generate_token("alice").unwrap();
//!
//! // Gate: resolve the token subject
//! assert_eq!(auth.validate_token(&token), Some("alice".to_string()));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;

//! Credential primitives shared by the library service.
//!
//! Provides:
//! - Password hashing (Argon2id, cost-tunable)
//! - Signed, time-bounded session tokens (HS256 JWT)
//!
//! Nothing here knows about accounts or HTTP. The service adapts these
//! building blocks behind its own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::SessionIssuer;
//! use chrono::Duration;
//!
//! let issuer = SessionIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(60));
//! let session = issuer.issue("6f1c", "alice@example.com").unwrap();
//!
//! let claims = issuer.verify(&session.token).unwrap();
//! assert_eq!(claims.sub, "6f1c");
//! assert_eq!(claims.email, "alice@example.com");
//! ```

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::IssuedSession;
pub use session::SessionIssuer;

//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` and `TokenIssuer` ports:
//! HS256 JWTs for production, an in-memory mock for tests, plus argon2
//! password hashing used at registration and login.

mod jwt;
mod mock;
mod password;

pub use jwt::JwtAuth;
pub use mock::MockSessionValidator;
pub use password::Argon2PasswordHasher;

//! Password hashing port.

use crate::domain::foundation::AuthError;

/// Hashes and verifies login passwords.
///
/// Synchronous on purpose: hashing is CPU-bound and implementations are
/// expected to be cheap enough to run inline on the request path.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a password into a storable PHC string.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verifies a password against a stored PHC string.
    ///
    /// Returns `Ok(())` on match and `InvalidCredentials` on mismatch.
    fn verify(&self, password: &str, stored_hash: &str) -> Result<(), AuthError>;
}

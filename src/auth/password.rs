//! Password verification against the credential store.

/// Bcrypt hashes start with a `$2` version marker.
const BCRYPT_PREFIX: &str = "$2";

/// Verifies a supplied password against the stored column value.
///
/// Stored values are bcrypt hashes. Accounts predating the hash migration
/// still hold the raw password and are compared byte-for-byte until their
/// next password change re-hashes them.
pub fn verify(supplied: &str, stored: &str) -> bool {
    if stored.starts_with(BCRYPT_PREFIX) {
        bcrypt::verify(supplied, stored).unwrap_or(false)
    } else {
        supplied.as_bytes() == stored.as_bytes()
    }
}

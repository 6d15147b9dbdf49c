use sha1::{Digest, Sha1};

/// Hex encoded SHA-1 digest, the form in which passwords are stored.
pub fn password_hash(password: &str) -> String {
    hex::encode(Sha1::digest(password.as_bytes()))
}

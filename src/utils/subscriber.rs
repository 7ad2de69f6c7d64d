use md5::{Digest, Md5};

/// Identifier of a list member in URLs: lowercase hex MD5 of the lowercased email
pub fn subscriber_hash(email: &str) -> String {
    let digest = Md5::digest(email.to_lowercase().as_bytes());
    hex::encode(digest)
}

//! Type aliases for domain concepts.

/// A secret key: a `/`-separated path relative to the store root
/// (e.g. `prod/db/password`).
pub type SecretKey = String;

/// Base64 envelope text as stored in a secret file.
pub type EnvelopeText = String;

/// Remote repository URL as understood by git.
pub type RemoteUrl = String;

//! Error taxonomy for the authentication core.

use thiserror::Error;

/// Failures at the identity provider boundary.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The access token is not a readable JWT (claims segment missing or
    /// undecodable).
    #[error("malformed access token")]
    MalformedToken,

    /// The identity provider rejected the operation.
    #[error("identity provider rejected the request: {0}")]
    Rejected(String),

    /// Network-level failure talking to the identity provider.
    #[error("identity provider unreachable: {0}")]
    Network(String),

    /// The operation requires a browser environment.
    #[error("not available on server")]
    Unavailable,
}

/// The backend `/auth/me` payload could not be reduced to a user + profile.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// Neither `user` nor `User` is present at the top level.
    #[error("no user object in response")]
    MissingUser,

    /// A required user field is absent under every known key variant.
    #[error("user object missing required field `{0}`")]
    MissingField(&'static str),

    /// The role string is none of the known roles.
    #[error("unrecognized role `{0}`")]
    UnknownRole(String),
}

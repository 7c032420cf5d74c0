use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("malformed pitch token: {token}")]
    MalformedPitch { token: String },

    #[error("unknown duration label: {label}")]
    UnknownDuration { label: String },

    #[error("malformed note token: {token}")]
    MalformedToken { token: String },
}

pub type Result<T> = std::result::Result<T, Error>;

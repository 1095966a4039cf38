use std::convert::Infallible;

use strum::EnumIs;
use thiserror::Error;

use crate::location::Location;

/// Reason a construction request was rejected by the verifier of its kind.
///
/// Verification is a deterministic function of the key: retrying the same
/// request always fails with the same reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum VerifyError {
    /// A scalar field fails its bit-width or representability constraint.
    #[error("expected {expected} for {field}")]
    MalformedKey {
        field: &'static str,
        expected: String,
    },

    /// A numeric code or string does not resolve against its closed enumeration.
    #[error("unknown {symbol} (got `{value}`)")]
    UnknownEnumValue { symbol: &'static str, value: String },

    /// A composite sub-attribute is not of the exact expected kind.
    #[error("expected {expected} for {field}, found {found}")]
    KindMismatch {
        field: &'static str,
        expected: &'static str,
        found: String,
    },
}

impl From<Infallible> for VerifyError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// A rejected construction, attributed to the location supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {reason}")]
pub struct ConstructionError {
    pub location: Location,
    #[source]
    pub reason: VerifyError,
}

pub type AttrResult<T> = Result<T, ConstructionError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration file '{file}': {source}")]
    ParseError {
        source: toml::de::Error,
        file: String,
    },

    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

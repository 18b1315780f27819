//! The typed contract with the signup backend.
//!
//! Expected failures come back as [`RpcRet::Error`]; only transport trouble
//! (timeouts, refused connections, garbled responses) is a [`TransportError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::{AddressInputParts, ContactAddress};
use crate::info::{StateInfo, Voter};
use crate::status::{RegistrationArgs, RegistrationLookup};

/// Response envelope of every backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RpcRet<T> {
    Data { data: T },
    Error { message: String },
}

impl<T> RpcRet<T> {
    pub fn data(data: T) -> Self {
        RpcRet::Data { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        RpcRet::Error {
            message: message.into(),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            RpcRet::Data { data } => Ok(data),
            RpcRet::Error { message } => Err(message),
        }
    }
}

/// How a transport failure is reported to the voter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Timeout,
    Connectivity,
    Unknown,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connectivity => "connectivity",
            FailureKind::Unknown => "unknown",
        }
    }

    /// Retryable notice shown after a failed submission.
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::Timeout => {
                "Timeout Error: Try resubmitting.  If this persists, try again in a little while."
            }
            FailureKind::Connectivity => {
                "Connection Error: Check your internet connection and try resubmitting."
            }
            FailureKind::Unknown => {
                "Error signing up.  Try resubmitting.  If this persists, try again in a little while."
            }
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} failure: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Timeout, message)
    }

    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Connectivity, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unknown, message)
    }
}

/// The three backend operations the signup flow depends on.
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Geocode an address and find its local election official.
    async fn fetch_contact_address(
        &self,
        addr: &AddressInputParts,
    ) -> Result<RpcRet<ContactAddress>, TransportError>;

    /// Check the voter file for an existing registration.
    async fn is_registered(
        &self,
        args: &RegistrationArgs,
    ) -> Result<RpcRet<RegistrationLookup>, TransportError>;

    /// Submit a signup. Returns the confirmation id.
    async fn register(
        &self,
        info: &StateInfo,
        voter: &Voter,
    ) -> Result<RpcRet<String>, TransportError>;
}

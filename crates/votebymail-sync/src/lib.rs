//! Transport layer: JSON-over-HTTP calls to the signup backend's RPC endpoints.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{RpcClient, SyncError};

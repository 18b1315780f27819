//! HTTP client for the signup backend.
//!
//! Every call is a `POST {base}/rpc/{method}` whose body is the JSON array of
//! the method's arguments and whose response is an [`RpcRet`] envelope.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};
use votebymail_core::{
    AddressInputParts, ContactAddress, FailureKind, RegistrationArgs, RegistrationLookup, RpcRet,
    SignupService, StateInfo, TransportError, Voter,
};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SyncError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SyncError::Http(e) if e.is_timeout() => FailureKind::Timeout,
            SyncError::Http(e) if e.is_connect() => FailureKind::Connectivity,
            _ => FailureKind::Unknown,
        }
    }
}

impl From<SyncError> for TransportError {
    fn from(e: SyncError) -> Self {
        TransportError::new(e.kind(), e.to_string())
    }
}

/// RPC client for the signup backend.
pub struct RpcClient {
    client: reqwest::Client,
    base_url: String,
}

impl RpcClient {
    /// Create a client for the backend at `base_url`, e.g.
    /// `http://localhost:8080` (a trailing slash is dropped). Each call gives
    /// up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SyncError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/rpc/{}", self.base_url, method)
    }

    async fn call<A, T>(&self, method: &str, args: &A) -> Result<RpcRet<T>, SyncError>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(method);
        info!(url = %url, "calling signup backend");
        let resp = self.client.post(&url).json(args).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(method, status = status.as_u16(), "backend call failed");
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let ret: RpcRet<T> = serde_json::from_str(&body)?;
        if let RpcRet::Error { message } = &ret {
            info!(method, message = %message, "backend returned an error");
        }
        Ok(ret)
    }
}

#[async_trait]
impl SignupService for RpcClient {
    async fn fetch_contact_address(
        &self,
        addr: &AddressInputParts,
    ) -> Result<RpcRet<ContactAddress>, TransportError> {
        Ok(self.call("fetchContactAddress", &(addr,)).await?)
    }

    async fn is_registered(
        &self,
        args: &RegistrationArgs,
    ) -> Result<RpcRet<RegistrationLookup>, TransportError> {
        Ok(self.call("isRegistered", &(args,)).await?)
    }

    async fn register(
        &self,
        info: &StateInfo,
        voter: &Voter,
    ) -> Result<RpcRet<String>, TransportError> {
        Ok(self.call("register", &(info, voter)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> RpcClient {
        RpcClient::new(base, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn trims_trailing_slash() {
        let client = client("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.url("register"), "http://localhost:8080/rpc/register");
    }

    #[test]
    fn arguments_are_sent_positionally() {
        let args = RegistrationArgs {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            state_abbr: "MI".into(),
            ..Default::default()
        };
        let body = serde_json::to_value((&args,)).unwrap();
        assert!(body.is_array());
        assert_eq!(body[0]["firstName"], "Ada");

        let voter = Voter {
            uid: "u1".into(),
            ..Default::default()
        };
        let pair = serde_json::to_value((&args, &voter)).unwrap();
        assert_eq!(pair.as_array().unwrap().len(), 2);
        assert_eq!(pair[1]["uid"], "u1");
    }

    #[test]
    fn server_and_parse_errors_are_unknown() {
        let server = SyncError::Server {
            status: 502,
            body: "bad gateway".into(),
        };
        let transport = TransportError::from(server);
        assert_eq!(transport.kind, FailureKind::Unknown);
        assert!(transport.message.contains("502"));

        let parse = serde_json::from_str::<RpcRet<String>>("<html>").unwrap_err();
        assert_eq!(SyncError::from(parse).kind(), FailureKind::Unknown);
    }

    #[tokio::test]
    async fn refused_connection_is_connectivity() {
        // Nothing listens on the discard port.
        let client = client("http://127.0.0.1:9");
        let err = client
            .is_registered(&RegistrationArgs::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::Connectivity);
    }
}

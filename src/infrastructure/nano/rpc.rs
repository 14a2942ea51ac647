//! Node JSON-RPC client and the `LedgerSource` abstraction

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use super::types::{
    ConfirmationQuorumResponse, KnownAccountEntry, NodeError, RepresentativesOnlineResponse,
};
use super::RpcError;
use crate::domain::account::{KnownAccount, RepresentativeRecord};
use crate::domain::ConfirmationQuorum;

/// Where the reference datasets come from.
///
/// The worker only talks to this trait, so tests can swap in canned data.
#[async_trait::async_trait]
pub trait LedgerSource: Send + Sync + 'static {
    /// Online representatives with their voting weight
    async fn representatives(&self) -> Result<Vec<RepresentativeRecord>, RpcError>;

    /// Current quorum parameters
    async fn confirmation_quorum(&self) -> Result<ConfirmationQuorum, RpcError>;

    /// Remote alias registry, `None` when no registry is configured
    async fn known_accounts(&self) -> Result<Option<Vec<KnownAccount>>, RpcError>;

    /// Endpoint display name
    fn endpoint_name(&self) -> String;
}

/// HTTP client for a node's RPC port
pub struct NanoRpc {
    http: reqwest::Client,
    rpc_url: String,
    known_accounts_url: Option<String>,
}

impl NanoRpc {
    pub fn new(
        rpc_url: impl Into<String>,
        known_accounts_url: Option<String>,
    ) -> Result<Self, RpcError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
            known_accounts_url,
        })
    }

    async fn call<T: DeserializeOwned>(&self, body: Value) -> Result<T, RpcError> {
        let action = body
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        debug!(endpoint = %self.rpc_url, %action, "rpc request");

        let response = self.http.post(&self.rpc_url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Status {
                action,
                status: status.as_u16(),
            });
        }

        let value: Value = response.json().await?;
        if let Ok(NodeError { error }) = serde_json::from_value::<NodeError>(value.clone()) {
            return Err(RpcError::Node { action, message: error });
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait::async_trait]
impl LedgerSource for NanoRpc {
    async fn representatives(&self) -> Result<Vec<RepresentativeRecord>, RpcError> {
        let response: RepresentativesOnlineResponse = self
            .call(json!({ "action": "representatives_online", "weight": "true" }))
            .await?;
        response.into_records()
    }

    async fn confirmation_quorum(&self) -> Result<ConfirmationQuorum, RpcError> {
        let response: ConfirmationQuorumResponse =
            self.call(json!({ "action": "confirmation_quorum" })).await?;
        response.into_quorum()
    }

    async fn known_accounts(&self) -> Result<Option<Vec<KnownAccount>>, RpcError> {
        let Some(url) = self.known_accounts_url.as_deref() else {
            return Ok(None);
        };
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Status {
                action: "known_accounts".into(),
                status: status.as_u16(),
            });
        }
        let entries: Vec<KnownAccountEntry> = response.json().await?;
        Ok(Some(
            entries
                .into_iter()
                .map(KnownAccount::from)
                .filter(|known| !known.account.is_empty() && !known.alias.is_empty())
                .collect(),
        ))
    }

    fn endpoint_name(&self) -> String {
        self.rpc_url.clone()
    }
}

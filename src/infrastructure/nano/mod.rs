//! Nano node infrastructure - RPC client and wire types

mod rpc;
pub(crate) mod types;

pub use rpc::{LedgerSource, NanoRpc};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{action} returned HTTP {status}")]
    Status { action: String, status: u16 },

    #[error("node rejected {action}: {message}")]
    Node { action: String, message: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid {field} amount: {value:?}")]
    InvalidAmount { field: String, value: String },

    #[error("response is missing {0}")]
    MissingField(String),
}

//! Wire types for the node JSON-RPC and the known-accounts registry

use std::collections::BTreeMap;

use serde::Deserialize;

use super::RpcError;
use crate::config::normalize_address;
use crate::domain::account::{KnownAccount, RepresentativeRecord};
use crate::domain::ConfirmationQuorum;

/// Principal threshold when the node omits it: 0.1% of online stake
const PRINCIPAL_SHARE_DIVISOR: u128 = 1_000;

#[derive(Debug, Deserialize)]
pub(crate) struct NodeError {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepresentativesOnlineResponse {
    #[serde(default)]
    pub representatives: BTreeMap<String, OnlineRepresentative>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OnlineRepresentative {
    pub weight: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConfirmationQuorumResponse {
    #[serde(default)]
    pub principal_representative_min_weight: Option<String>,
    #[serde(default)]
    pub online_stake_total: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KnownAccountEntry {
    pub account: String,
    pub alias: String,
}

pub(crate) fn parse_raw(field: &str, value: &str) -> Result<u128, RpcError> {
    value.trim().parse::<u128>().map_err(|_| RpcError::InvalidAmount {
        field: field.to_string(),
        value: value.to_string(),
    })
}

impl RepresentativesOnlineResponse {
    /// Records ordered by descending weight, ties by account
    pub fn into_records(self) -> Result<Vec<RepresentativeRecord>, RpcError> {
        let mut records = self
            .representatives
            .into_iter()
            .map(|(account, rep)| {
                Ok(RepresentativeRecord {
                    weight: parse_raw("weight", &rep.weight)?,
                    account: normalize_address(&account),
                })
            })
            .collect::<Result<Vec<_>, RpcError>>()?;
        records.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.account.cmp(&b.account)));
        Ok(records)
    }
}

impl ConfirmationQuorumResponse {
    pub fn into_quorum(self) -> Result<ConfirmationQuorum, RpcError> {
        let min_weight = match (
            self.principal_representative_min_weight,
            self.online_stake_total,
        ) {
            (Some(min), _) => parse_raw("principal_representative_min_weight", &min)?,
            (None, Some(total)) => {
                parse_raw("online_stake_total", &total)? / PRINCIPAL_SHARE_DIVISOR
            }
            (None, None) => {
                return Err(RpcError::MissingField(
                    "principal_representative_min_weight".into(),
                ))
            }
        };
        Ok(ConfirmationQuorum {
            principal_representative_min_weight: min_weight,
        })
    }
}

impl From<KnownAccountEntry> for KnownAccount {
    fn from(entry: KnownAccountEntry) -> Self {
        KnownAccount {
            account: crate::config::normalize_address(&entry.account),
            alias: entry.alias.trim().to_string(),
        }
    }
}

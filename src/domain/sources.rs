//! Reference datasets supplied by the host's providers.

use serde::{Deserialize, Serialize};

use crate::domain::account::{KnownAccount, RepresentativeRecord, Representatives};

/// Network-wide quorum parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationQuorum {
    pub principal_representative_min_weight: u128,
}

/// Current snapshot of every provider.
///
/// Updates replace a whole collection; nothing is mutated in place.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub representatives: Representatives,
    pub quorum: Option<ConfirmationQuorum>,
    pub known_accounts: Vec<KnownAccount>,
}

impl Sources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loaded, positive principal threshold
    pub fn min_weight(&self) -> Option<u128> {
        self.quorum
            .map(|quorum| quorum.principal_representative_min_weight)
            .filter(|min| *min > 0)
    }

    pub fn begin_representatives_load(&mut self) {
        self.representatives.is_loading = true;
    }

    pub fn set_representatives(&mut self, records: Vec<RepresentativeRecord>) {
        self.representatives = Representatives::loaded(records);
    }

    pub fn set_quorum(&mut self, quorum: ConfirmationQuorum) {
        self.quorum = Some(quorum);
    }

    pub fn set_known_accounts(&mut self, known_accounts: Vec<KnownAccount>) {
        self.known_accounts = known_accounts;
    }
}

/// Merge alias sources in priority order, keeping the first alias per account.
pub fn merge_known_accounts<I>(layers: I) -> Vec<KnownAccount>
where
    I: IntoIterator<Item = Vec<KnownAccount>>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for layer in layers {
        for known in layer {
            if seen.insert(known.account.clone()) {
                out.push(known);
            }
        }
    }
    out
}

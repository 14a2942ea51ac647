//! Account classification against the representative set and the
//! known-accounts registry.

use serde::{Deserialize, Serialize};

/// A live representative and its voting weight (raw units)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeRecord {
    pub account: String,
    pub weight: u128,
}

/// A curated alias for an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownAccount {
    pub account: String,
    pub alias: String,
}

/// Snapshot of the representatives provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Representatives {
    pub records: Vec<RepresentativeRecord>,
    pub is_loading: bool,
}

impl Representatives {
    pub fn loading() -> Self {
        Self {
            records: Vec::new(),
            is_loading: true,
        }
    }

    pub fn loaded(records: Vec<RepresentativeRecord>) -> Self {
        Self {
            records,
            is_loading: false,
        }
    }
}

/// How the header presents an account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Plain,
    Representative,
    PrincipalRepresentative,
}

impl Role {
    pub fn title(self) -> Option<&'static str> {
        match self {
            Role::Plain => None,
            Role::Representative => Some("Representative"),
            Role::PrincipalRepresentative => Some("Principal Representative"),
        }
    }
}

/// Derived lookup result. Never stored beyond the header that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub representative: Option<RepresentativeRecord>,
    pub known_account: Option<KnownAccount>,
    /// Threshold the result was computed against; zero is treated as unset.
    pub min_weight: Option<u128>,
}

impl Classification {
    pub fn is_representative(&self) -> bool {
        self.representative.is_some()
    }

    /// Principal status requires a loaded, positive threshold.
    pub fn is_principal(&self) -> bool {
        match (&self.representative, self.min_weight) {
            (Some(rep), Some(min)) => rep.weight >= min,
            _ => false,
        }
    }

    /// The representative title is withheld until the quorum threshold is known.
    pub fn role(&self) -> Role {
        if !self.is_representative() || self.min_weight.is_none() {
            return Role::Plain;
        }
        if self.is_principal() {
            Role::PrincipalRepresentative
        } else {
            Role::Representative
        }
    }

    pub fn alias(&self) -> Option<&str> {
        self.known_account.as_ref().map(|known| known.alias.as_str())
    }
}

/// Classify `address`. Lookups are first-match in iteration order.
///
/// A representatives snapshot that is still loading (or empty) leaves the
/// representative unset: "not loaded yet" is not "not a representative".
pub fn classify(
    address: &str,
    representatives: &Representatives,
    min_weight: Option<u128>,
    known_accounts: &[KnownAccount],
) -> Classification {
    let min_weight = min_weight.filter(|min| *min > 0);
    if address.is_empty() {
        return Classification {
            min_weight,
            ..Classification::default()
        };
    }

    let representative = if representatives.is_loading || representatives.records.is_empty() {
        None
    } else {
        representatives
            .records
            .iter()
            .find(|rep| rep.account == address)
            .cloned()
    };

    let known_account = known_accounts
        .iter()
        .find(|known| known.account == address)
        .cloned();

    Classification {
        representative,
        known_account,
        min_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "nano_3x7cjioqahgs5ppheys6prpqtb4rdknked83chf97bot1unrbdkaux37zq6x";

    fn rep(account: &str, weight: u128) -> RepresentativeRecord {
        RepresentativeRecord {
            account: account.to_string(),
            weight,
        }
    }

    fn known(account: &str, alias: &str) -> KnownAccount {
        KnownAccount {
            account: account.to_string(),
            alias: alias.to_string(),
        }
    }

    #[test]
    fn test_principal_when_weight_meets_threshold() {
        let reps = Representatives::loaded(vec![rep(ADDR, 100)]);
        let result = classify(ADDR, &reps, Some(50), &[]);
        assert!(result.is_representative());
        assert!(result.is_principal());
        assert_eq!(result.role(), Role::PrincipalRepresentative);
        assert!(classify(ADDR, &reps, Some(100), &[]).is_principal());
    }

    #[test]
    fn test_representative_below_threshold() {
        let reps = Representatives::loaded(vec![rep(ADDR, 100)]);
        let result = classify(ADDR, &reps, Some(150), &[]);
        assert!(result.is_representative());
        assert!(!result.is_principal());
        assert_eq!(result.role(), Role::Representative);
        assert_eq!(result.role().title(), Some("Representative"));
    }

    #[test]
    fn test_loading_leaves_representative_unset() {
        let reps = Representatives {
            records: vec![rep(ADDR, 100)],
            is_loading: true,
        };
        let result = classify(ADDR, &reps, Some(1), &[]);
        assert!(result.representative.is_none());
        assert_eq!(result.role(), Role::Plain);
    }

    #[test]
    fn test_zero_or_missing_threshold_never_principal() {
        let reps = Representatives::loaded(vec![rep(ADDR, u128::MAX)]);
        for min_weight in [None, Some(0)] {
            let result = classify(ADDR, &reps, min_weight, &[]);
            assert!(result.is_representative());
            assert!(!result.is_principal());
            assert_eq!(result.role(), Role::Plain);
        }
    }

    #[test]
    fn test_first_match_wins() {
        let reps = Representatives::loaded(vec![rep(ADDR, 10), rep(ADDR, 500)]);
        let aliases = vec![known(ADDR, "first"), known(ADDR, "second")];
        let result = classify(ADDR, &reps, Some(1), &aliases);
        assert_eq!(result.representative.map(|r| r.weight), Some(10));
        assert_eq!(result.known_account.map(|k| k.alias), Some("first".into()));
    }

    #[test]
    fn test_alias_is_independent_of_representatives() {
        let aliases = vec![known("nano_other", "Other"), known(ADDR, "Genesis")];
        let result = classify(ADDR, &Representatives::loading(), Some(1), &aliases);
        assert_eq!(result.alias(), Some("Genesis"));
        assert!(!result.is_representative());

        let result = classify("nano_missing", &Representatives::default(), None, &aliases);
        assert_eq!(result.alias(), None);
    }

    #[test]
    fn test_empty_address_matches_nothing() {
        let reps = Representatives::loaded(vec![rep("", 100)]);
        let aliases = vec![known("", "blank")];
        let result = classify("", &reps, None, &aliases);
        assert_eq!(result, Classification::default());
    }
}

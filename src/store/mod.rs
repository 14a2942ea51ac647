//! Local persistence

mod known_accounts;

pub use known_accounts::KnownAccountStore;

//! Domain layer - account classification and provider snapshots

pub mod account;
pub mod sources;

pub use sources::{ConfirmationQuorum, Sources};

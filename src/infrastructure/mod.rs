//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - The node RPC client and known-accounts registry fetch
//! - Tokio runtime bridge for async dataset loading
//! - Clipboard and QR collaborators

pub mod clipboard;
pub mod nano;
pub mod qr;
pub mod runtime;

pub use clipboard::SystemClipboard;
pub use qr::render_qr;

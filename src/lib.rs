//! Terminal account viewer for Nano-style block-lattice ledgers.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod store;
pub mod ui;

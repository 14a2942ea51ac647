//! Runtime infrastructure - Tokio runtime bridge for async dataset loading

mod bridge;
mod worker;

pub use bridge::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
pub use worker::{load_datasets, run_async_worker};

//! Model artifact provisioning.

mod fetch;

pub use fetch::{ensure_model, ensure_model_blocking};

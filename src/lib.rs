//! tetrad (workspace facade crate).
//!
//! Re-exports the engine as `tetrad::core` and the shared types as
//! `tetrad::types`; the implementation lives in the crates under `crates/`.

pub use tetrad_core as core;
pub use tetrad_types as types;

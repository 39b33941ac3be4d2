//! Workspace tooling package.
//!
//! The oven transit library and CLI live under `crates/`; this package only
//! exists so workspace-level hooks can be installed with `cargo test`.

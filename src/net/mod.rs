//! Networking modules for the hosted identity and record-store SDK.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` and `store` define the injected capability traits, `types`
//! defines the shared wire schema, and `sdk` binds both traits to the
//! browser's global SDK object.

pub mod identity;
pub mod sdk;
pub mod store;
pub mod types;

//! Session credential handling.
//!
//! [`SessionStore`] owns the single persisted API-key slot; [`Access`] is the
//! gate decision protected views take before rendering. The store is the only
//! writer of the credential; everything else reads it.

pub mod access;
pub mod store;

pub use access::Access;
pub use store::SessionStore;

//! `prople-orgagent-core` holds the trust-state reconciliation logic of an organizational agent.
//!
//! The crate never talks to a database, a ledger or a signer directly. Every collaborator is
//! reached through the traits defined at each sub-domain's `types` module, which makes the
//! usecases testable with `mockall` and lets the application crate decide about storage and
//! transport.
pub mod trust;

//! `trust` is the domain used to maintain what an organization publicly discloses about itself
//! and with whom it keeps a trust relationship.
//!
//! It has four sub-domains:
//!
//! - `catalog`
//! - `presentation`
//! - `connection`
//! - `revocation`
//!
//! ---
//!
//! The `catalog` is a closed, static mapping between a credential kind and its `JSON-LD`
//! context and type identifiers, including the short tag used to name credential definitions.
//! It also decides how a subject must be shaped when the kind carries its own schema.
//!
//! ---
//!
//! The `presentation` sub-domain collects every public document and every public credential
//! owned by the organization, turns each of them into a `VC` fragment and publishes them as one
//! signed `VP`. There is only one stored presentation per organization. All rebuilds are
//! consumed by a single worker, so an older rebuild can never overwrite a newer one.
//!
//! ---
//!
//! The `connection` sub-domain reconciles connection lifecycle events delivered by the external
//! credential-exchange agent with the local partner records, and owns the removal of a
//! connection including its cascading cleanup.
//!
//! ---
//!
//! The `revocation` sub-domain makes sure a credential definition and an active revocation
//! registry exist before a credential type can be issued. Both operations are idempotent.
pub mod types;

pub mod catalog;
pub use catalog::CredentialType;

pub mod connection;
pub mod presentation;
pub mod revocation;

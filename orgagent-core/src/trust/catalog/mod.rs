//! `catalog` provides the closed set of credential kinds known by the organizational agent.
//!
//! Each kind is described by a static [`Descriptor`]. Adding a new kind means adding one
//! [`CredentialType`] variant and one descriptor entry, the aggregation logic never branches
//! on the kind itself, it only follows the descriptor's [`SubjectShape`].
pub mod types;
pub use types::{CredentialType, Descriptor, SubjectShape};

mod schema;
pub use schema::schema_name;

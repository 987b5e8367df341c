//! `revocation` makes a credential type issuable: it needs a credential definition supporting
//! revocation and an active revocation registry with a publicly served tails file.
pub mod types;
pub use types::{
    AgentBuilder, CredentialDefinitionRequest, RegistryOutcome, RegistryState, RevocationAPI,
    RevocationError, UsecaseBuilder,
};

pub mod usecase;
pub use usecase::{tails_file_uri, Usecase};

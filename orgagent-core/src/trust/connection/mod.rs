//! `connection` owns the partner records of the organization.
//!
//! The external agent delivers connection lifecycle events asynchronously and possibly
//! concurrently. The [`usecase::Usecase`] merges them into the `Partner` records one at a time.
pub mod types;
pub use types::{
    AgentBuilder, ConnectionAPI, ConnectionError, ConnectionEvent, ConnectionID,
    InvitationRequest, PresentationExchangeRecord, ReconcileOutcome, RepoPartnerBuilder,
    RepoProofBuilder, UsecaseBuilder,
};

pub mod partner;
pub use partner::{Partner, PartnerProof};

pub mod removal;
pub use removal::{RemovalReport, RemovalStatus, RemovalStep, StepOutcome};

pub mod usecase;
pub use usecase::Usecase;

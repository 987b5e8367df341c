//! `presentation` maintains the organization's single signed `VP`.
//!
//! Visibility changes are turned into rebuild intents through [`PresentationAPI::notify`]. A
//! single [`worker::Worker`] consumes them: it aggregates every public source into `VC`
//! fragments with the [`aggregator::Aggregator`] and stores the signed result through the
//! [`publisher::Publisher`].
pub mod types;
pub use types::{
    PresentationAPI, PresentationError, RepoBuilder, SignerBuilder, SourceRepoBuilder,
    UsecaseBuilder, VisibilityChange, SINGLE_PRESENTATION_KEY, VP_TYPE,
};

pub mod credential;
pub mod document;
pub use credential::IssuedCredential;
pub use document::PublishedDocument;

pub mod fragment;
pub use fragment::{VerifiableCredential, VerifiablePresentation};

pub mod subject;
pub use subject::{BankAccount, BankAccountSubject};

pub mod aggregator;
pub mod publisher;
pub mod record;
pub use aggregator::Aggregator;
pub use publisher::Publisher;
pub use record::PresentationRecord;

pub mod worker;
pub use worker::{channel, RebuildHandle, Worker};

pub mod usecase;
pub use usecase::Usecase;
